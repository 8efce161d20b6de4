//! Polyview CLI library.
//!
//! This crate provides the batch driver that turns every registered shape
//! into a viewer JSON file, the output-directory helpers it writes through,
//! and the command implementations behind the `polyview` binary.

pub mod commands;
pub mod driver;
pub mod output;

pub use driver::{
    BatchDriver, BuildResult, BuildStatus, DriverConfig, DriverError, ManifestOutcome, RunSummary,
};
pub use output::{OutputError, WrittenFile, DEFAULT_OUTPUT_DIR, MANIFEST_FILENAME};
