//! CLI command implementations

pub mod doctor;
pub mod generate;
pub mod list;
pub mod manifest;

mod reporting;
