//! Polyview End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the export pipeline:
//!
//! - Batch: registry -> driver -> shape files and manifest
//! - Geometry: face ordering, planarity and convexity of exported records
//! - **Determinism**: byte-identical shape files across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p polyview-tests
//! ```
//!
//! ## Fixtures
//!
//! The `fixtures` module holds stub polyhedra and builders with known
//! behaviour (declining, panicking, wrong dimension) so driver behaviour can
//! be pinned down without depending on the hull library.

pub mod fixtures;
pub mod geometry_checks;
pub mod harness;
