//! Generate command implementation
//!
//! Runs every registered shape builder, writes one JSON file per shape and
//! regenerates the manifest.

use anyhow::{Context, Result};
use colored::Colorize;
use polyview_geometry::HullAdapter;
use polyview_shapes::builtin_registry;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use super::reporting::{print_banner, print_progress, print_summary};
use crate::driver::{BatchDriver, DriverConfig};

/// Run the generate command
///
/// # Arguments
/// * `out_dir` - Output directory for shape files and the manifest
/// * `manifest_name` - Manifest filename inside `out_dir`
/// * `only` - Shape identifiers to run (empty: all)
/// * `verbose` - Print one line per shape instead of progress dots
/// * `json` - Print the run summary as JSON instead of the colored report
/// * `strict` - Exit with 1 when any shape failed
///
/// # Returns
/// Exit code: 0 success, 1 under `strict` when any shape failed
pub fn run(
    out_dir: &str,
    manifest_name: &str,
    only: &[String],
    verbose: bool,
    json: bool,
    strict: bool,
) -> Result<ExitCode> {
    let registry = builtin_registry();
    let adapter = HullAdapter::with_default_provider();
    let config = DriverConfig {
        out_dir: PathBuf::from(out_dir),
        manifest_name: manifest_name.to_string(),
        only: only.to_vec(),
        verbose,
    };

    if !json {
        print_banner("Polyview Geometry Generator");
        println!("{} {}", "Output directory:".blue().bold(), out_dir);
        println!("{} {}", "Manifest:".blue().bold(), manifest_name);
        println!(
            "{} {}",
            "Hull provider:".blue().bold(),
            adapter.provider_name()
        );
        println!();
        println!(
            "{} Found {} builder functions",
            "INFO".blue().bold(),
            registry.select(only).map_or(0, |entries| entries.len())
        );
    }

    let driver = BatchDriver::new(&registry, &adapter, config);
    let summary = driver.run(|result| {
        if !json {
            print_progress(result, driver.config().verbose);
            // Progress dots have no newline.
            let _ = std::io::stdout().flush();
        }
    })?;

    if json {
        let out =
            serde_json::to_string_pretty(&summary).context("Failed to serialize run summary")?;
        println!("{}", out);
    } else {
        if !verbose {
            println!(); // Newline after progress dots
        }
        print_summary(&summary, manifest_name);
    }

    if strict && summary.has_failures() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
