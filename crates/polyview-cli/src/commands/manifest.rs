//! Manifest command implementation
//!
//! Regenerates the manifest from the files already in the output directory.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use crate::output::regenerate_manifest;

/// Run the manifest command
///
/// # Arguments
/// * `out_dir` - Output directory to scan
/// * `manifest_name` - Manifest filename inside `out_dir`
pub fn run(out_dir: &str, manifest_name: &str) -> Result<ExitCode> {
    let dir = Path::new(out_dir);
    let entries = regenerate_manifest(dir, manifest_name)
        .with_context(|| format!("Failed to regenerate manifest in {}", out_dir))?;

    println!(
        "{} {} ({} entries)",
        "Manifest written:".green().bold(),
        dir.join(manifest_name).display(),
        entries.len()
    );
    for entry in &entries {
        println!("  {} {}", "-".dimmed(), entry);
    }

    Ok(ExitCode::SUCCESS)
}
