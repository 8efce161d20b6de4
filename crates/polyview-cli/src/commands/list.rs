//! List command implementation
//!
//! Prints the registered shape builders.

use anyhow::{Context, Result};
use colored::Colorize;
use polyview_shapes::builtin_registry;
use serde::Serialize;
use std::process::ExitCode;

/// One registered builder, as printed by `list --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuilderInfo {
    pub module: String,
    pub function: String,
    pub json_file: String,
}

/// Registered builders in registration order.
pub fn builders() -> Vec<BuilderInfo> {
    builtin_registry()
        .iter()
        .map(|entry| BuilderInfo {
            module: entry.module.clone(),
            function: entry.function.clone(),
            json_file: entry.json_file(),
        })
        .collect()
}

/// Run the list command
pub fn run(json: bool) -> Result<ExitCode> {
    let builders = builders();

    if json {
        let out = serde_json::to_string_pretty(&builders).context("Failed to serialize builder list")?;
        println!("{}", out);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Registered builders:".cyan().bold());
    let mut current_module = "";
    for builder in &builders {
        if builder.module != current_module {
            println!("  {}", builder.module.bold());
            current_module = &builder.module;
        }
        println!(
            "    {} {:<30} -> {}",
            "-".dimmed(),
            builder.function,
            builder.json_file
        );
    }
    println!();
    println!("{} {}", "Total:".blue().bold(), builders.len());

    Ok(ExitCode::SUCCESS)
}
