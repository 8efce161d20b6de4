//! Doctor command implementation
//!
//! Checks that the hull capability works in this build.

use anyhow::Result;
use colored::Colorize;
use polyview_geometry::HullAdapter;
use std::process::ExitCode;

/// Run the doctor command
///
/// Checks:
/// - Version information
/// - Hull provider compiled into this build
/// - Capability probe (unit tetrahedron)
///
/// # Returns
/// Exit code: 0 if the probe passes, 1 otherwise
pub fn run() -> Result<ExitCode> {
    println!("{}", "Polyview Doctor".cyan().bold());
    println!("{}", "===============".cyan());
    println!();

    println!("{}", "Versions:".bold());
    println!(
        "  {} polyview-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("{}", "Hull capability:".bold());
    let adapter = HullAdapter::with_default_provider();
    println!("  {} provider: {}", "->".green(), adapter.provider_name());

    let ok = match adapter.probe() {
        Ok(()) => {
            println!("  {} probe tetrahedron hulled", "ok".green());
            true
        }
        Err(e) => {
            println!("  {} probe failed: {}", "!!".red(), e);
            println!(
                "     {}",
                "Rebuild with the `chull` feature to enable hull computation.".dimmed()
            );
            false
        }
    };
    println!();

    if ok {
        println!("{}", "All checks passed.".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}", "Some checks failed.".red().bold());
        Ok(ExitCode::from(1))
    }
}
