use colored::Colorize;

use crate::driver::{BuildResult, ManifestOutcome, RunSummary};

const RULE: &str = "======================================";

pub(crate) fn print_banner(title: &str) {
    println!("{}", RULE.cyan());
    println!("  {}", title.cyan());
    println!("{}", RULE.cyan());
    println!();
}

/// Progress for one finished unit of work: a dot or cross, or a full line in
/// verbose mode.
pub(crate) fn print_progress(result: &BuildResult, verbose: bool) {
    match (result.is_success(), verbose) {
        (true, true) => println!(
            "  {} {} -> {} ({}ms)",
            "SUCCESS".green(),
            result.function,
            result.json_file,
            result.duration_ms
        ),
        (false, true) => println!(
            "  {} {} - {}",
            "FAILED".red(),
            result.function,
            result.message
        ),
        (true, false) => print!("{}", ".".green()),
        (false, false) => print!("{}", "x".red()),
    }
}

/// One table row: marker, module, function, output file and failure reason.
pub(crate) fn summary_line(result: &BuildResult) -> String {
    let marker = if result.is_success() { "[✓]" } else { "[X]" };
    let message = if result.message.is_empty() {
        String::new()
    } else {
        format!(" ({})", result.message)
    };
    format!(
        "{} {:<25} :: {:<30} -> {}{}",
        marker, result.module, result.function, result.json_file, message
    )
}

pub(crate) fn print_summary(summary: &RunSummary, manifest_name: &str) {
    println!();
    print_banner("Build Summary");

    if summary.results.is_empty() {
        println!("No builder functions found to summarize.");
    }
    for result in &summary.results {
        let line = summary_line(result);
        if result.is_success() {
            println!("{}", line.green());
        } else {
            println!("{}", line.red());
        }
    }
    println!();

    println!(
        "{} {}",
        "Builder functions found:".blue().bold(),
        summary.functions_found
    );
    println!("{} {}", "Successful:".green().bold(), summary.succeeded);
    println!("{} {}", "Failed:".red().bold(), summary.failed);
    let codes = summary.failure_codes();
    if !codes.is_empty() {
        let grouped: Vec<String> = codes
            .iter()
            .map(|(code, count)| format!("{} x{}", code, count))
            .collect();
        println!("{} {}", "Failure codes:".red().bold(), grouped.join(", "));
    }
    println!(
        "{} {:.2}s",
        "Total runtime:".blue().bold(),
        summary.runtime_seconds
    );
    match &summary.manifest {
        ManifestOutcome::Written { path, entries } => println!(
            "{} {} ({} entries)",
            "Manifest:".blue().bold(),
            path,
            entries
        ),
        ManifestOutcome::Failed { error } => println!(
            "{} '{}' generation FAILED: {}",
            "Manifest:".red().bold(),
            manifest_name,
            error
        ),
    }
}
