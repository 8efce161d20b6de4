//! Polyview CLI - Command-line interface for polytope geometry export
//!
//! This binary turns the builtin polytope generators into the JSON files and
//! manifest consumed by the viewer.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use polyview_cli::commands;
use polyview_cli::{DEFAULT_OUTPUT_DIR, MANIFEST_FILENAME};

/// Polyview - 3D polytope geometry generator
#[derive(Parser)]
#[command(name = "polyview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every shape builder and write one JSON file per shape plus the manifest
    Generate {
        /// Output directory
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        out_dir: String,

        /// Manifest filename inside the output directory
        #[arg(long, default_value = MANIFEST_FILENAME)]
        manifest: String,

        /// Only run these shapes (identifier like `cube` or function like `build_cube`)
        #[arg(long, value_name = "ID")]
        only: Vec<String>,

        /// Print one line per shape instead of progress dots
        #[arg(short, long)]
        verbose: bool,

        /// Print the run summary as JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// Exit with a non-zero code when any shape fails
        #[arg(long)]
        strict: bool,
    },

    /// List the registered shape builders
    List {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Regenerate the manifest from the files in the output directory
    Manifest {
        /// Output directory
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        out_dir: String,

        /// Manifest filename inside the output directory
        #[arg(long, default_value = MANIFEST_FILENAME)]
        manifest: String,
    },

    /// Check the hull capability of this build
    Doctor,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            out_dir,
            manifest,
            only,
            verbose,
            json,
            strict,
        } => commands::generate::run(&out_dir, &manifest, &only, verbose, json, strict),
        Commands::List { json } => commands::list::run(json),
        Commands::Manifest { out_dir, manifest } => commands::manifest::run(&out_dir, &manifest),
        Commands::Doctor => commands::doctor::run(),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
