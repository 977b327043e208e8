//! # Cosmos Migration Check CLI Entry Point
//!
//! @title Cosmos Migration Check CLI
//!
//! This module provides the main entry point for the command-line tool.

use anyhow::Result;
use clap::Parser;
use colored::*;
use cosmos_migration_check::{run_check, Cli, FindingSummary, SystemRunner};

/// Application entry point.
///
/// Initializes logging, parses arguments, and runs the check. Any failure is
/// reported as a single `Error:` line on stderr with exit code 1.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = cli.check_options();

    println!(
        "{} {}",
        "[*] Analyzing:".green().bold(),
        options.source_dir.display().to_string().yellow()
    );

    let findings = run_check(&options, &SystemRunner, std::io::stdout().lock())?;

    println!("\n{}", "=".repeat(60).cyan());
    FindingSummary::from_findings(&findings).print();

    Ok(())
}
