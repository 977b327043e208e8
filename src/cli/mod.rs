//! # CLI Module
//!
//! @title Command Line Interface
//!
//! This module defines the command-line interface using the `clap` derive
//! macros. The tool takes no subcommands: a directory to analyze and an
//! optional custom build command.

use crate::session::CheckOptions;
use clap::Parser;
use std::path::PathBuf;

/// Cosmos migration check command-line interface.
///
/// Builds a CodeQL database for a Go source tree, runs the Cosmos SDK
/// migration query pack against it, and prints each finding with the
/// offending source line.
#[derive(Parser, Debug)]
#[command(name = "cosmos-migration-check")]
#[command(version)]
#[command(about = "Run the Cosmos SDK migration CodeQL pack and annotate its findings")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory to analyze.
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,

    /// Custom build command.
    ///
    /// Passed as a single value to `codeql database create --command`.
    /// Leave empty to let CodeQL detect the build.
    #[arg(long, value_name = "COMMAND", default_value = "")]
    pub command: String,
}

impl Cli {
    /// Converts parsed arguments into check inputs.
    pub fn check_options(&self) -> CheckOptions {
        CheckOptions::new(self.dir.clone(), Some(self.command.clone()))
    }
}
