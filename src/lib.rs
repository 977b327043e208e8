//! # Cosmos Migration Check Library
//!
//! @title Cosmos Migration Check - CodeQL Runner and Finding Annotator
//!
//! Drives the CodeQL CLI over a Go source tree with the Cosmos SDK migration
//! query pack and renders the SARIF results as annotated source excerpts.
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions and argument parsing
//! - [`session`] - Temporary database lifecycle and step sequencing
//! - [`engine`] - CodeQL command lines and the process-running seam
//! - [`analysis`] - `database analyze` and SARIF loading
//! - [`report`] - SARIF subset model and flattened findings
//! - [`render`] - Three-line annotated finding output
//!
//! ## Example
//!
//! ```rust,ignore
//! use cosmos_migration_check::{run_check, CheckOptions, SystemRunner};
//!
//! let options = CheckOptions::new("./chain", Some("make build".into()));
//! let findings = run_check(&options, &SystemRunner, std::io::stdout())?;
//! ```

pub mod analysis;
pub mod cli;
pub mod engine;
pub mod error;
pub mod render;
pub mod report;
pub mod session;

pub use cli::Cli;
pub use engine::{CommandRunner, SystemRunner};
pub use error::CheckError;
pub use report::{AnalysisReport, Finding, FindingSummary, Severity};
pub use session::{run_check, CheckOptions};
