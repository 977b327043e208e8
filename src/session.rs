//! # Session Module
//!
//! @title Check Session Orchestrator
//!
//! Owns the temporary CodeQL database for one check: creates it, builds the
//! database from the source tree, hands it to the analysis runner, renders
//! the results, and removes the directory on every exit path.

use crate::analysis;
use crate::engine::{self, CommandRunner};
use crate::error::{CheckError, Result};
use crate::render::Renderer;
use crate::report::Finding;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix of the temporary database directory name.
pub const DB_PREFIX: &str = "cosmos-migration-db";

/// Inputs of a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Root of the Go source tree to analyze.
    pub source_dir: PathBuf,

    /// Custom build command for `database create`. Empty means none.
    pub build_command: Option<String>,
}

impl CheckOptions {
    pub fn new(source_dir: impl Into<PathBuf>, build_command: Option<String>) -> Self {
        Self {
            source_dir: source_dir.into(),
            build_command: build_command.filter(|c| !c.is_empty()),
        }
    }
}

/// Runs a full check: create database, analyze, render.
///
/// Notices and rendered findings are written to `out`. The database
/// directory is removed before this returns, whether or not the check
/// succeeded; a panic also releases it through [`tempfile::TempDir`]'s drop.
///
/// # Returns
///
/// The findings that were rendered, in report order.
///
/// # Errors
///
/// The first failure of any step, unchanged. No later step runs.
pub fn run_check<W: Write>(
    options: &CheckOptions,
    runner: &dyn CommandRunner,
    out: W,
) -> Result<Vec<Finding>> {
    let db = tempfile::Builder::new()
        .prefix(DB_PREFIX)
        .tempdir()
        .map_err(CheckError::TempDir)?;
    log::debug!("database directory: {}", db.path().display());

    let outcome = check_in(db.path(), options, runner, out);

    let db_path = db.path().to_path_buf();
    match db.close() {
        Ok(()) => log::debug!("removed {}", db_path.display()),
        Err(e) => log::warn!("failed to remove {}: {}", db_path.display(), e),
    }

    outcome
}

fn check_in<W: Write>(
    db_path: &Path,
    options: &CheckOptions,
    runner: &dyn CommandRunner,
    mut out: W,
) -> Result<Vec<Finding>> {
    let invocation =
        engine::create_database(&options.source_dir, options.build_command.as_deref(), db_path);

    if let Some(ref cmd) = options.build_command {
        writeln!(out, "Using custom build command: {}", cmd).map_err(CheckError::Output)?;
    }
    writeln!(out, "{}", invocation).map_err(CheckError::Output)?;
    out.flush().map_err(CheckError::Output)?;

    let spinner = database_spinner();
    let created = runner.run(&invocation);
    spinner.finish_and_clear();
    created?;

    let report = analysis::analyze(db_path, runner)?;

    Renderer::new(out).render(&report)
}

/// Spinner shown while `database create` runs with its output discarded.
///
/// Hidden automatically when stderr is not a terminal.
fn database_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Creating CodeQL database...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tests::FakeRunner;

    fn plain() {
        colored::control::set_override(false);
    }

    fn db_arg(runner: &FakeRunner) -> PathBuf {
        PathBuf::from(runner.calls.borrow()[0].args.last().unwrap())
    }

    #[test]
    fn test_full_check_renders_findings() {
        plain();
        let src = tempfile::tempdir().unwrap();
        let foo = src.path().join("foo.go");
        std::fs::write(&foo, "package main\n\nx := 1\n").unwrap();

        let sarif = serde_json::json!({"runs": [{"results": [{
            "message": {"text": "unused variable"},
            "locations": [{"physicalLocation": {
                "artifactLocation": {"uri": foo.display().to_string()},
                "region": {"startLine": 3, "startColumn": 5}
            }}]
        }]}]});
        let runner = FakeRunner {
            sarif: Some(sarif.to_string()),
            ..Default::default()
        };

        let mut out = Vec::new();
        let options = CheckOptions::new(src.path(), None);
        let findings = run_check(&options, &runner, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(findings.len(), 1);
        assert!(text.starts_with("[codeql database create --language=go --source-root "));
        assert!(!text.contains("Using custom build command"));
        assert!(text.ends_with(&format!(
            "{}:3:5: unused variable\n  3: x := 1\n     ^\n",
            foo.display()
        )));

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].args[1], "create");
        assert_eq!(calls[1].args[1], "analyze");
    }

    #[test]
    fn test_build_command_is_passed_through() {
        plain();
        let runner = FakeRunner {
            sarif: Some("{}".to_string()),
            ..Default::default()
        };

        let mut out = Vec::new();
        let options = CheckOptions::new(".", Some("make build".to_string()));
        run_check(&options, &runner, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Using custom build command: make build\n"));
        assert!(text.contains("--command make build"));

        let create = &runner.calls.borrow()[0];
        let pos = create.args.iter().position(|a| a == "--command").unwrap();
        assert_eq!(create.args[pos + 1], "make build");
    }

    #[test]
    fn test_empty_build_command_is_ignored() {
        let options = CheckOptions::new(".", Some(String::new()));
        assert_eq!(options.build_command, None);
    }

    #[test]
    fn test_database_removed_after_success() {
        let runner = FakeRunner {
            sarif: Some("{}".to_string()),
            ..Default::default()
        };

        run_check(&CheckOptions::new(".", None), &runner, std::io::sink()).unwrap();

        let db = db_arg(&runner);
        assert!(db.file_name().unwrap().to_string_lossy().starts_with(DB_PREFIX));
        assert!(!db.exists());
    }

    #[test]
    fn test_create_failure_stops_check() {
        let runner = FakeRunner {
            fail: vec!["create"],
            ..Default::default()
        };

        let err = run_check(&CheckOptions::new(".", None), &runner, std::io::sink()).unwrap_err();

        assert!(matches!(err, CheckError::Exit { .. }));
        assert_eq!(runner.calls.borrow().len(), 1);
        assert!(!db_arg(&runner).exists());
    }

    #[test]
    fn test_analysis_failure_prints_no_findings() {
        plain();
        let runner = FakeRunner {
            sarif: Some("{}".to_string()),
            fail: vec!["analyze"],
            ..Default::default()
        };

        let mut out = Vec::new();
        let err = run_check(&CheckOptions::new(".", None), &runner, &mut out).unwrap_err();

        assert!(err.to_string().contains("analysis failed"));
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(!db_arg(&runner).exists());
    }
}
