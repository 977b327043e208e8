//! # Analysis Module
//!
//! @title CodeQL Analysis Runner
//!
//! Runs `codeql database analyze` with the migration query pack against an
//! existing database and decodes the SARIF it writes.

use crate::engine::{self, CommandRunner};
use crate::error::{CheckError, Result};
use crate::report::AnalysisReport;
use std::path::Path;

/// Analyzes the database at `db_path` and returns the decoded report.
///
/// The engine's stdout and stderr are shown to the user as it runs. The
/// results file lives inside the database directory and goes away with it.
///
/// # Errors
///
/// - [`CheckError::AnalysisFailed`] if the engine cannot be launched or exits
///   unsuccessfully; the results file is not read in that case.
/// - [`CheckError::ReadReport`] if the results file cannot be read.
/// - [`CheckError::Decode`] if the results file is malformed.
pub fn analyze(db_path: &Path, runner: &dyn CommandRunner) -> Result<AnalysisReport> {
    let results_path = engine::results_path(db_path);
    let invocation = engine::analyze_database(db_path, &results_path);

    runner
        .run(&invocation)
        .map_err(|e| CheckError::AnalysisFailed(Box::new(e)))?;

    log::debug!("reading results from {}", results_path.display());
    let data = std::fs::read(&results_path).map_err(|source| CheckError::ReadReport {
        path: results_path.clone(),
        source,
    })?;

    let report = AnalysisReport::from_slice(&data)?;
    log::debug!(
        "decoded {} run(s) with {} result(s)",
        report.runs.len(),
        report.result_count()
    );

    Ok(report)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::engine::Invocation;
    use std::cell::RefCell;
    use std::path::PathBuf;

    /// Records invocations; writes `sarif` to the `--output=` path of analyze
    /// invocations, and fails any step whose subcommand is in `fail`.
    #[derive(Default)]
    pub(crate) struct FakeRunner {
        pub(crate) sarif: Option<String>,
        pub(crate) fail: Vec<&'static str>,
        pub(crate) calls: RefCell<Vec<Invocation>>,
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, invocation: &Invocation) -> Result<()> {
            self.calls.borrow_mut().push(invocation.clone());

            let step = invocation.args.get(1).map(String::as_str).unwrap_or("");
            if self.fail.iter().any(|f| *f == step) {
                return Err(CheckError::Exit {
                    command: invocation.command_line(),
                    status: "exit status: 2".to_string(),
                });
            }

            let output = invocation
                .args
                .iter()
                .find_map(|a| a.strip_prefix("--output="))
                .map(PathBuf::from);

            if let (Some(path), Some(sarif)) = (output, &self.sarif) {
                std::fs::write(path, sarif).unwrap();
            }

            Ok(())
        }
    }

    #[test]
    fn test_analyze_decodes_results() {
        let db = tempfile::tempdir().unwrap();
        let runner = FakeRunner {
            sarif: Some(
                r#"{"runs":[{"results":[{"message":{"text":"m"},"locations":[]}]}]}"#.to_string(),
            ),
            ..Default::default()
        };

        let report = analyze(db.path(), &runner).unwrap();

        assert_eq!(report.result_count(), 1);
        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args[1], "analyze");
        assert_eq!(calls[0].args.last().unwrap(), "skip-mev/cosmos-52-ql");
    }

    #[test]
    fn test_engine_failure_is_analysis_failed() {
        let db = tempfile::tempdir().unwrap();
        let runner = FakeRunner {
            sarif: Some("{}".to_string()),
            fail: vec!["analyze"],
            ..Default::default()
        };

        let err = analyze(db.path(), &runner).unwrap_err();

        assert!(matches!(err, CheckError::AnalysisFailed(_)));
        assert!(err.to_string().contains("analysis failed"));
        assert!(!engine::results_path(db.path()).exists());
    }

    #[test]
    fn test_missing_results_file_is_read_error() {
        let db = tempfile::tempdir().unwrap();
        let runner = FakeRunner::default();

        let err = analyze(db.path(), &runner).unwrap_err();
        assert!(matches!(err, CheckError::ReadReport { .. }));
    }

    #[test]
    fn test_malformed_results_is_decode_error() {
        let db = tempfile::tempdir().unwrap();
        let runner = FakeRunner {
            sarif: Some("not json".to_string()),
            ..Default::default()
        };

        let err = analyze(db.path(), &runner).unwrap_err();
        assert!(matches!(err, CheckError::Decode(_)));
    }
}
