//! # Engine Module
//!
//! @title CodeQL Invocation Seam
//!
//! Builds the two CodeQL command lines the check needs and runs them through
//! the [`CommandRunner`] trait. [`SystemRunner`] spawns real processes; tests
//! substitute a recording runner.
//!
//! ## Invocations
//!
//! | Step | Command | Output |
//! |------|---------|--------|
//! | create | `codeql database create --language=go --source-root <dir> [--command <cmd>] <db>` | discarded |
//! | analyze | `codeql database analyze --format=sarif-latest --output=<db>/results.json <db> skip-mev/cosmos-52-ql` | inherited |

use crate::error::{CheckError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Executable name of the analysis engine, resolved through `PATH`.
pub const ENGINE: &str = "codeql";

/// Language passed to `database create`.
pub const LANGUAGE: &str = "go";

/// Query pack run by `database analyze`.
pub const RULE_PACK: &str = "skip-mev/cosmos-52-ql";

/// Name of the SARIF file written inside the database directory.
pub const RESULTS_FILE: &str = "results.json";

/// What to do with a child process's stdout and stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Discard both streams.
    Quiet,
    /// Connect both streams to this process's.
    Inherit,
}

/// A fully built engine command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub output: OutputMode,
}

impl Invocation {
    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    /// Program and arguments joined by spaces, for messages.
    pub fn command_line(&self) -> String {
        self.argv().join(" ")
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.command_line())
    }
}

/// Builds the `database create` invocation.
///
/// `--command` and its value are added only when `build_command` is present
/// and non-empty. The value is passed as one argument; CodeQL does its own
/// splitting.
pub fn create_database(source_root: &Path, build_command: Option<&str>, db_path: &Path) -> Invocation {
    let mut args = vec![
        "database".to_string(),
        "create".to_string(),
        format!("--language={}", LANGUAGE),
        "--source-root".to_string(),
        source_root.display().to_string(),
    ];

    if let Some(cmd) = build_command.filter(|c| !c.is_empty()) {
        args.push("--command".to_string());
        args.push(cmd.to_string());
    }

    args.push(db_path.display().to_string());

    Invocation {
        program: ENGINE.to_string(),
        args,
        output: OutputMode::Quiet,
    }
}

/// Path of the SARIF file `database analyze` writes for `db_path`.
pub fn results_path(db_path: &Path) -> PathBuf {
    db_path.join(RESULTS_FILE)
}

/// Builds the `database analyze` invocation writing SARIF to `output`.
pub fn analyze_database(db_path: &Path, output: &Path) -> Invocation {
    Invocation {
        program: ENGINE.to_string(),
        args: vec![
            "database".to_string(),
            "analyze".to_string(),
            "--format=sarif-latest".to_string(),
            format!("--output={}", output.display()),
            db_path.display().to_string(),
            RULE_PACK.to_string(),
        ],
        output: OutputMode::Inherit,
    }
}

/// Runs engine invocations to completion.
///
/// Implementations block until the process exits. There is no timeout.
pub trait CommandRunner {
    /// Runs `invocation`, succeeding only on a zero exit status.
    ///
    /// # Errors
    ///
    /// [`CheckError::Launch`] when the process cannot be spawned and
    /// [`CheckError::Exit`] when it exits unsuccessfully.
    fn run(&self, invocation: &Invocation) -> Result<()>;
}

/// [`CommandRunner`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        log::debug!("spawning {}", invocation.command_line());

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);

        if invocation.output == OutputMode::Quiet {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = command.status().map_err(|source| CheckError::Launch {
            program: invocation.program.clone(),
            source,
        })?;

        if !status.success() {
            return Err(CheckError::Exit {
                command: invocation.command_line(),
                status: status.to_string(),
            });
        }

        Ok(())
    }
}
