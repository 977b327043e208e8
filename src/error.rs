//! # Error Types
//!
//! @title Check Error Taxonomy
//!
//! Every failure in the check pipeline is a [`CheckError`]. Messages carry a
//! short static context only; the underlying cause is reachable through
//! [`std::error::Error::source`], so callers that want the full chain should
//! format with `{:#}` through `anyhow` or walk the sources themselves.

use std::io;
use std::path::PathBuf;

/// Errors raised while creating, analyzing, or rendering a CodeQL database.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The temporary database directory could not be created.
    #[error("failed to create temporary database directory")]
    TempDir(#[source] io::Error),

    /// The engine process could not be spawned.
    #[error("failed to launch `{program}`")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The engine process ran but exited unsuccessfully.
    #[error("`{command}` exited unsuccessfully ({status})")]
    Exit { command: String, status: String },

    /// The `database analyze` step failed.
    #[error("analysis failed")]
    AnalysisFailed(#[source] Box<CheckError>),

    /// The SARIF results file could not be read.
    #[error("failed to read results file {}", path.display())]
    ReadReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The SARIF results file is not valid JSON for the decoded subset.
    #[error("failed to decode SARIF report")]
    Decode(#[from] serde_json::Error),

    /// A source file referenced by a finding could not be opened or scanned.
    #[error("{}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The requested line lies past the end of the file.
    #[error("file has fewer than {line} lines")]
    LineOutOfRange { line: usize },

    /// Rendering stopped because a referenced source line was unavailable.
    #[error("failed to read file")]
    RenderRead(#[source] Box<CheckError>),

    /// Writing the rendered output failed.
    #[error("failed to write output")]
    Output(#[source] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CheckError>;
