//! # Finding and Severity Definitions
//!
//! @title Flattened Finding Data Structures
//!
//! A [`Finding`] is one (result, location) pair from a SARIF report, which is
//! exactly the unit the renderer annotates.

use serde::{Deserialize, Serialize};

/// Severity level taken from the SARIF `level` property.
///
/// Ordered from lowest to highest severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// `none`: the result carries no severity.
    None = 0,

    /// `note`: informational.
    Note = 1,

    /// `warning`: the SARIF default when `level` is absent.
    #[default]
    Warning = 2,

    /// `error`: a serious problem.
    Error = 3,
}

impl Severity {
    /// Parses a SARIF level string.
    ///
    /// Unknown values fall back to [`Severity::Warning`], the level SARIF
    /// consumers assume when none is given.
    pub fn from_level(level: &str) -> Self {
        match level.to_lowercase().as_str() {
            "error" => Severity::Error,
            "note" => Severity::Note,
            "none" => Severity::None,
            _ => Severity::Warning,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
            Severity::None => write!(f, "none"),
        }
    }
}

/// A single annotated location reported by the analysis engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Query identifier (`ruleId`), when the engine reported one.
    pub rule: Option<String>,

    /// Free-text message of the result.
    pub message: String,

    /// File URI exactly as the engine wrote it.
    pub file: String,

    /// 1-based start line.
    pub line: usize,

    /// Start column, 0 when unspecified.
    pub column: usize,

    /// Severity classification.
    pub severity: Severity,
}
