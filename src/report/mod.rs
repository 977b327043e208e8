//! # Report Module
//!
//! @title SARIF Report Model
//!
//! Decodes the subset of SARIF that the CodeQL `database analyze` step writes
//! and that the renderer needs: per result, the message text and the physical
//! location of each reported span. Every other SARIF property is ignored, so
//! newer report versions keep decoding.
//!
//! ## Key Types
//!
//! - [`AnalysisReport`] - Decoded SARIF document
//! - [`Finding`] - One (result, location) pair, flattened for rendering
//! - [`FindingSummary`] - Counts of findings by severity

mod finding;

pub use finding::{Finding, Severity};

use crate::error::Result;
use colored::*;
use serde::{Deserialize, Deserializer, Serialize};

/// Decoded SARIF document.
///
/// Runs keep the order in which the engine wrote them. A document without a
/// `runs` key decodes to an empty report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisReport {
    #[serde(deserialize_with = "null_as_default")]
    pub runs: Vec<Run>,
}

/// One analysis run inside the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Run {
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<SarifResult>,
}

/// A single query result.
///
/// A result without locations has nothing to annotate and produces no
/// findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SarifResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    pub message: Message,

    #[serde(deserialize_with = "null_as_default")]
    pub locations: Vec<Location>,
}

/// Result message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    pub physical_location: PhysicalLocation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhysicalLocation {
    pub artifact_location: ArtifactLocation,
    pub region: Region,
}

/// File reference. The URI is kept verbatim; it is neither resolved nor
/// validated while decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactLocation {
    pub uri: String,
}

/// Source span. Lines are 1-based; a start column of 0 means unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Region {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
}

impl AnalysisReport {
    /// Decodes a report from the raw bytes of a SARIF file.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Decode`](crate::CheckError::Decode) when the
    /// bytes are not valid JSON or a known field has the wrong shape.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Flattens runs, results, and locations into findings, in report order.
    pub fn findings(&self) -> Vec<Finding> {
        self.runs
            .iter()
            .flat_map(|run| run.results.iter())
            .flat_map(|result| {
                let severity = result
                    .level
                    .as_deref()
                    .map(Severity::from_level)
                    .unwrap_or_default();

                result.locations.iter().map(move |location| {
                    let physical = &location.physical_location;
                    Finding {
                        rule: result.rule_id.clone(),
                        message: result.message.text.clone(),
                        file: physical.artifact_location.uri.clone(),
                        line: physical.region.start_line,
                        column: physical.region.start_column,
                        severity,
                    }
                })
            })
            .collect()
    }

    /// Total number of results across all runs, located or not.
    pub fn result_count(&self) -> usize {
        self.runs.iter().map(|run| run.results.len()).sum()
    }
}

/// Summary of findings by severity level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingSummary {
    pub error: usize,
    pub warning: usize,
    pub note: usize,
    pub none: usize,
    pub total: usize,
}

impl FindingSummary {
    /// Creates a summary from a collection of findings.
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = FindingSummary {
            total: findings.len(),
            ..Default::default()
        };

        for finding in findings {
            match finding.severity {
                Severity::Error => summary.error += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Note => summary.note += 1,
                Severity::None => summary.none += 1,
            }
        }

        summary
    }

    /// Prints summary statistics to the terminal.
    pub fn print(&self) {
        println!(
            "{}",
            format!(
                "[*] Summary: {} error | {} warning | {} note | {} none",
                self.error, self.warning, self.note, self.none
            )
            .bold()
        );

        if self.total == 0 {
            println!("{}", "[+] No findings reported.".green().bold());
        } else {
            let message = format!("[!] Total: {} finding(s)", self.total);
            if self.error > 0 {
                println!("{}", message.red().bold());
            } else {
                println!("{}", message.yellow().bold());
            }
        }
    }
}

/// Treats an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
