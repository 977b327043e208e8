//! # Render Module
//!
//! @title Finding Renderer
//!
//! Prints each finding as a three-line annotated diagnostic:
//!
//! ```text
//! foo.go:3:5: unused variable
//!   3: x := 1
//!      ^
//! ```
//!
//! The caret line is `column` spaces followed by `^`. The column is the
//! engine-reported value used as-is, without clamping to the source line.

mod source;

pub use source::read_specific_line;

use crate::error::{CheckError, Result};
use crate::report::{AnalysisReport, Finding};
use colored::*;
use std::io::Write;
use std::path::Path;

/// Writes annotated findings to an output stream.
pub struct Renderer<W: Write> {
    out: W,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Renders every finding in `report`, in run, result, location order.
    ///
    /// Stops at the first source line that cannot be read; findings already
    /// written stay written.
    ///
    /// # Returns
    ///
    /// The findings that were rendered.
    pub fn render(&mut self, report: &AnalysisReport) -> Result<Vec<Finding>> {
        let findings = report.findings();

        for finding in &findings {
            self.render_finding(finding)?;
        }

        self.out.flush().map_err(CheckError::Output)?;
        Ok(findings)
    }

    /// Renders a single finding.
    pub fn render_finding(&mut self, finding: &Finding) -> Result<()> {
        let code = read_specific_line(Path::new(&finding.file), finding.line)
            .map_err(|e| CheckError::RenderRead(Box::new(e)))?;

        self.write_block(finding, &code).map_err(CheckError::Output)
    }

    fn write_block(&mut self, finding: &Finding, code: &str) -> std::io::Result<()> {
        writeln!(
            self.out,
            "{}:{}:{}: {}",
            finding.file,
            finding.line,
            finding.column,
            finding.message.red()
        )?;
        writeln!(self.out, "  {}: {}", finding.line, code)?;
        writeln!(self.out, "{}{}", " ".repeat(finding.column), "^".yellow())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
