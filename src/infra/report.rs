// ============================================================
// Layer 6 — Results Report
// ============================================================
// Appends answered questions to a CSV file so batch runs leave
// a record that opens in any spreadsheet.
//
// Columns:
//   question, answer, confidence, content_type, status
//
// The header is written only when the file is new, so several
// runs can append to the same report.
//
// Example:
//   question,answer,confidence,content_type,status
//   "What was revenue in 2022?",120,0.916667,table,confident
//   "Who signed it?",No answer found,0.000000,text,not_found

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use crate::domain::answer::QueryResult;

const HEADER: &str = "question,answer,confidence,content_type,status";

pub struct ResultsReport {
    csv_path: PathBuf,
}

impl ResultsReport {
    /// Open (or create) the report, writing the header for a new file.
    pub fn new(csv_path: impl Into<PathBuf>) -> Result<Self> {
        let csv_path = csv_path.into();

        if let Some(parent) = csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create report '{}'", csv_path.display()))?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created results report '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one row per result
    pub fn append(&self, results: &[QueryResult]) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open report '{}'", self.csv_path.display()))?;

        for r in results {
            writeln!(
                f,
                "{},{},{:.6},{},{}",
                csv_field(&r.question),
                csv_field(&r.answer),
                r.confidence,
                r.content_type,
                r.status.as_str(),
            )?;
        }

        tracing::info!("Wrote {} results to '{}'", results.len(), self.csv_path.display());
        Ok(())
    }
}

/// Quote a field when it holds a delimiter, quote, or newline
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
