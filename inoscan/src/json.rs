//! Structured dump for downstream tooling.

use chrono::Local;
use inoscanlib::{FileRecord, ProjectSummary, Scan, Warning};
use serde::Serialize;

/// Everything a run produced, in one serializable tree.
#[derive(Debug, Serialize)]
pub struct Dump<'a> {
    /// Analysis timestamp, `%Y-%m-%d %H:%M:%S`
    pub generated_at: String,
    /// The scanned root as given on the command line
    pub root: String,
    /// Project-wide aggregate
    pub summary: &'a ProjectSummary,
    /// All per-file records
    pub files: &'a [FileRecord],
    /// Recoverable problems encountered during the run
    pub warnings: &'a [Warning],
}

/// Render the full dump as pretty-printed JSON.
pub fn render(root: &str, scan: &Scan, summary: &ProjectSummary) -> serde_json::Result<String> {
    let dump = Dump {
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        root: root.to_string(),
        summary,
        files: &scan.records,
        warnings: &scan.warnings,
    };
    serde_json::to_string_pretty(&dump)
}
