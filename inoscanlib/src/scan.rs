//! High-level scan entry point.
//!
//! `scan` walks the root, classifies each candidate file and returns the
//! per-file records plus the run's warnings. Files are processed one at a
//! time; only the derived `FileRecord`s are retained, so peak memory is
//! proportional to file count, not total source size.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::classify::{classify_lines, LineCounts, LineKind};
use crate::complexity::ComplexityAnalyzer;
use crate::config::Config;
use crate::error::InoscanError;
use crate::extract::{has_todo_marker, FactExtractor, TodoEntry};
use crate::filter::{discover, normalized_extension};
use crate::stats::{FileRecord, Warning};
use crate::Result;

/// How many leading bytes are inspected for the binary heuristic.
const BINARY_SNIFF_LEN: usize = 8192;

/// The complete output of one scan run.
#[derive(Debug, Default)]
pub struct Scan {
    /// The scanned root
    pub root: PathBuf,
    /// One record per analyzed file, in sorted path order
    pub records: Vec<FileRecord>,
    /// Project-type marker filenames sighted during the walk
    pub markers: BTreeSet<String>,
    /// Recoverable problems encountered along the way
    pub warnings: Vec<Warning>,
}

/// Scan a source tree.
///
/// Fatal errors (missing root, invalid config globs) surface immediately;
/// per-file problems (unreadable or binary files) become warnings and the
/// scan continues.
///
/// # Example
///
/// ```rust,ignore
/// use inoscanlib::{scan, summarize, Config};
///
/// let config = Config::new();
/// let result = scan("firmware/", &config)?;
/// let summary = summarize(&result, &config);
/// println!("{} files, {} lines", summary.total_files, summary.lines.total);
/// ```
pub fn scan(root: impl AsRef<Path>, config: &Config) -> Result<Scan> {
    let root = root.as_ref();
    let discovery = discover(root, config)?;

    let extractor = FactExtractor::new();
    let analyzer = ComplexityAnalyzer::new();
    let mut records = Vec::new();
    let mut warnings = discovery.warnings;

    for path in discovery.files {
        match scan_file(&path, root, &extractor, &analyzer) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => warnings.push(Warning::new(path, "skipped: binary content")),
            Err(e) => warnings.push(Warning::new(path, e.to_string())),
        }
    }

    Ok(Scan {
        root: root.to_path_buf(),
        records,
        markers: discovery.markers,
        warnings,
    })
}

/// Classify one file and extract its lexical facts.
///
/// Returns `Ok(None)` when the file looks binary (NUL byte in the leading
/// bytes); undecodable sequences in text files are replaced, not fatal.
fn scan_file(
    path: &Path,
    root: &Path,
    extractor: &FactExtractor,
    analyzer: &ComplexityAnalyzer,
) -> Result<Option<FileRecord>> {
    let metadata = fs::metadata(path).map_err(|e| InoscanError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let bytes = fs::read(path).map_err(|e| InoscanError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let sniff = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    if sniff.contains(&0) {
        return Ok(None);
    }
    let text = String::from_utf8_lossy(&bytes);

    let kinds = classify_lines(&text);
    let lines = LineCounts::tally(&kinds);
    let complexity = analyzer.analyze(&text);

    let mut functions: Vec<String> = Vec::new();
    let mut includes = Vec::new();
    let mut defines = Vec::new();
    let mut todos = Vec::new();

    for (idx, (line, kind)) in text.lines().zip(kinds.iter()).enumerate() {
        if *kind == LineKind::Code {
            for name in extractor.functions(line) {
                if !functions.iter().any(|f| f == name) {
                    functions.push(name.to_string());
                }
            }
            if let Some(target) = extractor.include(line) {
                includes.push(target.to_string());
            }
            if let Some(name) = extractor.define(line) {
                defines.push(name.to_string());
            }
        }
        if has_todo_marker(line) {
            todos.push(TodoEntry {
                line: idx + 1,
                text: line.trim().to_string(),
            });
        }
    }

    let last_modified = metadata
        .modified()
        .map(|t| {
            DateTime::<Local>::from(t)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_default();

    let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    let extension = normalized_extension(path).unwrap_or_default();

    Ok(Some(FileRecord {
        path: relative,
        extension,
        size_bytes: metadata.len(),
        last_modified,
        lines,
        functions,
        includes,
        defines,
        todos,
        complexity,
    }))
}
