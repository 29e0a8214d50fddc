//! Core data structures for scan results.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::classify::LineCounts;
use crate::complexity::FileComplexity;
use crate::extract::TodoEntry;

/// Classification and extraction result for one analyzed file.
///
/// Created once during classification, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scan root
    pub path: PathBuf,
    /// Lowercased extension with leading dot (e.g. `.ino`)
    pub extension: String,
    /// File size in bytes
    pub size_bytes: u64,
    /// Last-modified timestamp, `%Y-%m-%d %H:%M:%S`
    pub last_modified: String,
    /// Line counts; `code + comment + blank == total`
    pub lines: LineCounts,
    /// Detected function names, first-occurrence order, deduplicated
    pub functions: Vec<String>,
    /// Include targets, in file order
    pub includes: Vec<String>,
    /// Define names, in file order
    pub defines: Vec<String>,
    /// TODO/FIXME occurrences, in line order
    pub todos: Vec<TodoEntry>,
    /// Heuristic complexity metrics
    pub complexity: FileComplexity,
}

/// A recoverable per-file or per-directory problem.
///
/// Warnings never abort a run; they are collected so the final file count
/// is explainable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Path the problem occurred on
    pub path: PathBuf,
    /// Human-readable description
    pub message: String,
}

impl Warning {
    /// Create a new warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// One entry in the "largest files" ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRank {
    /// Path relative to the scan root
    pub path: PathBuf,
    /// Total line count
    pub total_lines: u64,
}

/// A TODO/FIXME entry merged into the project-wide list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTodo {
    /// Path relative to the scan root
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// Trimmed line text
    pub text: String,
}

/// Aggregate over all `FileRecord`s of a run.
///
/// Built once from the full record set, read-only after construction.
/// Maps are `BTreeMap` so iteration order and serialized output are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Number of analyzed files
    pub total_files: u64,
    /// Project-wide line counts
    pub lines: LineCounts,
    /// Sum of file sizes in bytes
    pub total_size_bytes: u64,
    /// Extension -> number of files
    pub files_by_extension: BTreeMap<String, u64>,
    /// Extension -> total lines
    pub lines_by_extension: BTreeMap<String, u64>,
    /// Total detected functions
    pub functions_count: u64,
    /// Total include directives
    pub includes_count: u64,
    /// Total define directives
    pub defines_count: u64,
    /// Total TODO/FIXME occurrences (uncapped)
    pub todos_count: u64,
    /// Highest per-file cyclomatic complexity
    pub max_complexity: u64,
    /// Mean per-file cyclomatic complexity, rounded to 2 decimals
    pub average_complexity: f64,
    /// All matching project types, sorted; `["unknown"]` when none match
    pub project_types: Vec<String>,
    /// Largest files by total lines, truncated to the configured top-N
    pub top_files: Vec<FileRank>,
    /// Merged TODO list ordered by (path, line), capped for display
    pub todos: Vec<ProjectTodo>,
}
