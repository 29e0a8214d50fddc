//! # inoscanlib
//!
//! A heuristic source tree inventory for C/C++/Arduino projects. It walks a
//! root directory, classifies each line of every matching file as code,
//! comment or blank, extracts simple lexical facts (function signatures,
//! `#include` targets, `#define` names, TODO/FIXME markers) and aggregates
//! everything into project-wide statistics.
//!
//! ## Overview
//!
//! The pipeline is three stages, run synchronously:
//!
//! 1. **Selection**: walk the root, apply extension/directory/filename
//!    filter rules, yield a sorted list of candidate files.
//! 2. **Classification**: per-line code/comment/blank categorization with
//!    block-comment state, plus regex-based fact extraction and heuristic
//!    complexity metrics.
//! 3. **Aggregation**: fold the per-file records into totals,
//!    distributions, rankings and a merged TODO list.
//!
//! This is a reporting tool, not a static analyzer: there is no AST and no
//! semantic understanding. Extraction rules are best-effort pattern matches
//! kept as isolated predicates so their misfires are easy to characterize.
//!
//! ## Example
//!
//! ```rust
//! use inoscanlib::{scan, summarize, Config};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(
//!     dir.path().join("blink.ino"),
//!     "void setup() {\n  // TODO: pick the pin\n  pinMode(13, OUTPUT);\n}\n",
//! )
//! .unwrap();
//!
//! let config = Config::new();
//! let result = scan(dir.path(), &config).unwrap();
//! let summary = summarize(&result, &config);
//!
//! assert_eq!(summary.total_files, 1);
//! assert_eq!(summary.lines.code, 3);
//! assert_eq!(summary.todos_count, 1);
//! ```

pub mod classify;
pub mod complexity;
pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod scan;
pub mod stats;
pub mod summary;

pub use classify::{classify_lines, Classifier, LineCounts, LineKind};
pub use complexity::{ComplexityAnalyzer, FileComplexity};
pub use config::{Config, ReportLimits};
pub use error::InoscanError;
pub use extract::{has_todo_marker, FactExtractor, TodoEntry};
pub use filter::{discover, Discovery, FileFilter};
pub use scan::{scan, Scan};
pub use stats::{FileRank, FileRecord, ProjectSummary, ProjectTodo, Warning};
pub use summary::summarize;

/// Result type for inoscanlib operations
pub type Result<T> = std::result::Result<T, InoscanError>;
