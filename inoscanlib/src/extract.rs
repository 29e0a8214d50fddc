//! Heuristic lexical fact extraction.
//!
//! These are pattern matches over single lines, not parser-grade facts.
//! Each predicate is independent so false positives and negatives are easy
//! to characterize in isolation.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Identifiers that look like `name(...) {` but are control flow.
const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "else", "return"];

/// A TODO/FIXME occurrence within a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoEntry {
    /// 1-based line number
    pub line: usize,
    /// Trimmed line text
    pub text: String,
}

/// Pre-compiled extraction patterns, shared across all files of a run.
pub struct FactExtractor {
    typed_fn: Regex,
    untyped_fn: Regex,
    include: Regex,
    define: Regex,
}

impl Default for FactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FactExtractor {
    /// Compile the extraction patterns.
    pub fn new() -> Self {
        Self {
            typed_fn: Regex::new(
                r"\b(?:void|int|float|double|bool|char|String|byte|word|long|short|unsigned)\s+([A-Za-z_][A-Za-z0-9_]*)\s*\([^)]*\)\s*\{",
            )
            .expect("invalid typed function pattern"),
            untyped_fn: Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*\([^)]*\)\s*\{")
                .expect("invalid untyped function pattern"),
            include: Regex::new(r#"#include\s*[<"]([^>"]+)[>"]"#)
                .expect("invalid include pattern"),
            define: Regex::new(r"#define\s+([A-Za-z_][A-Za-z0-9_]*)")
                .expect("invalid define pattern"),
        }
    }

    /// Function names defined on this code line.
    ///
    /// Two shapes are recognized: a known C/Arduino return type followed by
    /// an identifier and a parameter list ending in `{`, and the bare
    /// `name(...) {` shape (constructors and user-typed returns). Control
    /// keywords are never functions.
    pub fn functions<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let mut names = Vec::new();
        for caps in self.typed_fn.captures_iter(line) {
            if let Some(name) = caps.get(1) {
                push_function(&mut names, name.as_str());
            }
        }
        for caps in self.untyped_fn.captures_iter(line) {
            if let Some(name) = caps.get(1) {
                push_function(&mut names, name.as_str());
            }
        }
        names
    }

    /// The target of an `#include <...>` or `#include "..."` directive.
    pub fn include<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.include
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// The NAME of a `#define NAME ...` directive.
    pub fn define<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.define
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

fn push_function<'a>(names: &mut Vec<&'a str>, name: &'a str) {
    if CONTROL_KEYWORDS.contains(&name) || names.contains(&name) {
        return;
    }
    names.push(name);
}

/// Whether a line carries a TODO/FIXME marker (case-insensitive substring).
pub fn has_todo_marker(line: &str) -> bool {
    let lowered = line.to_ascii_lowercase();
    lowered.contains("todo") || lowered.contains("fixme")
}
