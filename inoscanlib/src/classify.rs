//! Per-line code/comment/blank classification for C-family sources.
//!
//! The classifier is deliberately heuristic: it tracks block-comment state
//! across lines and skips comment markers inside same-line string literals,
//! but it is not a tokenizer. Each line receives exactly one classification:
//!
//! - whitespace-only lines are blank
//! - a line that starts inside a `/* ... */` block is a comment, even when
//!   the block closes mid-line and code follows the `*/`
//! - a line whose first non-whitespace content is `//` or `/*` is a comment
//! - everything else is code, even when a `/*` opens later on the line
//!
//! The last two rules together fix the mixed-line policy: the first
//! significant content wins, and block-comment state is updated regardless
//! of how the line was classified.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Classification of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    /// Executable/declarative content
    Code,
    /// Line or block comment
    Comment,
    /// Whitespace only
    Blank,
}

/// Line counts for one file or one whole project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
    /// All lines
    pub total: u64,
    /// Code lines
    pub code: u64,
    /// Comment lines
    pub comment: u64,
    /// Blank lines
    pub blank: u64,
}

impl LineCounts {
    /// Create new all-zero counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a sequence of line classifications.
    pub fn tally(kinds: &[LineKind]) -> Self {
        let mut counts = Self::new();
        for kind in kinds {
            counts.total += 1;
            match kind {
                LineKind::Code => counts.code += 1,
                LineKind::Comment => counts.comment += 1,
                LineKind::Blank => counts.blank += 1,
            }
        }
        counts
    }
}

impl Add for LineCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            code: self.code + other.code,
            comment: self.comment + other.comment,
            blank: self.blank + other.blank,
        }
    }
}

impl AddAssign for LineCounts {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.code += other.code;
        self.comment += other.comment;
        self.blank += other.blank;
    }
}

/// First significant content seen on a line, outside block comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FirstContent {
    None,
    Code,
    Comment,
}

/// Stateful line classifier.
///
/// Feed it lines in file order; it carries block-comment state between
/// calls. One classifier instance per file.
#[derive(Debug, Default)]
pub struct Classifier {
    in_block: bool,
}

impl Classifier {
    /// Create a classifier with no open block comment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one line and advance the block-comment state.
    pub fn classify(&mut self, line: &str) -> LineKind {
        let started_in_block = self.in_block;
        let first = self.scan(line);

        if started_in_block {
            // Single classification per line: trailing content past `*/`
            // stays part of the comment line.
            return LineKind::Comment;
        }
        match first {
            FirstContent::None => LineKind::Blank,
            FirstContent::Comment => LineKind::Comment,
            FirstContent::Code => LineKind::Code,
        }
    }

    /// Walk the line once, updating block-comment state and reporting the
    /// first significant content. String literals are skipped so markers
    /// inside them do not open or close comments; a `//` outside a string
    /// ends marker scanning for the line.
    fn scan(&mut self, line: &str) -> FirstContent {
        let bytes = line.as_bytes();
        let mut first = FirstContent::None;
        let mut in_string: Option<u8> = None;
        let mut i = 0;

        while i < bytes.len() {
            let b = bytes[i];

            if self.in_block {
                if b == b'*' && bytes.get(i + 1) == Some(&b'/') {
                    self.in_block = false;
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }

            if let Some(quote) = in_string {
                if b == b'\\' {
                    i += 2;
                    continue;
                }
                if b == quote {
                    in_string = None;
                }
                i += 1;
                continue;
            }

            match b {
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    if first == FirstContent::None {
                        first = FirstContent::Comment;
                    }
                    // Rest of the line is commented out
                    return first;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    if first == FirstContent::None {
                        first = FirstContent::Comment;
                    }
                    self.in_block = true;
                    i += 2;
                }
                b'"' | b'\'' => {
                    if first == FirstContent::None {
                        first = FirstContent::Code;
                    }
                    in_string = Some(b);
                    i += 1;
                }
                _ => {
                    if first == FirstContent::None && !b.is_ascii_whitespace() {
                        first = FirstContent::Code;
                    }
                    i += 1;
                }
            }
        }
        first
    }
}

/// Classify every line of a file's text.
pub fn classify_lines(text: &str) -> Vec<LineKind> {
    let mut classifier = Classifier::new();
    text.lines().map(|line| classifier.classify(line)).collect()
}
