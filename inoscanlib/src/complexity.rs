//! Heuristic complexity metrics.
//!
//! Cyclomatic complexity is approximated by counting decision points
//! (branches, loops, `case` labels, ternaries) in comment- and
//! string-stripped text: file complexity is 1 plus the file's decision
//! points, and each detected function body gets the same treatment.
//! Nesting depth is the maximum brace depth. Like the fact extractors,
//! these are pattern matches, not parser-grade analysis.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Complexity metrics for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FileComplexity {
    /// 1 + decision points across the whole file
    pub cyclomatic: u64,
    /// Highest per-function complexity, 0 when no function was detected
    pub max_function: u64,
    /// Mean per-function complexity rounded to 2 decimals, 0 when none
    pub average_function: f64,
    /// Maximum brace nesting depth
    pub nesting_depth: u64,
}

/// Pre-compiled complexity patterns, shared across all files of a run.
pub struct ComplexityAnalyzer {
    control: Vec<Regex>,
    function_start: Regex,
    double_quoted: Regex,
    single_quoted: Regex,
    line_comment: Regex,
}

impl Default for ComplexityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplexityAnalyzer {
    /// Compile the decision-point and stripping patterns.
    pub fn new() -> Self {
        let control = [
            r"\bif\s*\(",
            r"\bwhile\s*\(",
            r"\bfor\s*\(",
            r"\bdo\s*\{",
            r"\bswitch\s*\(",
            r"\bcase\s+",
            r"\bcatch\s*\(",
            r"\?[^:\n]*:",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("invalid control pattern"))
        .collect();

        Self {
            control,
            function_start: Regex::new(
                r"\b(?:void|int|float|double|bool|char|String|byte|word|long|short|unsigned)\s+[A-Za-z_][A-Za-z0-9_]*\s*\([^)]*\)\s*\{",
            )
            .expect("invalid function start pattern"),
            double_quoted: Regex::new(r#""(?:[^"\\]|\\.)*""#)
                .expect("invalid double-quoted string pattern"),
            single_quoted: Regex::new(r"'(?:[^'\\]|\\.)*'")
                .expect("invalid single-quoted string pattern"),
            line_comment: Regex::new(r"//.*").expect("invalid line comment pattern"),
        }
    }

    /// Compute the complexity metrics of one file's text.
    pub fn analyze(&self, text: &str) -> FileComplexity {
        let stripped = self.strip(text);
        let cyclomatic = 1 + self.decision_points(&stripped);
        let nesting_depth = max_brace_depth(&stripped);

        let mut functions: Vec<u64> = Vec::new();
        let mut body = String::new();
        let mut depth: i64 = 0;
        let mut in_function = false;

        for line in stripped.lines() {
            if !in_function {
                if !self.function_start.is_match(line) {
                    continue;
                }
                in_function = true;
                body.clear();
                depth = 0;
            }
            body.push_str(line);
            body.push('\n');
            depth += brace_balance(line);
            if depth <= 0 {
                functions.push(1 + self.decision_points(&body));
                in_function = false;
            }
        }

        let max_function = functions.iter().copied().max().unwrap_or(0);
        let average_function = if functions.is_empty() {
            0.0
        } else {
            let mean = functions.iter().sum::<u64>() as f64 / functions.len() as f64;
            (mean * 100.0).round() / 100.0
        };

        FileComplexity {
            cyclomatic,
            max_function,
            average_function,
            nesting_depth,
        }
    }

    /// Blank out string literals and remove comments so decision-point
    /// patterns never match inside them.
    fn strip(&self, text: &str) -> String {
        let text = self.double_quoted.replace_all(text, "\"\"");
        let text = self.single_quoted.replace_all(&text, "''");
        let mut text = self.line_comment.replace_all(&text, "").into_owned();

        while let Some(start) = text.find("/*") {
            match text[start + 2..].find("*/") {
                Some(end) => text.replace_range(start..start + 2 + end + 2, ""),
                None => {
                    // Unterminated block: the rest of the file is comment
                    text.truncate(start);
                    break;
                }
            }
        }
        text
    }

    fn decision_points(&self, text: &str) -> u64 {
        self.control
            .iter()
            .map(|p| p.find_iter(text).count() as u64)
            .sum()
    }
}

fn brace_balance(line: &str) -> i64 {
    let mut balance = 0;
    for b in line.bytes() {
        match b {
            b'{' => balance += 1,
            b'}' => balance -= 1,
            _ => {}
        }
    }
    balance
}

fn max_brace_depth(text: &str) -> u64 {
    let mut max: i64 = 0;
    let mut current: i64 = 0;
    for b in text.bytes() {
        match b {
            b'{' => {
                current += 1;
                max = max.max(current);
            }
            b'}' => current = (current - 1).max(0),
            _ => {}
        }
    }
    max as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_line_code_is_complexity_one() {
        let analyzer = ComplexityAnalyzer::new();
        let metrics = analyzer.analyze("int x = 1;\nint y = 2;\n");
        assert_eq!(metrics.cyclomatic, 1);
        assert_eq!(metrics.nesting_depth, 0);
    }

    #[test]
    fn test_decision_points_counted() {
        let analyzer = ComplexityAnalyzer::new();
        let text = "\
void setup() {
  if (x > 0) {
    y = 1;
  }
  for (int i = 0; i < 10; i++) {
    z += i;
  }
  while (busy()) {
  }
}
";
        // if + for + while = 3 decision points
        assert_eq!(analyzer.analyze(text).cyclomatic, 4);
    }

    #[test]
    fn test_switch_cases_and_ternary() {
        let analyzer = ComplexityAnalyzer::new();
        let text = "\
void loop() {
  switch (mode) {
    case 1: a(); break;
    case 2: b(); break;
  }
  int v = ok ? 1 : 0;
}
";
        // switch + 2 cases + ternary = 4
        assert_eq!(analyzer.analyze(text).cyclomatic, 5);
    }

    #[test]
    fn test_keywords_in_comments_and_strings_ignored() {
        let analyzer = ComplexityAnalyzer::new();
        let text = "\
// if (fake) { while (also fake) }
/* for (another fake) */
const char* s = \"if (string fake)\";
int x = 1;
";
        assert_eq!(analyzer.analyze(text).cyclomatic, 1);
    }

    #[test]
    fn test_nesting_depth() {
        let analyzer = ComplexityAnalyzer::new();
        let text = "\
void run() {
  if (a) {
    if (b) {
      go();
    }
  }
}
";
        assert_eq!(analyzer.analyze(text).nesting_depth, 3);
    }

    #[test]
    fn test_per_function_metrics() {
        let analyzer = ComplexityAnalyzer::new();
        let text = "\
void simple() {
  x = 1;
}

void branchy() {
  if (a) {
    y = 1;
  }
  if (b) {
    y = 2;
  }
}
";
        let metrics = analyzer.analyze(text);
        // simple = 1, branchy = 3
        assert_eq!(metrics.max_function, 3);
        assert_eq!(metrics.average_function, 2.0);
    }

    #[test]
    fn test_no_functions_yields_zero_function_metrics() {
        let analyzer = ComplexityAnalyzer::new();
        let metrics = analyzer.analyze("int x;\nif (x) { x = 0; }\n");
        assert_eq!(metrics.max_function, 0);
        assert_eq!(metrics.average_function, 0.0);
        // File-level count is unaffected
        assert_eq!(metrics.cyclomatic, 2);
    }

    #[test]
    fn test_average_rounded_to_two_decimals() {
        let analyzer = ComplexityAnalyzer::new();
        let text = "\
void a() {
  if (x) {}
}
void b() {
  x = 1;
}
void c() {
  x = 2;
}
";
        // complexities 2, 1, 1 -> mean 1.3333 -> 1.33
        assert_eq!(analyzer.analyze(text).average_function, 1.33);
    }

    #[test]
    fn test_unterminated_block_comment_discards_rest() {
        let analyzer = ComplexityAnalyzer::new();
        let text = "int x;\n/* open\nif (a) { b(); }\n";
        assert_eq!(analyzer.analyze(text).cyclomatic, 1);
    }
}
