//! Project-wide aggregation over file records.

use crate::config::Config;
use crate::scan::Scan;
use crate::stats::{FileRank, ProjectSummary, ProjectTodo};

/// Fold the scan's records into a `ProjectSummary`.
///
/// Record order is irrelevant: rankings and the merged TODO list are sorted
/// here, so output is deterministic even if a future implementation
/// classifies files in parallel. Takes the whole `Scan` rather than bare
/// records because filename-marker project types (e.g. `platformio.ini`)
/// are detected from walk sightings, not from records.
pub fn summarize(scan: &Scan, config: &Config) -> ProjectSummary {
    let mut summary = ProjectSummary::default();

    for record in &scan.records {
        summary.total_files += 1;
        summary.lines += record.lines;
        summary.total_size_bytes += record.size_bytes;
        *summary
            .files_by_extension
            .entry(record.extension.clone())
            .or_insert(0) += 1;
        *summary
            .lines_by_extension
            .entry(record.extension.clone())
            .or_insert(0) += record.lines.total;
        summary.functions_count += record.functions.len() as u64;
        summary.includes_count += record.includes.len() as u64;
        summary.defines_count += record.defines.len() as u64;
        summary.todos_count += record.todos.len() as u64;
    }

    if !scan.records.is_empty() {
        summary.max_complexity = scan
            .records
            .iter()
            .map(|r| r.complexity.cyclomatic)
            .max()
            .unwrap_or(0);
        let total: u64 = scan.records.iter().map(|r| r.complexity.cyclomatic).sum();
        let mean = total as f64 / scan.records.len() as f64;
        summary.average_complexity = (mean * 100.0).round() / 100.0;
    }

    summary.project_types = detect_project_types(scan, config);
    summary.top_files = rank_files(scan, config.report.top_files);
    summary.todos = merge_todos(scan, config.report.max_todos);

    summary
}

/// All project types whose indicators are present, sorted by name.
///
/// An indicator starting with `.` matches when any record has that
/// extension; any other indicator matches a marker filename sighted during
/// the walk. A tree with both a `.ino` file and a `platformio.ini` is both
/// arduino and platformio. No match yields `["unknown"]`.
fn detect_project_types(scan: &Scan, config: &Config) -> Vec<String> {
    let mut types: Vec<String> = config
        .project_types
        .iter()
        .filter(|(_, indicators)| {
            indicators.iter().any(|indicator| {
                if indicator.starts_with('.') {
                    scan.records
                        .iter()
                        .any(|r| r.extension.eq_ignore_ascii_case(indicator))
                } else {
                    scan.markers.contains(indicator)
                }
            })
        })
        .map(|(name, _)| name.clone())
        .collect();

    if types.is_empty() {
        types.push("unknown".to_string());
    }
    types
}

/// Files ranked descending by total lines, ties broken by path, truncated
/// to `top_n`. The full record list stays available for tabular display.
fn rank_files(scan: &Scan, top_n: usize) -> Vec<FileRank> {
    let mut ranked: Vec<FileRank> = scan
        .records
        .iter()
        .map(|r| FileRank {
            path: r.path.clone(),
            total_lines: r.lines.total,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.total_lines
            .cmp(&a.total_lines)
            .then_with(|| a.path.cmp(&b.path))
    });
    ranked.truncate(top_n);
    ranked
}

/// All TODO entries merged across files, ordered by (path, line), capped at
/// `max_todos` for display. The uncapped count lives in `todos_count`.
fn merge_todos(scan: &Scan, max_todos: usize) -> Vec<ProjectTodo> {
    let mut todos: Vec<ProjectTodo> = scan
        .records
        .iter()
        .flat_map(|record| {
            record.todos.iter().map(|todo| ProjectTodo {
                path: record.path.clone(),
                line: todo.line,
                text: todo.text.clone(),
            })
        })
        .collect();

    todos.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.line.cmp(&b.line)));
    todos.truncate(max_todos);
    todos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_totals_equal_per_file_sums() {
        let temp = tempdir().unwrap();
        write(
            &temp.path().join("a.cpp"),
            "int a;\n// c\n\nint b;\n",
        );
        write(&temp.path().join("b.h"), "/* x */\nint c;\n");

        let config = Config::new();
        let result = scan(temp.path(), &config).unwrap();
        let summary = summarize(&result, &config);

        let sum_total: u64 = result.records.iter().map(|r| r.lines.total).sum();
        let sum_code: u64 = result.records.iter().map(|r| r.lines.code).sum();
        let sum_size: u64 = result.records.iter().map(|r| r.size_bytes).sum();

        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.lines.total, sum_total);
        assert_eq!(summary.lines.code, sum_code);
        assert_eq!(summary.total_size_bytes, sum_size);
        assert_eq!(
            summary.lines.code + summary.lines.comment + summary.lines.blank,
            summary.lines.total
        );
    }

    #[test]
    fn test_extension_maps() {
        let temp = tempdir().unwrap();
        write(&temp.path().join("a.cpp"), "int a;\nint b;\n");
        write(&temp.path().join("b.cpp"), "int c;\n");
        write(&temp.path().join("c.h"), "int d;\n");

        let config = Config::new();
        let result = scan(temp.path(), &config).unwrap();
        let summary = summarize(&result, &config);

        assert_eq!(summary.files_by_extension[".cpp"], 2);
        assert_eq!(summary.files_by_extension[".h"], 1);
        assert_eq!(summary.lines_by_extension[".cpp"], 3);
        assert_eq!(summary.lines_by_extension[".h"], 1);
    }

    #[test]
    fn test_top_files_ranking() {
        let temp = tempdir().unwrap();
        write(&temp.path().join("small.cpp"), "int a;\n");
        write(&temp.path().join("big.cpp"), "int a;\nint b;\nint c;\n");
        write(&temp.path().join("mid.cpp"), "int a;\nint b;\n");

        let mut config = Config::new();
        config.report.top_files = 2;
        let result = scan(temp.path(), &config).unwrap();
        let summary = summarize(&result, &config);

        assert_eq!(summary.top_files.len(), 2);
        assert_eq!(summary.top_files[0].path, PathBuf::from("big.cpp"));
        assert_eq!(summary.top_files[0].total_lines, 3);
        assert_eq!(summary.top_files[1].path, PathBuf::from("mid.cpp"));
        // Full list still present on the scan
        assert_eq!(result.records.len(), 3);
    }

    #[test]
    fn test_todos_merged_ordered_and_capped() {
        let temp = tempdir().unwrap();
        write(
            &temp.path().join("z.cpp"),
            "// TODO: last file\n",
        );
        write(
            &temp.path().join("a.cpp"),
            "int x;\n// FIXME: second\n// todo: third\n",
        );

        let mut config = Config::new();
        config.report.max_todos = 2;
        let result = scan(temp.path(), &config).unwrap();
        let summary = summarize(&result, &config);

        // Count is uncapped, display list is capped
        assert_eq!(summary.todos_count, 3);
        assert_eq!(summary.todos.len(), 2);
        // Ordered by path then line
        assert_eq!(summary.todos[0].path, PathBuf::from("a.cpp"));
        assert_eq!(summary.todos[0].line, 2);
        assert_eq!(summary.todos[1].path, PathBuf::from("a.cpp"));
        assert_eq!(summary.todos[1].line, 3);
    }

    #[test]
    fn test_complexity_aggregates() {
        let temp = tempdir().unwrap();
        write(&temp.path().join("plain.cpp"), "int x;\n");
        write(
            &temp.path().join("branchy.cpp"),
            "void run() {\n  if (a) {\n  }\n  if (b) {\n  }\n}\n",
        );

        let config = Config::new();
        let result = scan(temp.path(), &config).unwrap();
        let summary = summarize(&result, &config);

        // plain = 1, branchy = 3
        assert_eq!(summary.max_complexity, 3);
        assert_eq!(summary.average_complexity, 2.0);
    }

    #[test]
    fn test_project_type_detection_reports_all_matches() {
        let temp = tempdir().unwrap();
        write(&temp.path().join("sketch.ino"), "void setup() {}\n");
        write(&temp.path().join("platformio.ini"), "[env]\n");

        let config = Config::new();
        let result = scan(temp.path(), &config).unwrap();
        let summary = summarize(&result, &config);

        assert_eq!(summary.project_types, vec!["arduino", "platformio"]);
    }

    #[test]
    fn test_project_type_unknown_when_nothing_matches() {
        let temp = tempdir().unwrap();
        write(&temp.path().join("main.cpp"), "int main() { return 0; }\n");

        let config = Config::new();
        let result = scan(temp.path(), &config).unwrap();
        let summary = summarize(&result, &config);

        assert_eq!(summary.project_types, vec!["unknown"]);
    }

    #[test]
    fn test_empty_tree_yields_zero_summary() {
        let temp = tempdir().unwrap();

        let config = Config::new();
        let result = scan(temp.path(), &config).unwrap();
        let summary = summarize(&result, &config);

        assert_eq!(summary.total_files, 0);
        assert_eq!(summary.lines.total, 0);
        assert!(summary.files_by_extension.is_empty());
        assert!(summary.top_files.is_empty());
        assert_eq!(summary.project_types, vec!["unknown"]);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let temp = tempdir().unwrap();
        write(&temp.path().join("a.cpp"), "int a; // TODO: x\n");
        write(&temp.path().join("sub/b.ino"), "void setup() {\n}\n");

        let config = Config::new();
        let first = summarize(&scan(temp.path(), &config).unwrap(), &config);
        let second = summarize(&scan(temp.path(), &config).unwrap(), &config);

        let a = serde_json::to_string(&first).unwrap();
        let b = serde_json::to_string(&second).unwrap();
        assert_eq!(a, b);
    }
}
