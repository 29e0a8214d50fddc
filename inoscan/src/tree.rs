//! Plain-text tree view of the scanned files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use inoscanlib::FileRecord;

/// Render the scanned files as an indented directory tree.
///
/// Records are grouped by parent directory; directories and files both come
/// out in sorted order, so the view is stable across runs.
pub fn render(root_name: &str, records: &[FileRecord]) -> String {
    if records.is_empty() {
        return "no files found".to_string();
    }

    let mut by_dir: BTreeMap<PathBuf, Vec<&FileRecord>> = BTreeMap::new();
    for record in records {
        let dir = record
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        by_dir.entry(dir).or_default().push(record);
    }

    let mut out = Vec::new();
    out.push(format!("{root_name}/"));

    for (dir, files) in &by_dir {
        let depth = dir.components().count();
        if depth > 0 {
            let indent = "  ".repeat(depth);
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            out.push(format!("{indent}{name}/"));
        }

        let mut sorted: Vec<&FileRecord> = files.to_vec();
        sorted.sort_by(|a, b| a.path.cmp(&b.path));
        for record in sorted {
            let indent = "  ".repeat(depth + 1);
            let name = record
                .path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            out.push(format!(
                "{indent}{name} ({} lines, {} code)",
                record.lines.total, record.lines.code
            ));
        }
    }

    out.join("\n")
}
