//! Self-contained HTML report.
//!
//! The report embeds the run's data as JSON and renders charts client-side
//! with Chart.js: top-N files by lines, file-type distribution, and the
//! code/comment/blank split. Rendering is plain token substitution over a
//! compile-time template.

use chrono::Local;
use inoscanlib::{ProjectSummary, Scan};
use serde::Serialize;

use crate::term::format_size;
use crate::tree;

const TEMPLATE: &str = include_str!("../templates/report.html");

/// Escape text placed into HTML element content or attributes.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Serialize a value for embedding inside a `<script>` block.
///
/// `</` must not appear verbatim or a `</script` inside a TODO text would
/// terminate the block early.
fn embed_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Render the full HTML report.
pub fn render(
    project: &str,
    scan: &Scan,
    summary: &ProjectSummary,
) -> serde_json::Result<String> {
    let tree_text = tree::render(project, &scan.records);

    Ok(TEMPLATE
        .replace("{{project}}", &escape_html(project))
        .replace(
            "{{project_types}}",
            &escape_html(&summary.project_types.join(", ")),
        )
        .replace(
            "{{generated_at}}",
            &Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        )
        .replace("{{total_size}}", &format_size(summary.total_size_bytes))
        .replace("{{tree}}", &escape_html(&tree_text))
        .replace("{{summary_json}}", &embed_json(summary)?)
        .replace("{{files_json}}", &embed_json(&scan.records)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use inoscanlib::{scan, summarize, Config};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_render_embeds_data() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("blink.ino"),
            "void setup() {\n// TODO: pin\n}\n",
        )
        .unwrap();

        let config = Config::new();
        let result = scan(temp.path(), &config).unwrap();
        let summary = summarize(&result, &config);

        let html = render("blink", &result, &summary).unwrap();

        assert!(html.contains("<title>"));
        assert!(html.contains("blink"));
        assert!(html.contains("\"total_files\":1"));
        assert!(html.contains("blink.ino"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_script_close_is_escaped() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("evil.cpp"),
            "// TODO: </script><script>alert(1)</script>\n",
        )
        .unwrap();

        let config = Config::new();
        let result = scan(temp.path(), &config).unwrap();
        let summary = summarize(&result, &config);

        let html = render("evil", &result, &summary).unwrap();
        // The embedded JSON must not contain a literal `</`
        let script_data = html
            .split("const filesData =")
            .nth(1)
            .and_then(|s| s.split('\n').next())
            .unwrap();
        assert!(!script_data.contains("</"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_html("\"x\""), "&quot;x&quot;");
    }
}
