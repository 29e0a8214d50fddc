//! Styled terminal summary output.

use console::Style;
use inoscanlib::{ProjectSummary, Warning};

/// Format a byte count as a human-readable size.
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

/// Print the run summary to stdout.
pub fn print_summary(project: &str, summary: &ProjectSummary) {
    let header = Style::new().bold();
    let count = Style::new().green();

    println!("{}", header.apply_to(format!("Project summary: {project}")));
    println!("  project type(s):  {}", summary.project_types.join(", "));
    println!(
        "  files analyzed:   {}",
        count.apply_to(summary.total_files)
    );
    println!(
        "  total lines:      {}",
        count.apply_to(summary.lines.total)
    );
    println!("  code lines:       {}", summary.lines.code);
    println!("  comment lines:    {}", summary.lines.comment);
    println!("  blank lines:      {}", summary.lines.blank);
    println!("  functions:        {}", summary.functions_count);
    println!("  includes:         {}", summary.includes_count);
    println!("  defines:          {}", summary.defines_count);
    println!("  TODO/FIXME:       {}", summary.todos_count);
    println!("  complexity (max): {}", summary.max_complexity);
    println!("  complexity (avg): {}", summary.average_complexity);
    println!(
        "  total size:       {}",
        format_size(summary.total_size_bytes)
    );

    if !summary.files_by_extension.is_empty() {
        println!("{}", header.apply_to("File types:"));
        for (ext, files) in &summary.files_by_extension {
            let lines = summary.lines_by_extension.get(ext).copied().unwrap_or(0);
            println!("  {ext}: {files} files, {lines} lines");
        }
    }
}

/// Print collected warnings to stderr, one per line.
pub fn print_warnings(warnings: &[Warning]) {
    let style = Style::new().yellow();
    for warning in warnings {
        eprintln!(
            "{} {}: {}",
            style.apply_to("warning:"),
            warning.path.display(),
            warning.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
