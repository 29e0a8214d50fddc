//! Scan configuration.
//!
//! `Config` is a plain declarative value: filter rules, project-type
//! indicators and report thresholds. It is loaded once (from a JSON payload
//! or from built-in defaults) and never mutated during a run.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InoscanError;
use crate::Result;

/// Thresholds that only affect how much the reporters display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLimits {
    /// Number of files kept in the "top files by lines" ranking
    pub top_files: usize,
    /// Maximum number of TODO/FIXME entries kept for display
    pub max_todos: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            top_files: 10,
            max_todos: 100,
        }
    }
}

/// Filter and behavior settings for a scan.
///
/// Any field absent from a user-supplied JSON payload falls back to its
/// default, so a partial config like `{"extensions": [".c"]}` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Allowed file extensions, with leading dot (matched case-insensitively)
    pub extensions: Vec<String>,
    /// Directory names excluded at any depth
    pub exclude_dirs: Vec<String>,
    /// Filename glob patterns to exclude (anchored to the full filename)
    pub exclude_files: Vec<String>,
    /// Project type name -> marker filenames and/or extensions
    pub project_types: BTreeMap<String, Vec<String>>,
    /// Report display thresholds
    pub report: ReportLimits,
}

impl Default for Config {
    fn default() -> Self {
        let mut project_types = BTreeMap::new();
        project_types.insert("arduino".to_string(), vec![".ino".to_string()]);
        project_types.insert(
            "platformio".to_string(),
            vec!["platformio.ini".to_string()],
        );
        project_types.insert("cmake".to_string(), vec!["CMakeLists.txt".to_string()]);

        Self {
            extensions: [".cpp", ".c", ".h", ".hpp", ".ino"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude_dirs: [
                ".git",
                ".vscode",
                "build",
                "libraries",
                "__pycache__",
                ".pio",
                "node_modules",
                "dist",
                "obj",
                "bin",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            exclude_files: Vec::new(),
            project_types,
            report: ReportLimits::default(),
        }
    }
}

impl Config {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from a JSON payload.
    ///
    /// A malformed payload is a fatal error, per the error taxonomy: the
    /// user asked for specific behavior and silently ignoring it would make
    /// the run unexplainable.
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| InoscanError::ConfigParse(e.to_string()))
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let payload = fs::read_to_string(path).map_err(|e| InoscanError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&payload)
    }

    /// Check whether a file extension (with leading dot) is allowed.
    ///
    /// Comparison is case-insensitive, so `.INO` matches `.ino`.
    pub fn allows_extension(&self, ext: &str) -> bool {
        self.extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }

    /// All filename markers from the project-type mapping (entries that are
    /// not extensions). The selector watches for these during the walk.
    pub fn marker_filenames(&self) -> Vec<&str> {
        self.project_types
            .values()
            .flatten()
            .filter(|m| !m.starts_with('.'))
            .map(|m| m.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extensions() {
        let config = Config::new();
        assert!(config.allows_extension(".ino"));
        assert!(config.allows_extension(".cpp"));
        assert!(!config.allows_extension(".py"));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let config = Config::new();
        assert!(config.allows_extension(".INO"));
        assert!(config.allows_extension(".Cpp"));
    }

    #[test]
    fn test_partial_json_payload_keeps_defaults() {
        let config = Config::from_json(r#"{"extensions": [".c"]}"#).unwrap();
        assert_eq!(config.extensions, vec![".c"]);
        // Untouched fields keep their defaults
        assert!(config.exclude_dirs.contains(&"build".to_string()));
        assert_eq!(config.report.top_files, 10);
    }

    #[test]
    fn test_malformed_payload_is_fatal() {
        let result = Config::from_json("{not json");
        assert!(matches!(result, Err(InoscanError::ConfigParse(_))));
    }

    #[test]
    fn test_marker_filenames_skip_extensions() {
        let config = Config::new();
        let markers = config.marker_filenames();
        assert!(markers.contains(&"platformio.ini"));
        assert!(markers.contains(&"CMakeLists.txt"));
        assert!(!markers.iter().any(|m| m.starts_with('.')));
    }

    #[test]
    fn test_report_limits_from_json() {
        let config = Config::from_json(r#"{"report": {"top_files": 5}}"#).unwrap();
        assert_eq!(config.report.top_files, 5);
        assert_eq!(config.report.max_todos, 100);
    }
}
