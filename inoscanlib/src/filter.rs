//! Candidate file discovery with directory and filename filtering.
//!
//! The selector walks a root directory and yields a deterministic, sorted
//! list of files whose extension is allowed and whose path survives the
//! exclusion rules. Directories are pruned by name at any depth, so a file
//! under `build/sub/x.cpp` never surfaces. While walking, filenames that
//! match a project-type marker (e.g. `platformio.ini`) are recorded even
//! though they never become records themselves.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::InoscanError;
use crate::stats::Warning;
use crate::Result;

/// Compiled filename exclusion globs.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    exclude_files: Vec<Pattern>,
}

impl FileFilter {
    /// Compile the exclusion globs from a config. An invalid pattern is a
    /// fatal configuration error.
    pub fn new(config: &Config) -> Result<Self> {
        let mut exclude_files = Vec::new();
        for pattern in &config.exclude_files {
            let pat = Pattern::new(pattern).map_err(|e| InoscanError::InvalidGlob {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
            exclude_files.push(pat);
        }
        Ok(Self { exclude_files })
    }

    /// Check a bare filename against the exclusion globs.
    pub fn excludes_filename(&self, name: &str) -> bool {
        self.exclude_files.iter().any(|p| p.matches(name))
    }
}

/// Result of walking the tree: candidate files, marker sightings, warnings.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Sorted candidate file paths
    pub files: Vec<PathBuf>,
    /// Project-type marker filenames seen during the walk
    pub markers: BTreeSet<String>,
    /// Unreadable directories and other traversal problems
    pub warnings: Vec<Warning>,
}

/// Lowercased extension with leading dot, or None for extensionless files.
pub fn normalized_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
}

/// Walk `root` and collect candidate files per the config's filter rules.
///
/// The walk follows symlinks; walkdir's loop detection turns cycles into
/// per-entry errors, which are recorded as warnings rather than aborting.
/// A missing or non-directory root is fatal.
pub fn discover(root: impl AsRef<Path>, config: &Config) -> Result<Discovery> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(InoscanError::PathNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(InoscanError::NotADirectory(root.to_path_buf()));
    }

    let filter = FileFilter::new(config)?;
    let marker_names = config.marker_filenames();
    let mut discovery = Discovery::default();

    let walker = WalkDir::new(root).follow_links(true).into_iter();

    for entry in walker.filter_entry(|e| {
        // Always include the root itself
        if e.depth() == 0 {
            return true;
        }
        // Prune excluded directories; the whole subtree disappears
        if e.file_type().is_dir() {
            let name = e.file_name().to_str().unwrap_or("");
            return !config.exclude_dirs.iter().any(|d| d.as_str() == name);
        }
        true
    }) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                discovery.warnings.push(Warning::new(path, e.to_string()));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_str().unwrap_or("");
        if marker_names.iter().any(|m| *m == name) {
            discovery.markers.insert(name.to_string());
        }

        if filter.excludes_filename(name) {
            continue;
        }
        let Some(ext) = normalized_extension(entry.path()) else {
            continue;
        };
        if !config.allows_extension(&ext) {
            continue;
        }

        discovery.files.push(entry.path().to_path_buf());
    }

    // Sort for reproducible reports
    discovery.files.sort();

    Ok(discovery)
}
