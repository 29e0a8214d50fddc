//! Error types for inoscanlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during a scan
#[derive(Error, Debug)]
pub enum InoscanError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read a configuration file
    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration payload present but unparseable
    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
}
