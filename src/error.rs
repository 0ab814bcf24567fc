//! Error types for the documentation mirror.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// The main error type for mirror operations.
#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Glob pattern error: {0}")]
    Glob(#[from] globset::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Unknown patcher: {0}")]
    UnknownPatcher(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Checkout failed for {repo}: {message}")]
    Checkout { repo: String, message: String },

    #[error("Command \"{command}\" failed with {status}")]
    CommandFailed { command: String, status: ExitStatus },
}

/// A specialized Result type for mirror operations.
pub type Result<T> = std::result::Result<T, MirrorError>;
