//! File-level operations used to assemble build output.

use crate::error::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file operation to be executed.
#[derive(Debug, Clone)]
pub enum FileOperation {
    /// Moves a file or directory, falling back to copy + delete across devices.
    Move { from: PathBuf, to: PathBuf },
    /// Deletes a file or directory if it exists.
    Delete { path: PathBuf },
}

impl FileOperation {
    /// Executes the file operation.
    pub fn execute(&self) -> Result<()> {
        match self {
            FileOperation::Move { from, to } => {
                if let Some(parent) = to.parent() {
                    fs::create_dir_all(parent)?;
                }
                match fs::rename(from, to) {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                        log::debug!("{} is on another device, copying", from.display());
                        if from.is_dir() {
                            copy_dir(from, to)?;
                            fs::remove_dir_all(from)?;
                        } else {
                            fs::copy(from, to)?;
                            fs::remove_file(from)?;
                        }
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            FileOperation::Delete { path } => {
                if path.is_dir() {
                    fs::remove_dir_all(path)?;
                } else if path.exists() {
                    fs::remove_file(path)?;
                }
            }
        }
        Ok(())
    }

    /// Returns a description of the operation.
    pub fn describe(&self) -> String {
        match self {
            FileOperation::Move { from, to } => {
                format!("Move {} -> {}", from.display(), to.display())
            }
            FileOperation::Delete { path } => {
                format!("Delete {}", path.display())
            }
        }
    }
}

fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| io::Error::other(e.to_string()))?;
        let dest = to.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)?;
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(())
}

/// Builder for file transformations.
#[derive(Default)]
pub struct FileTransform {
    operations: Vec<FileOperation>,
}

impl FileTransform {
    /// Creates a new file transform builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves a file or directory to a new location.
    pub fn move_file(mut self, from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        self.operations.push(FileOperation::Move {
            from: from.into(),
            to: to.into(),
        });
        self
    }

    /// Deletes a file or directory.
    pub fn delete(mut self, path: impl Into<PathBuf>) -> Self {
        self.operations.push(FileOperation::Delete { path: path.into() });
        self
    }

    /// Replaces `to` with the directory at `from`, removing anything already there.
    pub fn replace_dir(self, from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        let to = to.into();
        self.delete(to.clone()).move_file(from, to)
    }

    /// Executes all file operations.
    pub fn execute(&self) -> Result<Vec<FileOperation>> {
        for op in &self.operations {
            log::debug!("{}", op.describe());
            op.execute()?;
        }
        Ok(self.operations.clone())
    }
}
