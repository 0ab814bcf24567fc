//! Text transformations applied to documentation sources.

pub mod file;
pub mod text;

pub use file::FileTransform;
pub use text::TextTransform;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// A transformation that can be applied to file content.
pub trait Transform: Send + Sync {
    /// Applies the transformation to the given content.
    fn apply(&self, source: &str, path: &Path) -> Result<String>;

    /// Returns a description of the transformation.
    fn describe(&self) -> String;
}

/// An ordered chain of transformations, each seeing the previous one's output.
#[derive(Default)]
pub struct TransformBuilder {
    transforms: Vec<Box<dyn Transform>>,
}

impl TransformBuilder {
    /// Creates a new transform builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a literal string replacement.
    pub fn replace_literal(mut self, needle: &str, replacement: &str) -> Self {
        self.transforms
            .push(Box::new(TextTransform::replace_literal(needle, replacement)));
        self
    }

    /// Adds a prepared text transform.
    pub fn text(mut self, transform: TextTransform) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Applies all transformations to the content in order.
    pub fn apply(&self, source: &str, path: &Path) -> Result<String> {
        let mut result = source.to_string();
        for transform in &self.transforms {
            log::trace!("{} on {}", transform.describe(), path.display());
            result = transform.apply(&result, path)?;
        }
        Ok(result)
    }
}

/// When a planned change is written back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Write only when the content differs from the original.
    IfModified,
    /// Always write, even when the content is unchanged.
    Always,
}

/// Represents a change to be applied to a file.
#[derive(Debug, Clone)]
pub struct FileChange {
    pub path: PathBuf,
    pub original: String,
    pub transformed: String,
    pub policy: WritePolicy,
}

impl FileChange {
    /// Returns true if the content was modified.
    pub fn is_modified(&self) -> bool {
        self.original != self.transformed
    }

    /// Returns true if applying this change writes the file.
    pub fn will_write(&self) -> bool {
        match self.policy {
            WritePolicy::IfModified => self.is_modified(),
            WritePolicy::Always => true,
        }
    }

    /// Writes the transformed content to disk according to the write policy.
    ///
    /// Returns whether the file was written.
    pub fn apply(&self) -> Result<bool> {
        if !self.will_write() {
            return Ok(false);
        }
        std::fs::write(&self.path, &self.transformed)?;
        Ok(true)
    }
}
