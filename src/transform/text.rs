//! Text-based transformations using regex patterns and literal needles.

use super::Transform;
use crate::error::Result;
use regex::Regex;
use std::path::Path;

/// Text-based transformation over the whole file content.
pub struct TextTransform {
    kind: TextTransformKind,
}

enum TextTransformKind {
    Replace { pattern: Regex, replacement: String },
    ReplaceFirst { pattern: Regex, replacement: String },
    ReplaceLiteral { needle: String, replacement: String },
    UnlessContains { marker: String, inner: Box<TextTransform> },
}

impl TextTransform {
    /// Creates a transform replacing every match of a regex.
    ///
    /// The replacement may reference capture groups (`${1}`).
    pub fn replace(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            kind: TextTransformKind::Replace {
                pattern: Regex::new(pattern)?,
                replacement: replacement.to_string(),
            },
        })
    }

    /// Creates a transform replacing only the first match of a regex.
    pub fn replace_first(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            kind: TextTransformKind::ReplaceFirst {
                pattern: Regex::new(pattern)?,
                replacement: replacement.to_string(),
            },
        })
    }

    /// Creates a transform deleting every match of a regex.
    pub fn remove(pattern: &str) -> Result<Self> {
        Self::replace(pattern, "")
    }

    /// Creates a literal string replacement transform.
    ///
    /// An empty needle leaves the source untouched.
    pub fn replace_literal(needle: &str, replacement: &str) -> Self {
        Self {
            kind: TextTransformKind::ReplaceLiteral {
                needle: needle.to_string(),
                replacement: replacement.to_string(),
            },
        }
    }

    /// Wraps a transform so it only runs when `marker` is absent from the source.
    pub fn unless_contains(marker: &str, inner: TextTransform) -> Self {
        Self {
            kind: TextTransformKind::UnlessContains {
                marker: marker.to_string(),
                inner: Box::new(inner),
            },
        }
    }
}

impl Transform for TextTransform {
    fn apply(&self, source: &str, path: &Path) -> Result<String> {
        match &self.kind {
            TextTransformKind::Replace { pattern, replacement } => {
                Ok(pattern.replace_all(source, replacement.as_str()).into_owned())
            }
            TextTransformKind::ReplaceFirst { pattern, replacement } => {
                Ok(pattern.replace(source, replacement.as_str()).into_owned())
            }
            TextTransformKind::ReplaceLiteral { needle, replacement } => {
                if needle.is_empty() {
                    return Ok(source.to_string());
                }
                Ok(source.replace(needle.as_str(), replacement))
            }
            TextTransformKind::UnlessContains { marker, inner } => {
                if source.contains(marker.as_str()) {
                    Ok(source.to_string())
                } else {
                    inner.apply(source, path)
                }
            }
        }
    }

    fn describe(&self) -> String {
        match &self.kind {
            TextTransformKind::Replace { pattern, replacement } => {
                if replacement.is_empty() {
                    format!("Remove pattern '{}'", pattern.as_str())
                } else {
                    format!("Replace pattern '{}' with '{}'", pattern.as_str(), replacement)
                }
            }
            TextTransformKind::ReplaceFirst { pattern, replacement } => {
                format!(
                    "Replace first match of '{}' with '{}'",
                    pattern.as_str(),
                    replacement
                )
            }
            TextTransformKind::ReplaceLiteral { needle, replacement } => {
                format!("Replace literal '{}' with '{}'", needle, replacement)
            }
            TextTransformKind::UnlessContains { marker, inner } => {
                format!("{} (unless '{}' is present)", inner.describe(), marker)
            }
        }
    }
}
