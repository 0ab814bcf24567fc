//! File matching predicates.

use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Predicates for selecting files inside a repository checkout.
#[derive(Default, Clone)]
pub struct FileMatcher {
    suffixes: Vec<String>,
    exclude_globs: Vec<String>,
}

impl FileMatcher {
    /// Creates a new file matcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches files whose name ends with the given suffix (e.g. `.md`).
    ///
    /// The comparison is case-sensitive.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffixes.push(suffix.into());
        self
    }

    /// Excludes files matching the glob pattern, relative to the root.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_globs.push(pattern.into());
        self
    }

    /// Tests a single file name against the suffix predicates.
    pub fn matches_name(&self, name: &str) -> bool {
        self.suffixes.is_empty() || self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    /// Collects all matching files under `root`, in file-name order.
    ///
    /// Symlinks to files are included; symlinked directories are not
    /// descended into. Errors while walking the tree are propagated.
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let exclude_set = self.build_glob_set(&self.exclude_globs)?;
        let mut matched = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if !self.matches_name(&name) {
                continue;
            }

            let path = entry.path();
            let rel_path = path.strip_prefix(root).unwrap_or(path);
            if !self.exclude_globs.is_empty() && exclude_set.is_match(rel_path) {
                log::debug!("Skipping excluded file {}", path.display());
                continue;
            }

            matched.push(path.to_path_buf());
        }

        Ok(matched)
    }

    fn build_glob_set(&self, patterns: &[String]) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_files(dir: &Path) {
        fs::create_dir_all(dir.join("docs/guide")).unwrap();
        fs::create_dir_all(dir.join("node_modules/pkg")).unwrap();

        fs::write(dir.join("README.md"), "# Readme").unwrap();
        fs::write(dir.join("docs/index.md"), "index").unwrap();
        fs::write(dir.join("docs/guide/start.md"), "start").unwrap();
        fs::write(dir.join("docs/guide/other.MD"), "upper").unwrap();
        fs::write(dir.join("docs/notes.mdx"), "mdx").unwrap();
        fs::write(dir.join("node_modules/pkg/README.md"), "vendored").unwrap();
        fs::write(dir.join("astro.config.ts"), "config").unwrap();
    }

    #[test]
    fn test_filter_by_suffix() {
        let dir = TempDir::new().unwrap();
        create_test_files(dir.path());

        let files = FileMatcher::new().suffix(".md").collect(dir.path()).unwrap();

        assert_eq!(files.len(), 4);
        assert!(files.iter().all(|f| f.to_string_lossy().ends_with(".md")));
    }

    #[test]
    fn test_suffix_is_case_sensitive() {
        let matcher = FileMatcher::new().suffix(".md");
        assert!(matcher.matches_name("a.md"));
        assert!(!matcher.matches_name("a.MD"));
        assert!(!matcher.matches_name("a.mdx"));
    }

    #[test]
    fn test_exclude_glob() {
        let dir = TempDir::new().unwrap();
        create_test_files(dir.path());

        let files = FileMatcher::new()
            .suffix(".md")
            .exclude("node_modules/**")
            .collect(dir.path())
            .unwrap();

        assert_eq!(files.len(), 3);
        assert!(
            files
                .iter()
                .all(|f| !f.to_string_lossy().contains("node_modules"))
        );
    }

    #[test]
    fn test_no_suffix_matches_everything() {
        let dir = TempDir::new().unwrap();
        create_test_files(dir.path());

        let files = FileMatcher::new().collect(dir.path()).unwrap();
        assert_eq!(files.len(), 7);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_collected() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("repo");
        let shared = dir.path().join("shared");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("faq.md"), "faq").unwrap();
        std::os::unix::fs::symlink(shared.join("faq.md"), root.join("faq.md")).unwrap();
        std::os::unix::fs::symlink(&shared, root.join("linked")).unwrap();
        std::os::unix::fs::symlink(root.join("gone.md"), root.join("dangling.md")).unwrap();

        let files = FileMatcher::new().suffix(".md").collect(&root).unwrap();

        assert_eq!(files, vec![root.join("faq.md")]);
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let files = FileMatcher::new().suffix(".md").collect(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = TempDir::new().unwrap();
        let result = FileMatcher::new().collect(&dir.path().join("missing"));
        assert!(result.is_err());
    }
}
