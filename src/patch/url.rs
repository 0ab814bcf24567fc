//! Tree-wide literal URL rewriting.

use super::{Patcher, Rule};
use crate::error::Result;
use crate::matcher::FileMatcher;
use crate::transform::{FileChange, TransformBuilder, WritePolicy};
use std::fs;
use std::path::Path;

/// Applies literal rules to every file with a given suffix under a checkout.
pub struct UrlRewriter<'a> {
    root: &'a Path,
    rules: Vec<Rule>,
    suffix: String,
    exclude: Vec<String>,
}

impl<'a> UrlRewriter<'a> {
    pub const NAME: &'static str = "generic-url-rewrite";
    pub const DEFAULT_SUFFIX: &'static str = ".md";

    pub fn new(root: &'a Path, rules: Vec<Rule>) -> Self {
        Self {
            root,
            rules,
            suffix: Self::DEFAULT_SUFFIX.to_string(),
            exclude: Vec::new(),
        }
    }

    /// Overrides the file-name suffix (default `.md`).
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Skips files matching the glob, relative to the checkout root.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    fn matcher(&self) -> FileMatcher {
        self.exclude
            .iter()
            .fold(FileMatcher::new().suffix(&self.suffix), |m, glob| {
                m.exclude(glob.as_str())
            })
    }

    fn transforms(&self) -> TransformBuilder {
        self.rules
            .iter()
            .fold(TransformBuilder::new(), |t, rule| {
                t.replace_literal(&rule.from, &rule.to)
            })
    }
}

impl Patcher for UrlRewriter<'_> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Only files whose content actually changes are planned.
    fn plan(&self) -> Result<Vec<FileChange>> {
        let transforms = self.transforms();
        let files = self.matcher().collect(self.root)?;

        let mut changes = Vec::new();
        for path in files {
            let original = fs::read_to_string(&path)?;
            let transformed = transforms.apply(&original, &path)?;
            if transformed == original {
                continue;
            }
            changes.push(FileChange {
                path,
                original,
                transformed,
                policy: WritePolicy::IfModified,
            });
        }
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MirrorError;
    use tempfile::TempDir;

    fn paper_rule() -> Vec<Rule> {
        vec![Rule::new("https://docs.papermc.io", "https://fastly.8aka.cn")]
    }

    #[test]
    fn test_rewrites_matching_markdown() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        let path = dir.path().join("docs/guide.md");
        fs::write(&path, "See https://docs.papermc.io/guide").unwrap();

        let report = UrlRewriter::new(dir.path(), paper_rule()).patch().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "See https://fastly.8aka.cn/guide"
        );
        assert_eq!(report.written, vec![path]);
    }

    #[test]
    fn test_ignores_other_suffixes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ts");
        fs::write(&path, "https://docs.papermc.io").unwrap();

        let report = UrlRewriter::new(dir.path(), paper_rule()).patch().unwrap();

        assert!(report.written.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "https://docs.papermc.io");
    }

    #[test]
    fn test_custom_suffix() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.mdx");
        fs::write(&path, "https://docs.papermc.io").unwrap();

        UrlRewriter::new(dir.path(), paper_rule())
            .suffix(".mdx")
            .patch()
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "https://fastly.8aka.cn");
    }

    #[test]
    fn test_excluded_files_are_left_alone() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        let vendored = dir.path().join("node_modules/pkg/README.md");
        let own = dir.path().join("README.md");
        fs::write(&vendored, "https://docs.papermc.io").unwrap();
        fs::write(&own, "https://docs.papermc.io").unwrap();

        let report = UrlRewriter::new(dir.path(), paper_rule())
            .exclude("node_modules/**")
            .patch()
            .unwrap();

        assert_eq!(report.written, vec![own]);
        assert_eq!(fs::read_to_string(&vendored).unwrap(), "https://docs.papermc.io");
    }

    #[test]
    fn test_invalid_exclude_glob_is_error() {
        let dir = TempDir::new().unwrap();
        let err = UrlRewriter::new(dir.path(), paper_rule())
            .exclude("[")
            .plan()
            .unwrap_err();
        assert!(matches!(err, MirrorError::Glob(_)));
    }

    #[test]
    fn test_unchanged_files_are_not_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.md");
        fs::write(&path, "nothing to see").unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let report = UrlRewriter::new(dir.path(), paper_rule()).patch().unwrap();

        assert!(report.written.is_empty());
        assert!(report.changes.is_empty());
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_rules_apply_sequentially() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.md");
        fs::write(&path, "alpha").unwrap();

        let rules = vec![Rule::new("alpha", "beta"), Rule::new("beta", "gamma")];
        UrlRewriter::new(dir.path(), rules).patch().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "gamma");
    }

    #[test]
    fn test_empty_from_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.md");
        fs::write(&path, "abc").unwrap();

        let report = UrlRewriter::new(dir.path(), vec![Rule::new("", "X")])
            .patch()
            .unwrap();

        assert!(report.written.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "abc");
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.md");
        fs::write(&path, "https://docs.papermc.io/a https://docs.papermc.io/b").unwrap();

        UrlRewriter::new(dir.path(), paper_rule()).patch().unwrap();
        let first = fs::read_to_string(&path).unwrap();
        let report = UrlRewriter::new(dir.path(), paper_rule()).patch().unwrap();

        assert!(report.written.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrites_through_symlink() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("repo");
        fs::create_dir_all(&root).unwrap();
        let target = dir.path().join("shared.md");
        fs::write(&target, "https://docs.papermc.io/faq").unwrap();
        std::os::unix::fs::symlink(&target, root.join("faq.md")).unwrap();

        let report = UrlRewriter::new(&root, paper_rule()).patch().unwrap();

        assert_eq!(report.written, vec![root.join("faq.md")]);
        assert_eq!(fs::read_to_string(&target).unwrap(), "https://fastly.8aka.cn/faq");
    }

    #[test]
    fn test_non_utf8_file_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.md"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        let err = UrlRewriter::new(dir.path(), paper_rule()).patch().unwrap_err();
        assert!(matches!(err, MirrorError::Io(_)));
    }
}
