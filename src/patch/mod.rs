//! Patch operations that rebrand upstream documentation sources.
//!
//! A patch operation mutates zero or more known files inside a repository
//! checkout. Two shapes exist:
//!
//! - [`UrlRewriter`] walks the whole tree and applies literal [`Rule`]s to
//!   every file with a given suffix, writing only files that changed.
//! - [`FixedPathPatcher`] targets one well-known config file of a specific
//!   upstream project (see [`SiteProfile`]) and always writes it back.
//!
//! Operations are looked up by discriminant in a [`PatchRegistry`] and run in
//! declared order by a [`PatchRunner`].
//!
//! ```rust,no_run
//! use docs_mirror::patch::{PatchRegistry, PatchRunner, PatchStep, Rule};
//! use std::path::Path;
//!
//! let steps = vec![PatchStep::url_rewrite(vec![Rule::new(
//!     "https://docs.papermc.io",
//!     "https://fastly.8aka.cn",
//! )])];
//!
//! let registry = PatchRegistry::new();
//! let report = PatchRunner::new(&registry).run(&steps, Path::new("repos/Paper"))?;
//! report.write_patched(&mut std::io::stdout())?;
//! # Ok::<(), docs_mirror::error::MirrorError>(())
//! ```

mod profile;
mod registry;
mod url;

pub use profile::{FixedPathPatcher, MIRROR_HOST, SiteProfile};
pub use registry::PatchRegistry;
pub use url::UrlRewriter;

use crate::error::Result;
use crate::transform::FileChange;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A literal `from` → `to` substring replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub from: String,
    pub to: String,
}

impl Rule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// One entry of a project's `patcher` list in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchStep {
    /// Discriminant selecting the patch operation.
    #[serde(rename = "type")]
    pub kind: String,

    /// Literal rules, used by the generic URL rewriter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,

    /// File-name suffix for the generic URL rewriter (defaults to `.md`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// Globs, relative to the checkout root, the generic URL rewriter skips.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl PatchStep {
    /// Creates a step with no parameters.
    pub fn named(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            rules: Vec::new(),
            suffix: None,
            exclude: Vec::new(),
        }
    }

    /// Creates a generic URL rewrite step.
    pub fn url_rewrite(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            ..Self::named(UrlRewriter::NAME)
        }
    }
}

/// A patch operation bound to a repository checkout.
pub trait Patcher {
    /// Returns the canonical discriminant of this operation.
    fn name(&self) -> &'static str;

    /// Computes the changes this operation would make, without writing.
    fn plan(&self) -> Result<Vec<FileChange>>;

    /// Plans and writes the changes, reporting every file written.
    fn patch(&self) -> Result<PatchReport> {
        let mut report = PatchReport::default();
        for change in self.plan()? {
            if change.apply()? {
                log::debug!("Wrote {}", change.path.display());
                report.written.push(change.path.clone());
            }
            report.changes.push(change);
        }
        Ok(report)
    }
}

/// The outcome of running patch operations.
#[derive(Debug, Default)]
pub struct PatchReport {
    /// Every planned change, whether or not it was written.
    pub changes: Vec<FileChange>,
    /// Files written to disk, in write order.
    pub written: Vec<PathBuf>,
}

impl PatchReport {
    /// Returns the number of planned changes that alter content.
    pub fn files_modified(&self) -> usize {
        self.changes.iter().filter(|c| c.is_modified()).count()
    }

    /// Writes one `Patched <path>` line per written file.
    pub fn write_patched(&self, out: &mut impl Write) -> io::Result<()> {
        for path in &self.written {
            writeln!(out, "Patched {}", path.display())?;
        }
        Ok(())
    }

    /// Appends another report to this one.
    pub fn merge(&mut self, other: PatchReport) {
        self.changes.extend(other.changes);
        self.written.extend(other.written);
    }
}

/// Runs a project's patch steps against its checkout.
pub struct PatchRunner<'r> {
    registry: &'r PatchRegistry,
    dry_run: bool,
}

impl<'r> PatchRunner<'r> {
    pub fn new(registry: &'r PatchRegistry) -> Self {
        Self {
            registry,
            dry_run: false,
        }
    }

    /// Plans changes without writing any file.
    ///
    /// Each step is planned against the files as they are on disk, so later
    /// steps do not see earlier steps' edits.
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Resolves every step, then applies them in declared order.
    ///
    /// An unknown discriminant fails before any file is touched.
    pub fn run(&self, steps: &[PatchStep], repo_root: &Path) -> Result<PatchReport> {
        let patchers = steps
            .iter()
            .map(|step| self.registry.create(step, repo_root))
            .collect::<Result<Vec<_>>>()?;

        let mut report = PatchReport::default();
        for patcher in patchers {
            log::debug!("Running {} on {}", patcher.name(), repo_root.display());
            if self.dry_run {
                report.changes.extend(patcher.plan()?);
            } else {
                report.merge(patcher.patch()?);
            }
        }
        Ok(report)
    }
}
