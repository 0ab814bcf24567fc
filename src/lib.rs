//! # Docs Mirror
//!
//! Builds a unified mirror of several upstream documentation sites.
//!
//! For every configured project this crate:
//! - Checks out a pinned revision of the upstream repository
//! - Applies patch operations that rebrand URLs and base paths
//! - Runs the project's own install and build commands
//! - Moves the static output into one build tree
//!
//! and finally writes a landing page linking every site.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docs_mirror::prelude::*;
//!
//! let config = MirrorConfig::load("fastly.json")?;
//! let result = Pipeline::new("repos", "build").run(&config)?;
//!
//! for project in &result.projects {
//!     println!("{} -> {}", project.name, project.output.display());
//! }
//! # Ok::<(), docs_mirror::error::MirrorError>(())
//! ```
//!
//! ## Patching a checkout
//!
//! ```rust,no_run
//! use docs_mirror::prelude::*;
//! use std::path::Path;
//!
//! let root = Path::new("repos/Paper");
//! FixedPathPatcher::new(root, SiteProfile::Paper).patch()?;
//! let report = UrlRewriter::new(root, vec![Rule::new(
//!     "https://docs.papermc.io",
//!     "https://fastly.8aka.cn",
//! )])
//! .patch()?;
//! println!("{} file(s) written", report.written.len());
//! # Ok::<(), docs_mirror::error::MirrorError>(())
//! ```

pub mod command;
pub mod config;
pub mod diff;
pub mod error;
pub mod git;
pub mod matcher;
pub mod patch;
pub mod pipeline;
pub mod site;
pub mod transform;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{MirrorConfig, ProjectConfig};
    pub use crate::diff::DiffSummary;
    pub use crate::error::{MirrorError, Result};
    pub use crate::matcher::FileMatcher;
    pub use crate::patch::{
        FixedPathPatcher, PatchRegistry, PatchReport, PatchRunner, PatchStep, Patcher, Rule,
        SiteProfile, UrlRewriter,
    };
    pub use crate::pipeline::{Pipeline, PipelineResult, ProjectOutcome};
    pub use crate::transform::{
        FileChange, FileTransform, TextTransform, Transform, TransformBuilder, WritePolicy,
    };
}

pub use prelude::*;
