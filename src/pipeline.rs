//! End-to-end mirror build: checkout, patch, build, assemble.

use crate::command;
use crate::config::{MirrorConfig, ProjectConfig};
use crate::error::{MirrorError, Result};
use crate::git;
use crate::patch::{PatchRegistry, PatchReport, PatchRunner};
use crate::site;
use crate::transform::FileTransform;
use std::path::{Path, PathBuf};

/// What happened to one project during a run.
#[derive(Debug)]
pub struct ProjectOutcome {
    pub name: String,
    pub patches: PatchReport,
    pub output: PathBuf,
}

/// The result of a whole run.
#[derive(Debug)]
pub struct PipelineResult {
    pub projects: Vec<ProjectOutcome>,
    pub index: PathBuf,
}

/// Builds every configured project into one output tree.
///
/// Projects run one at a time in config order and the first error aborts
/// the run.
pub struct Pipeline {
    repos_dir: PathBuf,
    build_dir: PathBuf,
    registry: PatchRegistry,
    sync: bool,
}

impl Pipeline {
    /// Creates a pipeline checking out into `repos_dir` and assembling into `build_dir`.
    pub fn new(repos_dir: impl Into<PathBuf>, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            repos_dir: repos_dir.into(),
            build_dir: build_dir.into(),
            registry: PatchRegistry::new(),
            sync: true,
        }
    }

    /// Uses existing checkouts as they are instead of syncing them with git.
    pub fn skip_sync(mut self) -> Self {
        self.sync = false;
        self
    }

    /// Checkout directory of a project.
    pub fn repo_path(&self, name: &str) -> PathBuf {
        self.repos_dir.join(name)
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Runs every project, then writes the landing page.
    pub fn run(&self, config: &MirrorConfig) -> Result<PipelineResult> {
        let mut projects = Vec::with_capacity(config.len());
        for (name, project) in config.iter() {
            projects.push(self.run_project(name, project)?);
        }
        let index = site::write_index(config, &self.build_dir)?;
        Ok(PipelineResult { projects, index })
    }

    /// Runs one project: sync, patch, install, build and move the output.
    pub fn run_project(&self, name: &str, project: &ProjectConfig) -> Result<ProjectOutcome> {
        log::info!("Processing {}...", name);
        let repo_path = self.repo_path(name);

        if self.sync {
            git::sync(&project.repo, &project.commit, &repo_path)?;
        } else if !repo_path.is_dir() {
            return Err(MirrorError::FileNotFound(repo_path));
        }

        let patches = self.patch(name, project, false)?;

        command::run(&project.install, &repo_path)?;
        command::run(&project.build, &repo_path)?;

        let built = repo_path.join(&project.output);
        if !built.exists() {
            return Err(MirrorError::FileNotFound(built));
        }
        let output = self.build_dir.join(name);
        FileTransform::new().replace_dir(&built, &output).execute()?;
        log::info!("Moved build output to {}", output.display());

        Ok(ProjectOutcome {
            name: name.to_string(),
            patches,
            output,
        })
    }

    /// Applies (or, with `dry_run`, plans) a project's patch steps on its checkout.
    pub fn patch(&self, name: &str, project: &ProjectConfig, dry_run: bool) -> Result<PatchReport> {
        let repo_path = self.repo_path(name);
        if !repo_path.is_dir() {
            return Err(MirrorError::FileNotFound(repo_path));
        }

        let runner = PatchRunner::new(&self.registry);
        let runner = if dry_run { runner.dry_run() } else { runner };
        runner.run(&project.patcher, &repo_path)
    }
}
