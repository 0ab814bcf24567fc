//! Source checkout for upstream documentation repositories.

use crate::error::{MirrorError, Result};
use git2::build::CheckoutBuilder;
use git2::{AutotagOption, FetchOptions, Oid, Repository};
use std::path::Path;

/// Brings a working copy of `url` at `path` to `revision`.
///
/// The repository is cloned when `path` does not exist and fetched
/// otherwise. `revision` is resolved as the remote branch `origin/<revision>`
/// first, so branch names follow the remote tip, and then as any revspec
/// (commit id, tag). HEAD is detached at the resolved commit and the working
/// tree is force-checked-out, discarding local edits from earlier patch runs.
pub fn sync(url: &str, revision: &str, path: &Path) -> Result<Oid> {
    let fail = |message: String| MirrorError::Checkout {
        repo: url.to_string(),
        message,
    };

    let repo = if path.exists() {
        Repository::open(path).map_err(|e| fail(format!("Failed to open existing repo: {}", e)))?
    } else {
        log::info!("Cloning {} into {}", url, path.display());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Repository::clone(url, path).map_err(|e| fail(format!("Clone failed: {}", e)))?
    };

    fetch(&repo).map_err(|e| fail(format!("Failed to fetch: {}", e)))?;

    let object = repo
        .revparse_single(&format!("origin/{}", revision))
        .or_else(|_| repo.revparse_single(revision))
        .map_err(|e| fail(format!("Unknown revision '{}': {}", revision, e)))?;
    let commit = object
        .peel_to_commit()
        .map_err(|e| fail(format!("Failed to get commit: {}", e)))?;

    repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))
        .map_err(|e| fail(format!("Failed to checkout: {}", e)))?;
    repo.set_head_detached(commit.id())
        .map_err(|e| fail(format!("Failed to set HEAD: {}", e)))?;

    log::info!("Checked out {} at {}", url, commit.id());
    Ok(commit.id())
}

fn fetch(repo: &Repository) -> std::result::Result<(), git2::Error> {
    let mut remote = repo.find_remote("origin")?;
    let mut options = FetchOptions::new();
    options.download_tags(AutotagOption::All);
    remote.fetch(
        &["+refs/heads/*:refs/remotes/origin/*"],
        Some(&mut options),
        None,
    )
}
