//! Discriminant → patch operation lookup.

use super::profile::{FixedPathPatcher, SiteProfile};
use super::url::UrlRewriter;
use super::{PatchStep, Patcher};
use crate::error::{MirrorError, Result};
use std::path::Path;

/// Builds a patch operation bound to a checkout from a configured step.
pub type PatcherFactory =
    Box<dyn for<'a> Fn(&'a Path, &PatchStep) -> Box<dyn Patcher + 'a> + Send + Sync>;

struct Entry {
    name: &'static str,
    aliases: Vec<&'static str>,
    factory: PatcherFactory,
}

/// Registry of known patch operations.
#[derive(Default)]
pub struct PatchRegistry {
    entries: Vec<Entry>,
}

impl PatchRegistry {
    /// Creates a registry with every built-in operation.
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register(UrlRewriter::NAME, &["URLPatcher"], url_rewriter);
        for profile in SiteProfile::ALL {
            registry.register(
                profile.discriminant(),
                &[profile.legacy_name()],
                move |root, _| Box::new(FixedPathPatcher::new(root, profile)),
            );
        }
        registry
    }

    /// Registers an operation under a discriminant and optional aliases.
    pub fn register<F>(&mut self, name: &'static str, aliases: &[&'static str], factory: F)
    where
        F: for<'a> Fn(&'a Path, &PatchStep) -> Box<dyn Patcher + 'a> + Send + Sync + 'static,
    {
        self.entries.push(Entry {
            name,
            aliases: aliases.to_vec(),
            factory: Box::new(factory),
        });
    }

    /// Returns true if `name` is a known discriminant or alias.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Constructs the operation named by `step`, bound to `repo_root`.
    pub fn create<'a>(
        &self,
        step: &PatchStep,
        repo_root: &'a Path,
    ) -> Result<Box<dyn Patcher + 'a>> {
        let entry = self
            .find(&step.kind)
            .ok_or_else(|| MirrorError::UnknownPatcher(step.kind.clone()))?;
        Ok((entry.factory)(repo_root, step))
    }

    /// Returns every discriminant with its aliases, in registration order.
    pub fn names(&self) -> Vec<(&'static str, &[&'static str])> {
        self.entries
            .iter()
            .map(|e| (e.name, e.aliases.as_slice()))
            .collect()
    }

    fn find(&self, name: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.name == name || e.aliases.iter().any(|a| *a == name))
    }
}

fn url_rewriter<'a>(root: &'a Path, step: &PatchStep) -> Box<dyn Patcher + 'a> {
    let mut rewriter = UrlRewriter::new(root, step.rules.clone());
    if let Some(suffix) = &step.suffix {
        rewriter = rewriter.suffix(suffix.clone());
    }
    for glob in &step.exclude {
        rewriter = rewriter.exclude(glob.clone());
    }
    Box::new(rewriter)
}
