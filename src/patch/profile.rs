//! Per-project patches for well-known documentation config files.

use super::Patcher;
use crate::error::Result;
use crate::transform::{FileChange, TextTransform, TransformBuilder, WritePolicy};
use std::fs;
use std::path::{Path, PathBuf};

/// Host that mirrored sites are served from.
pub const MIRROR_HOST: &str = "https://fastly.8aka.cn";

/// An upstream documentation project with a known config layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteProfile {
    /// Astro Starlight, `astro.config.ts`.
    Paper,
    /// Docusaurus, `docusaurus.config.ts`.
    Geyser,
    /// MkDocs, `mkdocs.yml`.
    Purpur,
    /// VitePress, `.vitepress/config.mts`.
    Pumpkin,
    /// VitePress under `docs/`, `docs/.vitepress/config.ts`.
    PostPlugins,
}

impl SiteProfile {
    pub const ALL: [SiteProfile; 5] = [
        SiteProfile::Paper,
        SiteProfile::Geyser,
        SiteProfile::Purpur,
        SiteProfile::Pumpkin,
        SiteProfile::PostPlugins,
    ];

    /// The registry discriminant.
    pub fn discriminant(self) -> &'static str {
        match self {
            SiteProfile::Paper => "paper-docs",
            SiteProfile::Geyser => "geyser-docs",
            SiteProfile::Purpur => "purpur-docs",
            SiteProfile::Pumpkin => "pumpkin-docs",
            SiteProfile::PostPlugins => "post-plugins-docs",
        }
    }

    /// The name used by older `fastly.json` files.
    pub fn legacy_name(self) -> &'static str {
        match self {
            SiteProfile::Paper => "PaperPatcher",
            SiteProfile::Geyser => "GeyserPatcher",
            SiteProfile::Purpur => "PurpurPatcher",
            SiteProfile::Pumpkin => "PumpkinPatcher",
            SiteProfile::PostPlugins => "PostPluginsPatcher",
        }
    }

    /// Config file location relative to the checkout root.
    pub fn relative_path(self) -> &'static [&'static str] {
        match self {
            SiteProfile::Paper => &["astro.config.ts"],
            SiteProfile::Geyser => &["docusaurus.config.ts"],
            SiteProfile::Purpur => &["mkdocs.yml"],
            SiteProfile::Pumpkin => &[".vitepress", "config.mts"],
            SiteProfile::PostPlugins => &["docs", ".vitepress", "config.ts"],
        }
    }

    /// Resolves the config file under `root`.
    pub fn config_path(self, root: &Path) -> PathBuf {
        self.relative_path()
            .iter()
            .fold(root.to_path_buf(), |path, part| path.join(part))
    }

    /// The ordered substitutions applied to the config file.
    pub fn transforms(self) -> Result<TransformBuilder> {
        let t = TransformBuilder::new();
        let t = match self {
            SiteProfile::Paper => t
                .text(TextTransform::replace(r"https://docs\.papermc\.io", MIRROR_HOST)?)
                .text(insert_base("/Paper")?)
                .text(TextTransform::remove(
                    r"\s*starlightLinksValidator\([\s\S]*?\),?\s*",
                )?),
            SiteProfile::Geyser => t
                .text(TextTransform::replace(
                    r"baseUrl: '/',",
                    "baseUrl: '/Geyser/',",
                )?)
                .text(TextTransform::replace(
                    r"url: 'https://geysermc\.org'",
                    &format!("url: '{MIRROR_HOST}'"),
                )?)
                .text(TextTransform::replace(
                    r"onBrokenLinks: 'throw'",
                    "onBrokenLinks: 'warn'",
                )?),
            SiteProfile::Purpur => t.text(TextTransform::replace(
                r"site_url: https://purpurmc\.org/docs",
                &format!("site_url: {MIRROR_HOST}/Purpur"),
            )?),
            SiteProfile::Pumpkin => {
                t.text(TextTransform::replace(r"base: '/',", "base: '/Pumpkin/',")?)
            }
            SiteProfile::PostPlugins => t
                .text(TextTransform::replace(
                    r"base: '/',",
                    "base: '/PostPlugins/',",
                )?)
                .text(insert_base("/PostPlugins/")?)
                .text(TextTransform::replace(
                    r"ignoreDeadLinks: false",
                    "ignoreDeadLinks: true",
                )?),
        };
        Ok(t)
    }
}

/// Inserts `base: '<base>',` after the first `defineConfig({`, unless a
/// `base:` key already exists anywhere in the file.
fn insert_base(base: &str) -> Result<TextTransform> {
    let insert = TextTransform::replace_first(
        r"(defineConfig\(\{)",
        &format!("${{1}}\n  base: '{base}',"),
    )?;
    Ok(TextTransform::unless_contains("base:", insert))
}

/// Patches the config file of one [`SiteProfile`] in a checkout.
///
/// A missing config file is not an error. An existing one is always
/// written back, even when no substitution matched.
pub struct FixedPathPatcher<'a> {
    root: &'a Path,
    profile: SiteProfile,
}

impl<'a> FixedPathPatcher<'a> {
    pub fn new(root: &'a Path, profile: SiteProfile) -> Self {
        Self { root, profile }
    }
}

impl Patcher for FixedPathPatcher<'_> {
    fn name(&self) -> &'static str {
        self.profile.discriminant()
    }

    fn plan(&self) -> Result<Vec<FileChange>> {
        let path = self.profile.config_path(self.root);
        if !path.exists() {
            log::debug!("{} not found, skipping {}", path.display(), self.name());
            return Ok(Vec::new());
        }

        let original = fs::read_to_string(&path)?;
        let transformed = self.profile.transforms()?.apply(&original, &path)?;

        Ok(vec![FileChange {
            path,
            original,
            transformed,
            policy: WritePolicy::Always,
        }])
    }
}
