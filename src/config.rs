//! Declarative project list (`fastly.json`).

use crate::error::{MirrorError, Result};
use crate::patch::PatchStep;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One upstream documentation project.
///
/// # Example JSON
///
/// ```json
/// {
///   "Paper": {
///     "repo": "https://github.com/PaperMC/docs.git",
///     "commit": "main",
///     "install": "pnpm install",
///     "build": "pnpm build",
///     "output": "dist",
///     "patcher": [
///       { "type": "PaperPatcher" },
///       { "type": "URLPatcher", "rules": [
///         { "from": "https://docs.papermc.io", "to": "https://fastly.8aka.cn/Paper" }
///       ] }
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Git remote to clone.
    pub repo: String,

    /// Branch, tag or commit to build.
    pub commit: String,

    /// Shell command installing build dependencies.
    pub install: String,

    /// Shell command building the static site.
    pub build: String,

    /// Build output directory, relative to the checkout.
    pub output: String,

    /// Patch steps, applied in order before installing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patcher: Vec<PatchStep>,

    /// Display name on the landing page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Upstream site address, shown by the landing front-end.
    #[serde(default, rename = "rawUrl", skip_serializing_if = "Option::is_none")]
    pub raw_url: Option<String>,
}

impl ProjectConfig {
    /// The display name, falling back to the project key.
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(key)
    }
}

/// All projects, keyed by name, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MirrorConfig {
    pub projects: IndexMap<String, ProjectConfig>,
}

impl MirrorConfig {
    /// Loads the config, choosing YAML for `.yml`/`.yaml` files and JSON otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml" | "yaml") => Self::from_yaml(path),
            _ => Self::from_json(path),
        }
    }

    /// Load config from a JSON file.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_json::from_str(&content).map_err(|e| {
            MirrorError::InvalidConfig(format!("Failed to parse JSON config: {}", e))
        })
    }

    /// Load config from a YAML file.
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_yaml::from_str(&content).map_err(|e| {
            MirrorError::InvalidConfig(format!("Failed to parse YAML config: {}", e))
        })
    }

    /// Serializes the config as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn get(&self, name: &str) -> Option<&ProjectConfig> {
        self.projects.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ProjectConfig)> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Restricts the config to `names`, keeping file order.
    ///
    /// An empty selection keeps every project. Unknown names are an error.
    pub fn select(&self, names: &[String]) -> Result<MirrorConfig> {
        if names.is_empty() {
            return Ok(self.clone());
        }
        if let Some(missing) = names.iter().find(|n| !self.projects.contains_key(n.as_str())) {
            return Err(MirrorError::InvalidConfig(format!(
                "Unknown project: {}",
                missing
            )));
        }
        let projects = self
            .projects
            .iter()
            .filter(|(key, _)| names.contains(key))
            .map(|(key, project)| (key.clone(), project.clone()))
            .collect();
        Ok(MirrorConfig { projects })
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        MirrorError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read config file {}: {}", path.display(), e),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::Rule;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
  "Purpur": {
    "repo": "https://github.com/PurpurMC/PurpurDocs.git",
    "commit": "main",
    "install": "pip install -r requirements.txt",
    "build": "mkdocs build",
    "output": "site",
    "patcher": [{ "type": "PurpurPatcher" }]
  },
  "Paper": {
    "repo": "https://github.com/PaperMC/docs.git",
    "commit": "0123abc",
    "install": "pnpm install",
    "build": "pnpm build",
    "output": "dist",
    "name": "PaperMC",
    "rawUrl": "https://docs.papermc.io",
    "patcher": [
      { "type": "PaperPatcher" },
      { "type": "URLPatcher", "rules": [{ "from": "https://docs.papermc.io", "to": "https://fastly.8aka.cn" }] }
    ]
  }
}"#;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_json_preserves_order() {
        let dir = TempDir::new().unwrap();
        let config = MirrorConfig::load(write(&dir, "fastly.json", SAMPLE)).unwrap();

        let keys: Vec<_> = config.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Purpur", "Paper"]);

        let paper = config.get("Paper").unwrap();
        assert_eq!(paper.display_name("Paper"), "PaperMC");
        assert_eq!(paper.raw_url.as_deref(), Some("https://docs.papermc.io"));
        assert_eq!(paper.patcher.len(), 2);
        assert_eq!(
            paper.patcher[1].rules,
            vec![Rule::new("https://docs.papermc.io", "https://fastly.8aka.cn")]
        );

        let purpur = config.get("Purpur").unwrap();
        assert_eq!(purpur.display_name("Purpur"), "Purpur");
    }

    #[test]
    fn test_load_yaml() {
        let dir = TempDir::new().unwrap();
        let yaml = "\
Pumpkin:
  repo: https://github.com/Pumpkin-MC/Pumpkin-Website.git
  commit: master
  install: npm ci
  build: npm run docs:build
  output: .vitepress/dist
  patcher:
    - type: pumpkin-docs
";
        let config = MirrorConfig::load(write(&dir, "mirror.yaml", yaml)).unwrap();
        assert_eq!(config.len(), 1);
        assert_eq!(config.get("Pumpkin").unwrap().patcher[0].kind, "pumpkin-docs");
    }

    #[test]
    fn test_missing_field_is_invalid_config() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "fastly.json", r#"{"Paper": {"repo": "x"}}"#);
        let err = MirrorConfig::load(path).unwrap_err();
        assert!(matches!(err, MirrorError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = MirrorConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, MirrorError::Io(_)));
    }

    #[test]
    fn test_empty_config() {
        let dir = TempDir::new().unwrap();
        let config = MirrorConfig::load(write(&dir, "fastly.json", "{}")).unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_select_keeps_file_order() {
        let dir = TempDir::new().unwrap();
        let config = MirrorConfig::load(write(&dir, "fastly.json", SAMPLE)).unwrap();

        let selected = config
            .select(&["Paper".to_string(), "Purpur".to_string()])
            .unwrap();
        let keys: Vec<_> = selected.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Purpur", "Paper"]);

        assert_eq!(config.select(&[]).unwrap(), config);
        assert!(matches!(
            config.select(&["Geyser".to_string()]),
            Err(MirrorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_legacy_keys() {
        let dir = TempDir::new().unwrap();
        let config = MirrorConfig::load(write(&dir, "fastly.json", SAMPLE)).unwrap();
        let json = config.to_json().unwrap();

        assert!(json.contains("\"rawUrl\""));
        assert!(json.contains("\"type\": \"URLPatcher\""));
        let back: MirrorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
