//! Project configuration.
//!
//! TOML file with per-section defaults; every field is optional in the file
//! and falls back to the documented default, so an empty file is a valid
//! config.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub suggest: SuggestConfig,
    #[serde(default)]
    pub checks: ChecksConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            suggest: SuggestConfig::default(),
            checks: ChecksConfig::default(),
        }
    }
}

/// Suggestion engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Maximum number of suggestions surfaced per request.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
        }
    }
}

/// Final-check settings applied to newly created content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksConfig {
    /// Check texts applied, in order, to every new content record.
    #[serde(default = "default_final_checks")]
    pub defaults: Vec<String>,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            defaults: default_final_checks(),
        }
    }
}

const fn default_max_suggestions() -> usize {
    2
}

fn default_final_checks() -> Vec<String> {
    [
        "script proofread",
        "thumbnail ready",
        "description written",
        "link verified",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

impl ProjectConfig {
    /// Load config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parse config {}", path.display()))
    }

    /// Write config as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let rendered = toml::to_string_pretty(self).context("serialize config")?;
        std::fs::write(path, rendered).with_context(|| format!("write config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectConfig;

    #[test]
    fn defaults_are_sensible() {
        let config = ProjectConfig::default();
        assert_eq!(config.suggest.max_suggestions, 2);
        assert_eq!(config.checks.defaults.len(), 4);
    }

    #[test]
    fn empty_file_parses_to_defaults() {
        let config: ProjectConfig = toml::from_str("").expect("parse empty");
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: ProjectConfig =
            toml::from_str("[suggest]\nmax_suggestions = 5\n").expect("parse");
        assert_eq!(config.suggest.max_suggestions, 5);
        assert_eq!(config.checks, ProjectConfig::default().checks);
    }

    #[test]
    fn save_load_roundtrips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("slate.toml");

        let mut config = ProjectConfig::default();
        config.suggest.max_suggestions = 7;
        config.checks.defaults = vec!["captions reviewed".to_string()];
        config.save(&path).expect("save");

        let loaded = ProjectConfig::load(&path).expect("load");
        assert_eq!(loaded, config);
    }
}
