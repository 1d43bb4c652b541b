use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_DATA_DIR: &str = "data/monsters";
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_MEDIA_PREFIX: &str = "/monsters";

/// Where the roster reads definitions and media from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct RosterConfig {
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub media_url_prefix: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            media_url_prefix: DEFAULT_MEDIA_PREFIX.to_string(),
        }
    }
}

impl RosterConfig {
    /// Load from a JSON file, or YAML when the extension is `.yaml`/`.yml`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read roster config: {}", path.display()))?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        let cfg = if is_yaml {
            serde_yaml::from_str(&text)
                .with_context(|| format!("failed to parse roster config YAML: {}", path.display()))?
        } else {
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse roster config JSON: {}", path.display()))?
        };
        Ok(cfg)
    }

    /// Parse an inline JSON config; an empty string yields the defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text).context("failed to parse roster config JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_and_json_fill_missing_keys_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("roster.yml");
        fs::write(&yaml, "data_dir: fixtures/monsters\n").unwrap();
        let cfg = RosterConfig::load(&yaml).unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("fixtures/monsters"));
        assert_eq!(cfg.public_dir, PathBuf::from("public"));

        let json = dir.path().join("roster.json");
        fs::write(&json, r#"{"public_dir":"static","media_url_prefix":"/m"}"#).unwrap();
        let cfg = RosterConfig::load(&json).unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("data/monsters"));
        assert_eq!(cfg.media_url_prefix, "/m");
    }

    #[test]
    fn unreadable_config_reports_the_path() {
        let err = RosterConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/not/here.json"));
    }

    #[test]
    fn empty_inline_json_is_default() {
        assert_eq!(RosterConfig::from_json("  ").unwrap(), RosterConfig::default());
    }
}
