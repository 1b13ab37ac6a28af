//! Configuration for report parsing
//!
//! Defaults match the stock BigFix web-report export. A TOML file can
//! override the target delimiter, the status markers and the remap rules.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::report::RemapRule;
use crate::status::Markers;

/// Parsing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Delimiter between group name and target in the target file
    #[serde(
        deserialize_with = "deserialize_delimiter",
        serialize_with = "serialize_delimiter"
    )]
    pub delimiter: u8,

    /// Record and cell tokens of the status export
    pub markers: Markers,

    /// Adjustments applied after merging, in order
    pub rules: Vec<RemapRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: b',',
            markers: Markers::default(),
            rules: RemapRule::defaults(),
        }
    }
}

fn deserialize_delimiter<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(serde::de::Error::custom(format!(
            "delimiter must be a single ASCII character, got '{}'",
            s
        ))),
    }
}

fn serialize_delimiter<S>(delimiter: &u8, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&char::from(*delimiter).to_string())
}

impl Config {
    /// Parse a config from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let Markers { record, cell_start, cell_end } = &self.markers;
        if record.is_empty() || cell_start.is_empty() || cell_end.is_empty() {
            anyhow::bail!("markers.record, markers.cell_start and markers.cell_end must not be empty");
        }
        Ok(())
    }
}

/// Path of the per-user config: ~/.bfstats/config.toml
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bfstats").join("config.toml"))
}

/// Load configuration
///
/// An explicit path must exist. Without one, ~/.bfstats/config.toml is used
/// if present, otherwise the built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match user_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("No user config found, using default config");
                return Ok(Config::default());
            }
        },
    };

    log::info!("Loading config from {}", path.display());
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Config::from_toml(&text).with_context(|| format!("Invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_full_config() {
        let text = r#"
delimiter = ";"

[markers]
record = "<TR"
cell_start = "<TD>"
cell_end = "</TD>"

[[rules]]
kind = "merge"
group = "Linux"
source = "Linux (legacy)"
rename = "Linux*"

[[rules]]
kind = "target_from_current"
group = "Lab"
"#;
        let config = Config::from_toml(text).unwrap();
        assert_eq!(config.delimiter, b';');
        assert_eq!(config.markers.record, "<TR");
        assert_eq!(config.markers.cell_end, "</TD>");
        assert_eq!(
            config.rules,
            vec![
                RemapRule::Merge {
                    group: "Linux".to_string(),
                    source: "Linux (legacy)".to_string(),
                    rename: "Linux*".to_string(),
                },
                RemapRule::TargetFromCurrent { group: "Lab".to_string() },
            ]
        );
    }

    #[test]
    fn test_partial_markers_keep_defaults() {
        let config = Config::from_toml("[markers]\nrecord = \"<row\"\n").unwrap();
        assert_eq!(config.markers.record, "<row");
        assert_eq!(config.markers.cell_start, "<td>");
        assert_eq!(config.rules, RemapRule::defaults());
    }

    #[test]
    fn test_empty_rules_disable_remapping() {
        let config = Config::from_toml("rules = []\n").unwrap();
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_invalid_delimiter_rejected() {
        assert!(Config::from_toml("delimiter = \"::\"").is_err());
        assert!(Config::from_toml("delimiter = \"\"").is_err());
        assert!(Config::from_toml("delimiter = \"é\"").is_err());
    }

    #[test]
    fn test_empty_marker_rejected() {
        assert!(Config::from_toml("[markers]\ncell_end = \"\"\n").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bfstats.toml");
        std::fs::write(&path, "delimiter = \"|\"\n").unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.delimiter, b'|');
    }

    #[test]
    fn test_load_missing_explicit_path_errors() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(Some(dir.path().join("missing.toml").as_path())).is_err());
    }
}
