use crate::samples::TagScheme;
use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Tags searched, in order, for a read's barcode.
    #[serde(default = "default_barcode_tags")]
    pub barcode_tags: Vec<String>,
    #[serde(default = "default_read_group_tag")]
    pub read_group_tag: String,
    /// Output name for reads without a donor when splitting by sample.
    #[serde(default = "default_unmapped_name")]
    pub unmapped_name: String,
    #[serde(default = "default_fastq_buffer_capacity")]
    pub fastq_buffer_capacity: usize,
}

fn default_barcode_tags() -> Vec<String> {
    vec!["CB".to_string(), "RX".to_string()]
}

fn default_read_group_tag() -> String {
    "RG".to_string()
}

fn default_unmapped_name() -> String {
    "unmapped".to_string()
}

fn default_fastq_buffer_capacity() -> usize {
    16 * 1024 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            barcode_tags: default_barcode_tags(),
            read_group_tag: default_read_group_tag(),
            unmapped_name: default_unmapped_name(),
            fastq_buffer_capacity: default_fastq_buffer_capacity(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "bamurai", "bamurai")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

fn tag_bytes(tag: &str) -> Result<[u8; 2]> {
    match tag.as_bytes() {
        &[a, b] if tag.is_ascii() => Ok([a, b]),
        _ => bail!("'{}' is not a two character SAM tag", tag),
    }
}

impl Config {
    /// Read the user config file, falling back to defaults when it is absent
    /// or cannot be parsed.
    pub fn load() -> Self {
        let Some(config_path) = config_path() else {
            return Config::default();
        };
        if !config_path.exists() {
            return Config::default();
        }

        match fs::read_to_string(&config_path)
            .map_err(anyhow::Error::from)
            .and_then(|content| Ok(toml::from_str::<Config>(&content)?))
        {
            Ok(config) => {
                log::debug!("Loaded configuration from {}", config_path.display());
                config
            }
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable config {}: {}",
                    config_path.display(),
                    e
                );
                Config::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = config_path() {
            if let Some(config_dir) = config_path.parent() {
                fs::create_dir_all(config_dir)?;
            }
            let content = toml::to_string_pretty(self)?;
            fs::write(&config_path, content)
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
        }
        Ok(())
    }

    pub fn tag_scheme(&self) -> Result<TagScheme> {
        let barcode_tags = self
            .barcode_tags
            .iter()
            .map(|tag| tag_bytes(tag))
            .collect::<Result<Vec<_>>>()
            .context("Invalid barcode_tags in configuration")?;
        if barcode_tags.is_empty() {
            bail!("barcode_tags in configuration must name at least one tag");
        }
        let read_group_tag =
            tag_bytes(&self.read_group_tag).context("Invalid read_group_tag in configuration")?;

        Ok(TagScheme {
            barcode_tags,
            read_group_tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tag_scheme() {
        let scheme = Config::default().tag_scheme().unwrap();
        assert_eq!(scheme, TagScheme::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("unmapped_name = \"none\"\n").unwrap();
        assert_eq!(config.unmapped_name, "none");
        assert_eq!(config.barcode_tags, default_barcode_tags());
        assert_eq!(config.fastq_buffer_capacity, 16 * 1024 * 1024);
    }

    #[test]
    fn test_bad_tags_are_rejected() {
        let config = Config {
            barcode_tags: vec!["CBX".to_string()],
            ..Config::default()
        };
        assert!(config.tag_scheme().is_err());

        let config = Config {
            barcode_tags: Vec::new(),
            ..Config::default()
        };
        assert!(config.tag_scheme().is_err());
    }
}
