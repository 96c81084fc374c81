use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Output format for translated graphs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full graph as JSON.
    #[default]
    Json,
    /// One line of node counts per translated unit.
    Summary,
}

/// Top-level argus configuration, matching `argus.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArgusConfig {
    #[serde(default)]
    pub translation: TranslationSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationSection {
    /// Source language front end to use.
    pub language: String,
}

impl Default for TranslationSection {
    fn default() -> Self {
        Self {
            language: "java".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: false,
        }
    }
}

impl ArgusConfig {
    /// Load configuration. An explicitly given path must exist; otherwise
    /// `./argus.toml` is used when present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = Path::new("argus.toml");
                if !default.exists() {
                    return Ok(Self::default());
                }
                default.to_path_buf()
            }
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        if config.translation.language != "java" {
            anyhow::bail!(
                "unsupported language `{}` (only `java` is available)",
                config.translation.language
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_file() {
        let config = ArgusConfig::load(None).unwrap();
        assert_eq!(config.translation.language, "java");
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn parses_partial_config() {
        let config: ArgusConfig =
            toml::from_str("[output]\nformat = \"summary\"\npretty = true\n").unwrap();
        assert_eq!(config.output.format, OutputFormat::Summary);
        assert!(config.output.pretty);
        assert_eq!(config.translation.language, "java");
    }

    #[test]
    fn rejects_unknown_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[translation]\nlanguage = \"cobol\"\n").unwrap();
        let err = ArgusConfig::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("unsupported language"));
    }
}
