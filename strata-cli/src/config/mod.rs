//! CLI configuration file support
//!
//! A TOML file mirrors the engine configuration plus CLI-only output
//! settings. Every section and field is optional; command-line flags win
//! over file values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strata_core::{DetectorConfig, EngineConfig};

use crate::error::{CliError, CliResult};

/// Top-level configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Token budget and overlap
    pub chunking: ChunkingSection,
    /// Structural detector toggles
    pub detector: DetectorConfig,
    /// Output defaults
    pub output: OutputSection,
}

/// `[chunking]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSection {
    /// Token budget per chunk
    pub max_tokens: usize,
    /// Tokens repeated between consecutive split chunks
    pub overlap_tokens: usize,
}

impl Default for ChunkingSection {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            max_tokens: engine.max_tokens,
            overlap_tokens: engine.overlap_tokens,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Default output format when `--format` is not given
    pub format: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}

impl CliConfig {
    /// Load and parse a TOML configuration file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            CliError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = toml::from_str(&raw).map_err(|e| {
            CliError::ConfigError(format!("invalid TOML in {}: {e}", path.display()))
        })?;
        Ok(config)
    }

    /// Project the file settings onto an engine configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_tokens: self.chunking.max_tokens,
            overlap_tokens: self.chunking.overlap_tokens,
            detector: self.detector.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_yields_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.chunking.max_tokens, 512);
        assert_eq!(config.chunking.overlap_tokens, 50);
        assert_eq!(config.output.format, "text");
        assert!(config.detector.list_items);
    }

    #[test]
    fn partial_sections_fill_in() {
        let raw = r#"
            [chunking]
            max_tokens = 128

            [detector]
            all_caps_headings = false
        "#;
        let config: CliConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.chunking.max_tokens, 128);
        assert_eq!(config.chunking.overlap_tokens, 50);
        assert!(!config.detector.all_caps_headings);
        assert!(config.detector.underlined_headings);
    }

    #[test]
    fn engine_config_projection() {
        let raw = r#"
            [chunking]
            max_tokens = 64
            overlap_tokens = 8
        "#;
        let config: CliConfig = toml::from_str(raw).unwrap();
        let engine = config.engine_config();
        assert_eq!(engine.max_tokens, 64);
        assert_eq!(engine.overlap_tokens, 8);
        assert!(engine.validate().is_ok());
    }

    #[test]
    fn load_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[chunking]\nmax_tokens = 99").unwrap();
        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.chunking.max_tokens, 99);
    }

    #[test]
    fn load_rejects_missing_file() {
        let result = CliConfig::load(Path::new("/nonexistent/strata.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "chunking = not valid").unwrap();
        assert!(CliConfig::load(file.path()).is_err());
    }
}
