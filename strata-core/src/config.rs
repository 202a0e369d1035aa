//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::{ChunkError, Result};

/// Per-heuristic toggles for the structural detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Setext-style headings underlined with `=` or `-`
    pub underlined_headings: bool,
    /// `1.2.3 Title` numbered section headings
    pub numbered_headings: bool,
    /// Short ALL-CAPS lines treated as headings
    pub all_caps_headings: bool,
    /// `#`-prefixed headings
    pub prefixed_headings: bool,
    /// Bullet and ordered list items
    pub list_items: bool,
    /// Triple-backtick fenced code blocks
    pub fenced_code: bool,
    /// Indentation-based code blocks
    pub indented_code: bool,
    /// Leading spaces per list nesting level
    pub indent_step: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            underlined_headings: true,
            numbered_headings: true,
            all_caps_headings: true,
            prefixed_headings: true,
            list_items: true,
            fenced_code: true,
            indented_code: true,
            indent_step: 2,
        }
    }
}

/// Configuration for the chunking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Token budget per chunk; must be positive
    pub max_tokens: usize,
    /// Tokens of trailing context repeated at the start of the next split
    /// chunk; must be strictly less than `max_tokens`
    pub overlap_tokens: usize,
    /// Structural detector settings
    pub detector: DetectorConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            overlap_tokens: 50,
            detector: DetectorConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Create a builder.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Fail-fast validation, applied at every engine entry point.
    pub fn validate(&self) -> Result<()> {
        if self.max_tokens == 0 {
            return Err(ChunkError::InvalidConfig(
                "max_tokens must be positive".to_string(),
            ));
        }
        if self.overlap_tokens >= self.max_tokens {
            return Err(ChunkError::InvalidConfig(format!(
                "overlap_tokens ({}) must be less than max_tokens ({})",
                self.overlap_tokens, self.max_tokens
            )));
        }
        if self.detector.indent_step == 0 {
            return Err(ChunkError::InvalidConfig(
                "detector.indent_step must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`EngineConfig`] with validation at `build`.
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the per-chunk token budget.
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Set the overlap carried between consecutive split chunks.
    pub fn overlap_tokens(mut self, overlap_tokens: usize) -> Self {
        self.config.overlap_tokens = overlap_tokens;
        self
    }

    /// Replace the detector settings wholesale.
    pub fn detector(mut self, detector: DetectorConfig) -> Self {
        self.config.detector = detector;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<EngineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_max_tokens_is_rejected() {
        let config = EngineConfig {
            max_tokens: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ChunkError::InvalidConfig(_))
        ));
    }

    #[test]
    fn overlap_must_be_less_than_budget() {
        let equal = EngineConfig {
            max_tokens: 100,
            overlap_tokens: 100,
            ..Default::default()
        };
        assert!(equal.validate().is_err());

        let over = EngineConfig {
            max_tokens: 100,
            overlap_tokens: 150,
            ..Default::default()
        };
        assert!(over.validate().is_err());

        let under = EngineConfig {
            max_tokens: 100,
            overlap_tokens: 99,
            ..Default::default()
        };
        assert!(under.validate().is_ok());
    }

    #[test]
    fn builder_validates_on_build() {
        let err = EngineConfig::builder()
            .max_tokens(10)
            .overlap_tokens(10)
            .build();
        assert!(err.is_err());

        let ok = EngineConfig::builder()
            .max_tokens(200)
            .overlap_tokens(20)
            .build()
            .unwrap();
        assert_eq!(ok.max_tokens, 200);
        assert_eq!(ok.overlap_tokens, 20);
    }

    #[test]
    fn detector_toggles_deserialize_with_defaults() {
        let config: EngineConfig = toml_like_json(r#"{"max_tokens": 64}"#);
        assert_eq!(config.max_tokens, 64);
        assert!(config.detector.all_caps_headings);
        assert_eq!(config.detector.indent_step, 2);
    }

    fn toml_like_json(raw: &str) -> EngineConfig {
        serde_json::from_str(raw).unwrap()
    }
}
