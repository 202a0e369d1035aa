//! CLI command implementations

use std::path::Path;

use clap::Subcommand;
use strata_core::{CharRatioCounter, ChunkEngine};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

pub mod chunk;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Chunk documents into hierarchical, token-bounded chunks
    Chunk(chunk::ChunkArgs),
    /// Chunk documents and report hierarchy and budget findings
    Validate(validate::ValidateArgs),
    /// List available components
    #[command(subcommand)]
    List(ListCommands),
}

/// Subcommands for listing available components
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available output formats
    Formats,
}

impl Commands {
    /// Execute the selected command.
    pub fn execute(&self) -> CliResult<()> {
        match self {
            Commands::Chunk(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::List(list) => list.execute(),
        }
    }
}

impl ListCommands {
    /// Execute the list subcommand.
    pub fn execute(&self) -> CliResult<()> {
        match self {
            ListCommands::Formats => {
                println!("Available output formats:");
                println!("  text - indented hierarchy overview (default)");
                println!("  json - full chunk records as one JSON document");
                Ok(())
            }
        }
    }
}

/// Initialize logging from the shared `--quiet`/`--verbose` flags.
pub(crate) fn init_logging(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

/// Build an engine from an optional config file plus flag overrides.
pub(crate) fn build_engine(
    config_path: Option<&Path>,
    max_tokens: Option<usize>,
    overlap_tokens: Option<usize>,
) -> CliResult<ChunkEngine> {
    let file = match config_path {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    let mut config = file.engine_config();
    if let Some(max) = max_tokens {
        config.max_tokens = max;
    }
    if let Some(overlap) = overlap_tokens {
        config.overlap_tokens = overlap;
    }

    ChunkEngine::new(config, CharRatioCounter::default())
        .map_err(|e| CliError::ConfigError(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_engine_applies_overrides() {
        let engine = build_engine(None, Some(128), Some(16)).unwrap();
        assert_eq!(engine.config().max_tokens, 128);
        assert_eq!(engine.config().overlap_tokens, 16);
    }

    #[test]
    fn build_engine_defaults_without_config() {
        let engine = build_engine(None, None, None).unwrap();
        assert_eq!(engine.config().max_tokens, 512);
        assert_eq!(engine.config().overlap_tokens, 50);
    }

    #[test]
    fn build_engine_rejects_invalid_overrides() {
        assert!(build_engine(None, Some(10), Some(10)).is_err());
        assert!(build_engine(None, Some(0), None).is_err());
    }
}
