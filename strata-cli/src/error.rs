//! CLI error types
//!
//! Commands bubble everything up as `anyhow::Error`. `CliError` covers the
//! failures the CLI layer detects itself, so exit messages stay uniform
//! across subcommands; engine errors are wrapped rather than re-modeled.

use std::fmt;

/// Failures detected by the CLI layer.
#[derive(Debug)]
pub enum CliError {
    /// An input path that does not exist
    FileNotFound(String),
    /// A config file or flag combination the engine rejected
    ConfigError(String),
    /// The engine refused the document
    ChunkingError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ChunkingError(msg) => write!(f, "Chunking error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_name_the_failure() {
        let cases = [
            (
                CliError::FileNotFound("doc.txt".to_string()),
                "File not found: doc.txt",
            ),
            (
                CliError::ConfigError("overlap too large".to_string()),
                "Configuration error: overlap too large",
            ),
            (
                CliError::ChunkingError("cycle detected".to_string()),
                "Chunking error: cycle detected",
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn converts_into_anyhow_keeping_the_message() {
        let err: anyhow::Error = CliError::FileNotFound("doc.txt".to_string()).into();
        assert!(err.to_string().contains("doc.txt"));
        assert!(err.downcast_ref::<CliError>().is_some());
    }
}
