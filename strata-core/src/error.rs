//! Engine error types

use thiserror::Error;

/// Errors raised by the chunking engine.
///
/// Both variants are fatal and synchronous: the computation is deterministic,
/// so there is nothing for a caller to retry. Non-fatal conditions (orphaned
/// parents, oversized leaves) are reported through the validator instead.
#[derive(Error, Debug)]
pub enum ChunkError {
    /// A parent chain exceeded the ancestry safety ceiling, which means the
    /// chunk set contains a cycle (or an absurdly deep chain). The hierarchy
    /// build aborts without returning a partial result.
    #[error("parent chain starting at chunk {chunk_id} exceeded {max_steps} steps: circular reference suspected")]
    StructuralCycle {
        /// Chunk whose ancestry walk hit the ceiling
        chunk_id: String,
        /// The ceiling that was exceeded
        max_steps: usize,
    },

    /// Configuration rejected at entry (non-positive token budget, or an
    /// overlap that does not leave room for fresh content).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, ChunkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_error_names_the_chunk_and_ceiling() {
        let err = ChunkError::StructuralCycle {
            chunk_id: "c-42".to_string(),
            max_steps: 1000,
        };
        let msg = err.to_string();
        assert!(msg.contains("c-42"));
        assert!(msg.contains("1000"));
    }

    #[test]
    fn invalid_config_error_display() {
        let err = ChunkError::InvalidConfig("max_tokens must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: max_tokens must be positive"
        );
    }
}
