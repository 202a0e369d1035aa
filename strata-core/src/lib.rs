//! # strata-core
//!
//! Hierarchical, token-bounded document chunking for retrieval and embedding
//! pipelines.
//!
//! The engine ingests either raw text (classified by the built-in
//! [`detect`] heuristics) or pre-typed, parent-linked chunks from an
//! external extractor, and produces a flat chunk set where every chunk
//! carries its depth, root-first ancestor chain, document-order sequence
//! number, and quality metrics. Chunks over the token budget are replaced by
//! boundary-aware children with configurable overlap.
//!
//! ```
//! use strata_core::{ChunkEngine, EngineConfig, WhitespaceCounter};
//!
//! let config = EngineConfig::builder()
//!     .max_tokens(200)
//!     .overlap_tokens(20)
//!     .build()?;
//! let engine = ChunkEngine::new(config, WhitespaceCounter)?;
//!
//! let set = engine.chunk_text("Main\n====\n\nBody paragraph.")?;
//! assert_eq!(set.len(), 2);
//!
//! let report = engine.validate(&set);
//! assert!(report.is_valid);
//! # Ok::<(), strata_core::ChunkError>(())
//! ```
//!
//! Token counting is an injected capability ([`TokenCounter`]): the engine
//! treats it as an opaque, deterministic cost function and ships only
//! heuristic implementations. The pipeline is single-threaded and
//! synchronous per invocation and holds no process-wide state.

#![warn(missing_docs)]

pub mod chunk;
pub mod config;
pub mod detect;
pub mod engine;
pub mod error;
pub mod hierarchy;
pub mod metrics;
pub mod split;
pub mod tokens;
pub mod validate;

pub use chunk::{AncestorChain, Chunk, ChunkKind, ListMarker, QualityMetrics};
pub use config::{DetectorConfig, EngineConfig, EngineConfigBuilder};
pub use detect::{detect_segments, Heuristic, ParagraphMethod, Segment, SegmentKind};
pub use engine::{ChunkEngine, ChunkSet};
pub use error::{ChunkError, Result};
pub use hierarchy::{
    build_hierarchy, leaf_chunks, populate_children, root_chunks, validate_hierarchy,
    MAX_ANCESTRY_STEPS,
};
pub use metrics::compute_metrics;
pub use split::TokenSplitter;
pub use tokens::{CharRatioCounter, TokenCounter, WhitespaceCounter};
pub use validate::{validate, IssueCode, Severity, ValidationIssue, ValidationResult};

/// Chunk text with the default configuration and heuristic token counter.
pub fn chunk_text(text: &str) -> Result<ChunkSet> {
    ChunkEngine::with_defaults()?.chunk_text(text)
}
