//! Engine facade
//!
//! Wires the passes together: detect, assemble parent links, build the
//! hierarchy, replace oversized chunks, annotate metrics. Each call owns its
//! working state, so concurrent use across independent documents is safe by
//! construction.

use serde::Serialize;

use crate::chunk::{Chunk, ChunkKind};
use crate::config::EngineConfig;
use crate::detect::{detect_segments, Segment, SegmentKind};
use crate::error::Result;
use crate::hierarchy::{build_hierarchy, leaf_chunks, populate_children, root_chunks};
use crate::metrics::compute_metrics;
use crate::split::TokenSplitter;
use crate::tokens::{CharRatioCounter, TokenCounter};
use crate::validate::{validate, ValidationResult};

/// The final flat chunk collection for one document.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkSet {
    /// Chunks in document order
    pub chunks: Vec<Chunk>,
}

impl ChunkSet {
    /// Number of chunks in the set.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True if the set holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Look up a chunk by id.
    pub fn get(&self, id: &str) -> Option<&Chunk> {
        self.chunks.iter().find(|chunk| chunk.id == id)
    }

    /// Chunks declaring no parent.
    pub fn roots(&self) -> Vec<&Chunk> {
        root_chunks(&self.chunks)
    }

    /// Chunks no other chunk points at.
    pub fn leaves(&self) -> Vec<&Chunk> {
        leaf_chunks(&self.chunks)
    }

    /// Materialize the parent-to-children view on every chunk.
    pub fn populate_children(&mut self) {
        populate_children(&mut self.chunks);
    }
}

/// Main entry point: a configured chunking pipeline with an injected token
/// counter.
pub struct ChunkEngine {
    config: EngineConfig,
    counter: Box<dyn TokenCounter>,
}

impl ChunkEngine {
    /// Create an engine; the configuration is validated fail-fast.
    pub fn new(config: EngineConfig, counter: impl TokenCounter + 'static) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            counter: Box::new(counter),
        })
    }

    /// Default configuration with the chars-per-token heuristic counter.
    pub fn with_defaults() -> Result<Self> {
        Self::new(EngineConfig::default(), CharRatioCounter::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Chunk unstructured text: classify lines, link the resulting segments
    /// into a tree, then run the shared pipeline.
    pub fn chunk_text(&self, text: &str) -> Result<ChunkSet> {
        let segments = detect_segments(text, &self.config.detector);
        let chunks = assemble(segments);
        self.process_chunks(chunks)
    }

    /// Run the pipeline over pre-typed, parent-linked chunks from an
    /// external extractor: hierarchy, splitting, metrics.
    ///
    /// Returns either a complete internally consistent set or an error with
    /// no partial result.
    pub fn process_chunks(&self, mut chunks: Vec<Chunk>) -> Result<ChunkSet> {
        build_hierarchy(&mut chunks)?;

        let splitter = TokenSplitter::new(
            self.counter.as_ref(),
            self.config.max_tokens,
            self.config.overlap_tokens,
        )?;

        let mut sequence = 0u64;
        let mut finals = Vec::with_capacity(chunks.len());
        for mut chunk in chunks {
            if splitter.needs_split(&chunk) {
                // The oversized original is replaced, never emitted
                finals.extend(splitter.split(&chunk, &mut sequence));
            } else {
                chunk.sequence = sequence;
                sequence += 1;
                if chunk.metrics.is_none() {
                    chunk.metrics = Some(compute_metrics(&chunk.content, self.counter.as_ref()));
                }
                finals.push(chunk);
            }
        }

        Ok(ChunkSet { chunks: finals })
    }

    /// Validate a finished set against this engine's budget.
    pub fn validate(&self, set: &ChunkSet) -> ValidationResult {
        validate(&set.chunks, self.config.max_tokens, self.counter.as_ref())
    }
}

impl Default for ChunkEngine {
    fn default() -> Self {
        Self::with_defaults().expect("default configuration is valid")
    }
}

/// Turn detected segments into parent-linked chunks.
///
/// Headings open sections on a level stack: a level-L heading becomes a
/// child of the nearest open heading of a shallower level. Non-heading
/// segments attach to the innermost open section; nested list items attach
/// to the nearest shallower item of the current list run.
fn assemble(segments: Vec<Segment>) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity(segments.len());
    let mut sections: Vec<(u8, String)> = Vec::new();
    let mut list_run: Vec<(u8, String)> = Vec::new();

    for segment in segments {
        let chunk = match segment.kind {
            SegmentKind::Heading { level } => {
                while sections.last().is_some_and(|(open, _)| *open >= level) {
                    sections.pop();
                }
                list_run.clear();
                let mut chunk = Chunk::new(ChunkKind::Section { level }, segment.text);
                chunk.parent_id = sections.last().map(|(_, id)| id.clone());
                sections.push((level, chunk.id.clone()));
                chunk
            }
            SegmentKind::ListItem { marker, nesting } => {
                while list_run.last().is_some_and(|(open, _)| *open >= nesting) {
                    list_run.pop();
                }
                let parent = list_run
                    .last()
                    .map(|(_, id)| id.clone())
                    .or_else(|| sections.last().map(|(_, id)| id.clone()));
                let mut chunk = Chunk::new(ChunkKind::ListItem { marker, nesting }, segment.text);
                chunk.parent_id = parent;
                list_run.push((nesting, chunk.id.clone()));
                chunk
            }
            SegmentKind::CodeBlock { language } => {
                list_run.clear();
                let mut chunk = Chunk::new(ChunkKind::CodeBlock { language }, segment.text);
                chunk.parent_id = sections.last().map(|(_, id)| id.clone());
                chunk
            }
            SegmentKind::Paragraph { .. } => {
                list_run.clear();
                let mut chunk = Chunk::new(ChunkKind::Paragraph, segment.text);
                chunk.parent_id = sections.last().map(|(_, id)| id.clone());
                chunk
            }
        };
        chunks.push(chunk);
    }
    chunks
}
