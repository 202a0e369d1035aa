//! The chunk data model
//!
//! A [`Chunk`] is the unit everything else operates on: detectors and
//! extractors create them, the hierarchy builder fills in depth and ancestry,
//! the splitter replaces oversized ones, and the validator audits the final
//! set. Chunk kinds are a closed tagged union rather than a type hierarchy;
//! shared fields live on the record and variant-specific payloads on the tag.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

/// Root-first chain of ancestor chunk ids.
///
/// Document trees are shallow; four inline slots cover almost every real
/// chunk without a heap allocation.
pub type AncestorChain = SmallVec<[String; 4]>;

/// Marker style of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMarker {
    /// `-`, `*`, or a unicode bullet
    Bullet,
    /// `1.`, `2)`, `a.`, `B)` and similar
    Ordered,
}

/// Closed set of chunk kinds with variant-specific payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChunkKind {
    /// A heading that opens a section; children attach beneath it
    Section {
        /// Heading level, 1 = top level
        level: u8,
    },
    /// Running prose
    Paragraph,
    /// A single list entry
    ListItem {
        /// Marker style
        marker: ListMarker,
        /// Nesting level, 0 = outermost
        nesting: u8,
    },
    /// Source code, fenced or indented
    CodeBlock {
        /// Language token from a fence opening, if any
        language: Option<String>,
    },
    /// Block quotation
    Quote,
    /// Tabular content
    Table,
    /// Image reference or caption
    Image,
}

impl ChunkKind {
    /// Default free-form type tag for this kind.
    pub fn default_specific_type(&self) -> &'static str {
        match self {
            ChunkKind::Section { .. } => "section",
            ChunkKind::Paragraph => "paragraph",
            ChunkKind::ListItem { .. } => "list_item",
            ChunkKind::CodeBlock { .. } => "code_block",
            ChunkKind::Quote => "quote",
            ChunkKind::Table => "table",
            ChunkKind::Image => "image",
        }
    }

    /// True for kinds that can carry child chunks.
    pub fn is_container(&self) -> bool {
        matches!(self, ChunkKind::Section { .. } | ChunkKind::ListItem { .. })
    }
}

/// Per-chunk quality measurements.
///
/// Counts are derived from the content; the semantic flags are set by the
/// producer that knows the context (the splitter for truncation, table
/// extractors for incomplete tables) and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Token count per the injected counter
    pub token_count: usize,
    /// Character count (scalar values, not bytes)
    pub char_count: usize,
    /// Whitespace-delimited word count
    pub word_count: usize,
    /// Completeness score in [0, 1]; 1.0 unless a split forced a rough cut
    pub semantic_completeness: f32,
    /// Whether this chunk was produced by splitting an oversized chunk
    pub was_split: bool,
    /// Whether the content stops mid-sentence
    pub has_truncated_sentence: bool,
    /// Whether a table producer marked the content as cut off
    pub has_incomplete_table: bool,
}

/// A unit of document content with identity, linkage, and metrics.
///
/// `content` and `kind` are immutable after creation. `depth` and
/// `ancestor_ids` are owned by the hierarchy builder, `children` by
/// `populate_children`, and `metrics` by the metrics pass; no field is
/// written by more than one component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique identifier
    pub id: String,
    /// Declared parent, if any; may be unresolvable (orphan)
    pub parent_id: Option<String>,
    /// Kind tag with variant payload
    #[serde(flatten)]
    pub kind: ChunkKind,
    /// Free-form refinement of the kind, e.g. "front_matter"
    pub specific_type: String,
    /// Raw text content
    pub content: String,
    /// Distance from the root; 0 for roots
    pub depth: u32,
    /// Ancestor ids, root-first, `len == depth`
    pub ancestor_ids: AncestorChain,
    /// Document-order position, strictly increasing across the final set
    pub sequence: u64,
    /// Quality metrics, filled by the metrics pass
    pub metrics: Option<QualityMetrics>,
    /// Materialized child ids; empty until `populate_children` runs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl Chunk {
    /// Create a root-level chunk with a fresh id.
    pub fn new(kind: ChunkKind, content: impl Into<String>) -> Self {
        let specific_type = kind.default_specific_type().to_string();
        Self {
            id: Uuid::new_v4().to_string(),
            parent_id: None,
            kind,
            specific_type,
            content: content.into(),
            depth: 0,
            ancestor_ids: AncestorChain::new(),
            sequence: 0,
            metrics: None,
            children: Vec::new(),
        }
    }

    /// Create a chunk linked to a parent.
    pub fn with_parent(kind: ChunkKind, content: impl Into<String>, parent_id: &str) -> Self {
        let mut chunk = Self::new(kind, content);
        chunk.parent_id = Some(parent_id.to_string());
        chunk
    }

    /// True if this chunk declares no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_chunk_gets_unique_id_and_default_tag() {
        let a = Chunk::new(ChunkKind::Paragraph, "one");
        let b = Chunk::new(ChunkKind::Paragraph, "two");
        assert_ne!(a.id, b.id);
        assert_eq!(a.specific_type, "paragraph");
        assert!(a.is_root());
        assert_eq!(a.depth, 0);
        assert!(a.ancestor_ids.is_empty());
    }

    #[test]
    fn with_parent_links_to_parent() {
        let parent = Chunk::new(ChunkKind::Section { level: 1 }, "Title");
        let child = Chunk::with_parent(ChunkKind::Paragraph, "body", &parent.id);
        assert_eq!(child.parent_id.as_deref(), Some(parent.id.as_str()));
        assert!(!child.is_root());
    }

    #[test]
    fn container_kinds() {
        assert!(ChunkKind::Section { level: 2 }.is_container());
        assert!(ChunkKind::ListItem {
            marker: ListMarker::Bullet,
            nesting: 0
        }
        .is_container());
        assert!(!ChunkKind::Paragraph.is_container());
        assert!(!ChunkKind::CodeBlock { language: None }.is_container());
    }

    #[test]
    fn chunk_round_trips_through_json() {
        let mut chunk = Chunk::new(
            ChunkKind::CodeBlock {
                language: Some("rust".to_string()),
            },
            "fn main() {}",
        );
        chunk.specific_type = "example".to_string();
        let json = serde_json::to_string(&chunk).unwrap();
        let back: Chunk = serde_json::from_str(&json).unwrap();
        assert_eq!(chunk, back);
    }

    #[test]
    fn kind_tag_is_flattened_in_json() {
        let chunk = Chunk::new(ChunkKind::Section { level: 3 }, "Heading");
        let value: serde_json::Value = serde_json::to_value(&chunk).unwrap();
        assert_eq!(value["kind"], "section");
        assert_eq!(value["level"], 3);
    }
}
