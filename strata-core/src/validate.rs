//! Chunk set validator
//!
//! A post-hoc scan over the final chunk set, independent of the hierarchy
//! builder's own cycle guard. Produces a structured report rather than
//! raising: every finding is an issue with a severity and a stable code, and
//! `is_valid` is simply "no issues recorded".

use serde::Serialize;

use crate::chunk::Chunk;
use crate::hierarchy::{audit_hierarchy, InconsistencyKind};
use crate::tokens::TokenCounter;

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Suspicious but processable
    Warning,
    /// Internal inconsistency
    Error,
}

/// Stable machine-readable issue codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    /// Declared parent id absent from the set
    OrphanedChunk,
    /// Parent chain exceeds the ancestry ceiling
    CircularReference,
    /// Stored depth or ancestor chain disagrees with recomputation
    HierarchyMismatch,
    /// Token count above the configured budget after splitting
    OversizedChunk,
    /// Content empty or whitespace only
    EmptyChunk,
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    /// Severity of the finding
    pub severity: Severity,
    /// Stable code for filtering
    pub code: IssueCode,
    /// Offending chunk, when attributable
    pub chunk_id: Option<String>,
    /// Human-readable description
    pub message: String,
}

/// Result of validating a chunk set.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// True iff no issues were recorded
    pub is_valid: bool,
    /// All findings, in scan order
    pub issues: Vec<ValidationIssue>,
    /// Convenience roll-up over [`IssueCode::OrphanedChunk`]
    pub has_orphaned_chunks: bool,
    /// Convenience roll-up over [`IssueCode::CircularReference`]
    pub has_circular_references: bool,
}

impl ValidationResult {
    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let has_orphaned_chunks = issues
            .iter()
            .any(|issue| issue.code == IssueCode::OrphanedChunk);
        let has_circular_references = issues
            .iter()
            .any(|issue| issue.code == IssueCode::CircularReference);
        Self {
            is_valid: issues.is_empty(),
            has_orphaned_chunks,
            has_circular_references,
            issues,
        }
    }
}

/// Scan `chunks` for orphaned parents, hierarchy inconsistencies, and size
/// policy violations against `max_tokens`.
pub fn validate(chunks: &[Chunk], max_tokens: usize, counter: &dyn TokenCounter) -> ValidationResult {
    let mut issues = Vec::new();

    check_orphans(chunks, &mut issues);
    check_hierarchy(chunks, &mut issues);
    check_sizes(chunks, max_tokens, counter, &mut issues);

    ValidationResult::from_issues(issues)
}

fn check_orphans(chunks: &[Chunk], issues: &mut Vec<ValidationIssue>) {
    let ids: std::collections::HashSet<&str> =
        chunks.iter().map(|chunk| chunk.id.as_str()).collect();

    for chunk in chunks {
        if let Some(parent_id) = chunk.parent_id.as_deref() {
            if !ids.contains(parent_id) {
                issues.push(ValidationIssue {
                    severity: Severity::Warning,
                    code: IssueCode::OrphanedChunk,
                    chunk_id: Some(chunk.id.clone()),
                    message: format!("parent {parent_id} not present in the chunk set"),
                });
            }
        }
    }
}

fn check_hierarchy(chunks: &[Chunk], issues: &mut Vec<ValidationIssue>) {
    for problem in audit_hierarchy(chunks) {
        let (severity, code) = match problem.kind {
            InconsistencyKind::Cycle => (Severity::Error, IssueCode::CircularReference),
            InconsistencyKind::DepthMismatch | InconsistencyKind::AncestryMismatch => {
                (Severity::Error, IssueCode::HierarchyMismatch)
            }
        };
        issues.push(ValidationIssue {
            severity,
            code,
            chunk_id: Some(problem.chunk_id),
            message: problem.detail,
        });
    }
}

fn check_sizes(
    chunks: &[Chunk],
    max_tokens: usize,
    counter: &dyn TokenCounter,
    issues: &mut Vec<ValidationIssue>,
) {
    for chunk in chunks {
        let tokens = chunk
            .metrics
            .as_ref()
            .map(|m| m.token_count)
            .unwrap_or_else(|| counter.count(&chunk.content));

        if tokens > max_tokens {
            issues.push(ValidationIssue {
                severity: Severity::Warning,
                code: IssueCode::OversizedChunk,
                chunk_id: Some(chunk.id.clone()),
                message: format!("{tokens} tokens exceeds the budget of {max_tokens}"),
            });
        }
        if chunk.content.trim().is_empty() {
            issues.push(ValidationIssue {
                severity: Severity::Warning,
                code: IssueCode::EmptyChunk,
                chunk_id: Some(chunk.id.clone()),
                message: "content is empty".to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkKind;
    use crate::hierarchy::build_hierarchy;
    use crate::tokens::WhitespaceCounter;

    fn valid_pair() -> Vec<Chunk> {
        let root = Chunk::new(ChunkKind::Section { level: 1 }, "Title");
        let child = Chunk::with_parent(ChunkKind::Paragraph, "Body text here.", &root.id);
        let mut chunks = vec![root, child];
        build_hierarchy(&mut chunks).unwrap();
        chunks
    }

    #[test]
    fn consistent_set_is_valid() {
        let chunks = valid_pair();
        let result = validate(&chunks, 100, &WhitespaceCounter);
        assert!(result.is_valid);
        assert!(result.issues.is_empty());
        assert!(!result.has_orphaned_chunks);
        assert!(!result.has_circular_references);
    }

    #[test]
    fn dangling_parent_is_an_orphan_warning() {
        let mut chunks = valid_pair();
        let mut stray = Chunk::new(ChunkKind::Paragraph, "stray");
        stray.parent_id = Some("no-such-id".to_string());
        stray.depth = 1;
        stray.ancestor_ids = std::iter::once("no-such-id".to_string()).collect();
        chunks.push(stray);

        let result = validate(&chunks, 100, &WhitespaceCounter);
        assert!(!result.is_valid);
        assert!(result.has_orphaned_chunks);
        let orphan_issues: Vec<_> = result
            .issues
            .iter()
            .filter(|i| i.code == IssueCode::OrphanedChunk)
            .collect();
        assert_eq!(orphan_issues.len(), 1);
        assert_eq!(orphan_issues[0].severity, Severity::Warning);
    }

    #[test]
    fn tampered_depth_is_a_hierarchy_error() {
        let mut chunks = valid_pair();
        chunks[1].depth = 9;
        let result = validate(&chunks, 100, &WhitespaceCounter);
        assert!(!result.is_valid);
        assert!(result
            .issues
            .iter()
            .any(|i| i.code == IssueCode::HierarchyMismatch && i.severity == Severity::Error));
    }

    #[test]
    fn cycle_sets_circular_flag() {
        let mut a = Chunk::new(ChunkKind::Paragraph, "a");
        let mut b = Chunk::new(ChunkKind::Paragraph, "b");
        a.parent_id = Some(b.id.clone());
        b.parent_id = Some(a.id.clone());

        let result = validate(&[a, b], 100, &WhitespaceCounter);
        assert!(!result.is_valid);
        assert!(result.has_circular_references);
    }

    #[test]
    fn oversized_and_empty_chunks_warn() {
        let big = Chunk::new(ChunkKind::Paragraph, "one two three four five");
        let empty = Chunk::new(ChunkKind::Paragraph, "   ");
        let result = validate(&[big, empty], 3, &WhitespaceCounter);

        assert!(!result.is_valid);
        assert!(result
            .issues
            .iter()
            .any(|i| i.code == IssueCode::OversizedChunk));
        assert!(result.issues.iter().any(|i| i.code == IssueCode::EmptyChunk));
        // Size findings are warnings, not errors
        assert!(result
            .issues
            .iter()
            .all(|i| i.severity == Severity::Warning));
    }
}
