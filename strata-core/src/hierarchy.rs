//! Hierarchy builder
//!
//! Computes depth and the root-first ancestor chain for every chunk by
//! walking declared parent links, and can materialize the inverse
//! parent-to-children view. An unresolvable parent stops the walk early and
//! records the partial chain; that chunk is an orphan, surfaced later by the
//! validator. A walk that exceeds [`MAX_ANCESTRY_STEPS`] is a cycle and
//! aborts the whole build with no partial result.

use std::collections::{HashMap, HashSet};

use crate::chunk::{AncestorChain, Chunk};
use crate::error::{ChunkError, Result};

/// Safety ceiling for parent-chain walks. Exceeding it means a cycle (or a
/// chain no real document produces) and is fatal.
pub const MAX_ANCESTRY_STEPS: usize = 1000;

/// Outcome of a single ancestry walk.
pub(crate) enum AncestryOutcome {
    /// Walk reached a root
    Complete(AncestorChain),
    /// Walk hit a parent id absent from the set; the chain is partial,
    /// ending at the dangling id
    Orphaned(AncestorChain),
    /// Walk exceeded [`MAX_ANCESTRY_STEPS`]
    CycleCeiling,
}

/// One recomputed-versus-stored discrepancy.
pub(crate) struct Inconsistency {
    pub chunk_id: String,
    pub kind: InconsistencyKind,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InconsistencyKind {
    Cycle,
    DepthMismatch,
    AncestryMismatch,
}

/// Walk a parent chain upward, accumulating ancestor ids root-first.
pub(crate) fn trace_ancestry(
    parents: &HashMap<&str, Option<&str>>,
    first_parent: Option<&str>,
) -> AncestryOutcome {
    let mut chain = AncestorChain::new();
    let mut cursor = first_parent;
    let mut steps = 0usize;

    while let Some(parent_id) = cursor {
        steps += 1;
        if steps > MAX_ANCESTRY_STEPS {
            return AncestryOutcome::CycleCeiling;
        }
        chain.insert(0, parent_id.to_string());
        match parents.get(parent_id) {
            Some(next) => cursor = *next,
            None => return AncestryOutcome::Orphaned(chain),
        }
    }
    AncestryOutcome::Complete(chain)
}

fn parent_lookup(chunks: &[Chunk]) -> HashMap<&str, Option<&str>> {
    chunks
        .iter()
        .map(|chunk| (chunk.id.as_str(), chunk.parent_id.as_deref()))
        .collect()
}

/// Compute depth and ancestor chain for every chunk in place.
///
/// Orphaned chunks keep the depth of their truncated walk, so
/// `ancestor_ids.len() == depth` holds for them too. On a cycle the error
/// propagates before any chunk is mutated.
pub fn build_hierarchy(chunks: &mut [Chunk]) -> Result<()> {
    let parents = parent_lookup(chunks);

    let mut resolved: Vec<AncestorChain> = Vec::with_capacity(chunks.len());
    for chunk in chunks.iter() {
        match trace_ancestry(&parents, chunk.parent_id.as_deref()) {
            AncestryOutcome::Complete(chain) | AncestryOutcome::Orphaned(chain) => {
                resolved.push(chain)
            }
            AncestryOutcome::CycleCeiling => {
                return Err(ChunkError::StructuralCycle {
                    chunk_id: chunk.id.clone(),
                    max_steps: MAX_ANCESTRY_STEPS,
                })
            }
        }
    }

    for (chunk, chain) in chunks.iter_mut().zip(resolved) {
        chunk.depth = chain.len() as u32;
        chunk.ancestor_ids = chain;
    }
    Ok(())
}

/// Materialize the parent-to-children view.
///
/// Idempotent: every children collection is cleared before repopulation, so
/// repeated calls converge on the same result.
pub fn populate_children(chunks: &mut [Chunk]) {
    for chunk in chunks.iter_mut() {
        chunk.children.clear();
    }

    let index: HashMap<String, usize> = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| (chunk.id.clone(), i))
        .collect();

    let links: Vec<(usize, String)> = chunks
        .iter()
        .filter_map(|chunk| {
            let parent_id = chunk.parent_id.as_ref()?;
            let parent_index = *index.get(parent_id)?;
            Some((parent_index, chunk.id.clone()))
        })
        .collect();

    for (parent_index, child_id) in links {
        chunks[parent_index].children.push(child_id);
    }
}

/// Chunks declaring no parent.
pub fn root_chunks(chunks: &[Chunk]) -> Vec<&Chunk> {
    chunks.iter().filter(|chunk| chunk.is_root()).collect()
}

/// Chunks whose id never appears as another chunk's parent.
pub fn leaf_chunks(chunks: &[Chunk]) -> Vec<&Chunk> {
    let referenced: HashSet<&str> = chunks
        .iter()
        .filter_map(|chunk| chunk.parent_id.as_deref())
        .collect();
    chunks
        .iter()
        .filter(|chunk| !referenced.contains(chunk.id.as_str()))
        .collect()
}

/// Recompute every chunk's ancestry independently and diff against stored
/// values.
pub(crate) fn audit_hierarchy(chunks: &[Chunk]) -> Vec<Inconsistency> {
    let parents = parent_lookup(chunks);
    let mut problems = Vec::new();

    for chunk in chunks {
        match trace_ancestry(&parents, chunk.parent_id.as_deref()) {
            AncestryOutcome::CycleCeiling => problems.push(Inconsistency {
                chunk_id: chunk.id.clone(),
                kind: InconsistencyKind::Cycle,
                detail: format!("parent chain exceeds {MAX_ANCESTRY_STEPS} steps"),
            }),
            AncestryOutcome::Complete(chain) | AncestryOutcome::Orphaned(chain) => {
                if chain.len() as u32 != chunk.depth {
                    problems.push(Inconsistency {
                        chunk_id: chunk.id.clone(),
                        kind: InconsistencyKind::DepthMismatch,
                        detail: format!(
                            "stored depth {} but recomputed {}",
                            chunk.depth,
                            chain.len()
                        ),
                    });
                }
                if chain != chunk.ancestor_ids {
                    problems.push(Inconsistency {
                        chunk_id: chunk.id.clone(),
                        kind: InconsistencyKind::AncestryMismatch,
                        detail: format!(
                            "stored ancestor chain {:?} but recomputed {:?}",
                            chunk.ancestor_ids, chain
                        ),
                    });
                }
            }
        }
    }
    problems
}

/// Human-readable hierarchy inconsistencies, empty when stored depth and
/// ancestor chains match an independent recomputation.
pub fn validate_hierarchy(chunks: &[Chunk]) -> Vec<String> {
    audit_hierarchy(chunks)
        .into_iter()
        .map(|problem| format!("chunk {}: {}", problem.chunk_id, problem.detail))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkKind;

    fn section(content: &str) -> Chunk {
        Chunk::new(ChunkKind::Section { level: 1 }, content)
    }

    fn child_of(parent: &Chunk, content: &str) -> Chunk {
        Chunk::with_parent(ChunkKind::Paragraph, content, &parent.id)
    }

    fn three_level_tree() -> Vec<Chunk> {
        let root = section("Root");
        let mid = Chunk::with_parent(ChunkKind::Section { level: 2 }, "Mid", &root.id);
        let leaf = child_of(&mid, "Leaf");
        vec![root, mid, leaf]
    }

    #[test]
    fn depths_and_ancestors_follow_parent_links() {
        let mut chunks = three_level_tree();
        build_hierarchy(&mut chunks).unwrap();

        assert_eq!(chunks[0].depth, 0);
        assert!(chunks[0].ancestor_ids.is_empty());

        assert_eq!(chunks[1].depth, 1);
        assert_eq!(chunks[1].ancestor_ids.as_slice(), &[chunks[0].id.clone()]);

        assert_eq!(chunks[2].depth, 2);
        assert_eq!(
            chunks[2].ancestor_ids.as_slice(),
            &[chunks[0].id.clone(), chunks[1].id.clone()]
        );
    }

    #[test]
    fn orphan_keeps_partial_chain() {
        let mut orphan = Chunk::new(ChunkKind::Paragraph, "stray");
        orphan.parent_id = Some("missing-parent".to_string());
        let mut chunks = vec![orphan];

        build_hierarchy(&mut chunks).unwrap();
        assert_eq!(chunks[0].depth, 1);
        assert_eq!(chunks[0].ancestor_ids.as_slice(), &["missing-parent"]);
    }

    #[test]
    fn two_chunk_cycle_is_fatal() {
        let mut a = Chunk::new(ChunkKind::Paragraph, "a");
        let mut b = Chunk::new(ChunkKind::Paragraph, "b");
        a.parent_id = Some(b.id.clone());
        b.parent_id = Some(a.id.clone());
        let mut chunks = vec![a, b];

        let err = build_hierarchy(&mut chunks).unwrap_err();
        assert!(matches!(err, ChunkError::StructuralCycle { .. }));
        // No partial mutation leaked
        assert_eq!(chunks[0].depth, 0);
        assert!(chunks[0].ancestor_ids.is_empty());
    }

    #[test]
    fn long_chain_past_ceiling_is_fatal() {
        let mut chunks: Vec<Chunk> = Vec::new();
        let mut previous: Option<String> = None;
        for i in 0..1500 {
            let mut chunk = Chunk::new(ChunkKind::Paragraph, format!("p{i}"));
            chunk.parent_id = previous.clone();
            previous = Some(chunk.id.clone());
            chunks.push(chunk);
        }
        assert!(matches!(
            build_hierarchy(&mut chunks),
            Err(ChunkError::StructuralCycle { .. })
        ));
    }

    #[test]
    fn chain_at_ceiling_is_allowed() {
        let mut chunks: Vec<Chunk> = Vec::new();
        let mut previous: Option<String> = None;
        for i in 0..=MAX_ANCESTRY_STEPS {
            let mut chunk = Chunk::new(ChunkKind::Paragraph, format!("p{i}"));
            chunk.parent_id = previous.clone();
            previous = Some(chunk.id.clone());
            chunks.push(chunk);
        }
        build_hierarchy(&mut chunks).unwrap();
        assert_eq!(chunks.last().unwrap().depth as usize, MAX_ANCESTRY_STEPS);
    }

    #[test]
    fn populate_children_matches_parent_relation() {
        let mut chunks = three_level_tree();
        populate_children(&mut chunks);
        populate_children(&mut chunks); // idempotent

        assert_eq!(chunks[0].children, vec![chunks[1].id.clone()]);
        assert_eq!(chunks[1].children, vec![chunks[2].id.clone()]);
        assert!(chunks[2].children.is_empty());
    }

    #[test]
    fn roots_and_leaves() {
        let chunks = three_level_tree();
        let roots = root_chunks(&chunks);
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].id, chunks[0].id);

        let leaves = leaf_chunks(&chunks);
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].id, chunks[2].id);
    }

    #[test]
    fn validate_hierarchy_reports_tampered_depth() {
        let mut chunks = three_level_tree();
        build_hierarchy(&mut chunks).unwrap();
        assert!(validate_hierarchy(&chunks).is_empty());

        chunks[2].depth = 7;
        let problems = validate_hierarchy(&chunks);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("stored depth 7"));
    }
}
