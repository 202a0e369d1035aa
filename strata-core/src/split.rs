//! Token-bounded splitter
//!
//! Replaces an oversized chunk with an ordered run of children that each fit
//! the token budget. Content is decomposed through a boundary cascade
//! (paragraph, sentence, phrase, word): each unit still over budget is
//! re-split at the next finer level, so the final unit list is as coarse as
//! the budget allows. Units are then packed greedily, and each new chunk is
//! seeded with the trailing overlap of the one just closed, trimmed to whole
//! units and never mid-word. The budget is enforced on the joined text a
//! group materializes to, so the counter's cost need not be additive over
//! concatenation.
//!
//! One relaxation: a single word whose own cost exceeds the budget is
//! emitted as its own over-limit chunk instead of raising.

use uuid::Uuid;

use crate::chunk::Chunk;
use crate::error::Result;
use crate::metrics::{compute_metrics, ends_with_terminal, SENTENCE_TERMINATORS};
use crate::tokens::TokenCounter;

/// Completeness score for a chunk cut at phrase or word granularity.
const REDUCED_COMPLETENESS: f32 = 0.7;

/// Boundary level at which a unit was finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Granularity {
    Paragraph,
    Sentence,
    Phrase,
    Word,
}

impl Granularity {
    fn finer(self) -> Option<Granularity> {
        match self {
            Granularity::Paragraph => Some(Granularity::Sentence),
            Granularity::Sentence => Some(Granularity::Phrase),
            Granularity::Phrase => Some(Granularity::Word),
            Granularity::Word => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Unit {
    text: String,
    tokens: usize,
    granularity: Granularity,
}

/// Splits oversized chunks under a token budget with boundary-aware overlap.
pub struct TokenSplitter<'a> {
    counter: &'a dyn TokenCounter,
    max_tokens: usize,
    overlap_tokens: usize,
}

impl<'a> TokenSplitter<'a> {
    /// Create a splitter; fails fast on an invalid budget/overlap pair.
    pub fn new(
        counter: &'a dyn TokenCounter,
        max_tokens: usize,
        overlap_tokens: usize,
    ) -> Result<Self> {
        crate::config::EngineConfig {
            max_tokens,
            overlap_tokens,
            ..Default::default()
        }
        .validate()?;
        Ok(Self {
            counter,
            max_tokens,
            overlap_tokens,
        })
    }

    /// Whether a chunk exceeds the budget and must be replaced.
    pub fn needs_split(&self, chunk: &Chunk) -> bool {
        self.counter.count(&chunk.content) > self.max_tokens
    }

    /// Split `original` into ordered children that inherit its parent link,
    /// depth, and ancestry. Sequence numbers are drawn from `next_sequence`.
    /// The original must not appear in the final set alongside the children.
    pub fn split(&self, original: &Chunk, next_sequence: &mut u64) -> Vec<Chunk> {
        let units = self.decompose(&original.content);
        let groups = self.pack(units);

        groups
            .into_iter()
            .map(|group| self.materialize(original, group, next_sequence))
            .collect()
    }

    /// Decompose content into boundary units, refining only units that are
    /// over budget.
    fn decompose(&self, content: &str) -> Vec<Unit> {
        let mut units = Vec::new();
        for paragraph in split_paragraphs(content) {
            self.refine(paragraph, Granularity::Paragraph, &mut units);
        }
        units
    }

    fn refine(&self, text: &str, granularity: Granularity, out: &mut Vec<Unit>) {
        let tokens = self.counter.count(text);
        if tokens <= self.max_tokens {
            out.push(Unit {
                text: text.to_string(),
                tokens,
                granularity,
            });
            return;
        }
        match granularity.finer() {
            Some(finer) => {
                for part in split_at(text, finer) {
                    self.refine(part, finer, out);
                }
            }
            // Indivisible over-limit word: emit rather than error
            None => out.push(Unit {
                text: text.to_string(),
                tokens,
                granularity,
            }),
        }
    }

    /// Greedy packing with trailing-overlap seeding.
    ///
    /// The budget is charged against the exact text a group will join to,
    /// never a sum of cached per-unit counts: separators and concatenation
    /// can change the cost under a non-additive counter.
    fn pack(&self, units: Vec<Unit>) -> Vec<Vec<Unit>> {
        let mut groups: Vec<Vec<Unit>> = Vec::new();
        let mut current: Vec<Unit> = Vec::new();
        let mut current_text = String::new();
        // Leading units of `current` that are carried-over overlap
        let mut seed_len = 0usize;

        for unit in units {
            if current.len() > seed_len && self.over_budget(&current_text, &unit) {
                let seed = self.overlap_tail(&current);
                groups.push(std::mem::take(&mut current));
                seed_len = seed.len();
                current = seed;
                current_text = join_units(&current);
            }
            // Overlap is best-effort: give it back if it crowds out fresh content
            while seed_len > 0 && self.over_budget(&current_text, &unit) {
                current.remove(0);
                seed_len -= 1;
                current_text = join_units(&current);
            }
            current_text = append_unit(current_text, &unit);
            current.push(unit);
        }

        // The tail always holds at least one fresh unit by construction
        if current.len() > seed_len {
            groups.push(current);
        }
        groups
    }

    /// Whether appending `unit` would push the joined group over budget.
    fn over_budget(&self, current_text: &str, unit: &Unit) -> bool {
        let prospective = append_unit(current_text.to_string(), unit);
        self.counter.count(&prospective) > self.max_tokens
    }

    /// Trailing whole units worth at most `overlap_tokens`, oldest first.
    fn overlap_tail(&self, group: &[Unit]) -> Vec<Unit> {
        if self.overlap_tokens == 0 {
            return Vec::new();
        }
        let mut total = 0usize;
        let mut seed: Vec<Unit> = Vec::new();
        for unit in group.iter().rev() {
            if total + unit.tokens > self.overlap_tokens {
                break;
            }
            total += unit.tokens;
            seed.push(unit.clone());
        }
        seed.reverse();
        seed
    }

    fn materialize(&self, original: &Chunk, group: Vec<Unit>, next_sequence: &mut u64) -> Chunk {
        let content = join_units(&group);
        let clean_cut = matches!(
            group.last().map(|u| u.granularity),
            Some(Granularity::Paragraph) | Some(Granularity::Sentence)
        ) || ends_with_terminal(&content);

        let mut metrics = compute_metrics(&content, self.counter);
        metrics.was_split = true;
        metrics.semantic_completeness = if clean_cut { 1.0 } else { REDUCED_COMPLETENESS };
        metrics.has_truncated_sentence = !ends_with_terminal(&content);
        metrics.has_incomplete_table = original
            .metrics
            .as_ref()
            .is_some_and(|m| m.has_incomplete_table);

        let sequence = *next_sequence;
        *next_sequence += 1;

        Chunk {
            id: Uuid::new_v4().to_string(),
            parent_id: original.parent_id.clone(),
            kind: original.kind.clone(),
            specific_type: original.specific_type.clone(),
            content,
            depth: original.depth,
            ancestor_ids: original.ancestor_ids.clone(),
            sequence,
            metrics: Some(metrics),
            children: Vec::new(),
        }
    }
}

fn split_at(text: &str, granularity: Granularity) -> Vec<&str> {
    match granularity {
        Granularity::Paragraph => split_paragraphs(text),
        Granularity::Sentence => split_sentences(text),
        Granularity::Phrase => split_phrases(text),
        Granularity::Word => text.split_whitespace().collect(),
    }
}

fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Split after `.`/`!`/`?` followed by whitespace and a capital letter, or at
/// end of text. Runs of terminators (`...`, `?!`) stay with their sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        if !SENTENCE_TERMINATORS.contains(&chars[i].1) {
            i += 1;
            continue;
        }
        let mut after_run = i + 1;
        while after_run < chars.len() && SENTENCE_TERMINATORS.contains(&chars[after_run].1) {
            after_run += 1;
        }
        let mut after_space = after_run;
        while after_space < chars.len() && chars[after_space].1.is_whitespace() {
            after_space += 1;
        }

        if after_space > after_run && after_space < chars.len() && chars[after_space].1.is_uppercase()
        {
            let end = if after_run < chars.len() {
                chars[after_run].0
            } else {
                text.len()
            };
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = chars[after_space].0;
            i = after_space;
        } else {
            i = after_run;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

/// Split after `,` and `;`, keeping the delimiter with its phrase.
fn split_phrases(text: &str) -> Vec<&str> {
    let mut phrases = Vec::new();
    let mut start = 0usize;
    for (i, ch) in text.char_indices() {
        if ch == ',' || ch == ';' {
            let end = i + ch.len_utf8();
            let phrase = text[start..end].trim();
            if !phrase.is_empty() {
                phrases.push(phrase);
            }
            start = end;
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        phrases.push(tail);
    }
    phrases
}

/// Extend joined group text with one more unit. Paragraph units are
/// separated by blank lines, everything finer by a single space.
fn append_unit(mut text: String, unit: &Unit) -> String {
    if !text.is_empty() {
        if unit.granularity == Granularity::Paragraph {
            text.push_str("\n\n");
        } else {
            text.push(' ');
        }
    }
    text.push_str(&unit.text);
    text
}

fn join_units(units: &[Unit]) -> String {
    units
        .iter()
        .fold(String::new(), |text, unit| append_unit(text, unit))
}
