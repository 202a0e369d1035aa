//! Quality metrics calculator

use crate::chunk::QualityMetrics;
use crate::tokens::TokenCounter;

/// Sentence-terminal punctuation, shared with the splitter and detector.
pub(crate) const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// True if `text` ends with sentence-terminal punctuation, ignoring trailing
/// whitespace and closing quotes or brackets.
pub fn ends_with_terminal(text: &str) -> bool {
    text.trim_end()
        .trim_end_matches(['"', '\'', ')', ']', '»'])
        .ends_with(SENTENCE_TERMINATORS)
}

/// Compute the base metrics record for a chunk's content.
///
/// `semantic_completeness` starts at 1.0 and the split flags at false; the
/// splitter overrides those for chunks it produces. `has_incomplete_table`
/// is owned by table-specific producers and only ever passed through.
pub fn compute_metrics(text: &str, counter: &dyn TokenCounter) -> QualityMetrics {
    QualityMetrics {
        token_count: counter.count(text),
        char_count: text.chars().count(),
        word_count: text.split_whitespace().count(),
        semantic_completeness: 1.0,
        was_split: false,
        has_truncated_sentence: false,
        has_incomplete_table: false,
    }
}
