//! Token counting capability
//!
//! The engine never tokenizes text itself. Callers inject a [`TokenCounter`]
//! and the engine treats it as an opaque, pure cost function: deterministic
//! for a given text, with no guaranteed relationship to any external
//! tokenizer model.

/// An injected token-counting capability.
///
/// Implementations must be pure: the same text always yields the same count,
/// and counting has no side effects. The engine calls this from hot loops, so
/// implementations should be fast local computations, not network calls.
pub trait TokenCounter {
    /// Count the tokens in `text`.
    fn count(&self, text: &str) -> usize;
}

/// Approximates tokens as `ceil(chars / ratio)`.
///
/// A chars-per-token ratio of 4 tracks common BPE tokenizers closely enough
/// for budget enforcement on English prose.
#[derive(Debug, Clone, Copy)]
pub struct CharRatioCounter {
    chars_per_token: usize,
}

impl CharRatioCounter {
    /// Create a counter with an explicit chars-per-token ratio (minimum 1).
    pub fn new(chars_per_token: usize) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }
}

impl Default for CharRatioCounter {
    fn default() -> Self {
        Self::new(4)
    }
}

impl TokenCounter for CharRatioCounter {
    fn count(&self, text: &str) -> usize {
        text.chars().count().div_ceil(self.chars_per_token)
    }
}

/// Counts whitespace-delimited words as tokens.
///
/// Exact and easy to reason about, which makes it the counter of choice in
/// tests; too coarse for real embedding budgets.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceCounter;

impl TokenCounter for WhitespaceCounter {
    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

impl<F> TokenCounter for F
where
    F: Fn(&str) -> usize,
{
    fn count(&self, text: &str) -> usize {
        self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_ratio_rounds_up() {
        let counter = CharRatioCounter::new(4);
        assert_eq!(counter.count(""), 0);
        assert_eq!(counter.count("abc"), 1);
        assert_eq!(counter.count("abcd"), 1);
        assert_eq!(counter.count("abcde"), 2);
    }

    #[test]
    fn char_ratio_counts_chars_not_bytes() {
        let counter = CharRatioCounter::new(1);
        assert_eq!(counter.count("日本語"), 3);
    }

    #[test]
    fn whitespace_counter_splits_words() {
        let counter = WhitespaceCounter;
        assert_eq!(counter.count("one two  three\nfour"), 4);
        assert_eq!(counter.count("   "), 0);
    }

    #[test]
    fn closures_are_counters() {
        let counter = |text: &str| text.len();
        assert_eq!(TokenCounter::count(&counter, "abcd"), 4);
    }

    #[test]
    fn zero_ratio_is_clamped() {
        let counter = CharRatioCounter::new(0);
        assert_eq!(counter.count("ab"), 2);
    }
}
