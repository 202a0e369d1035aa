//! Structural detector
//!
//! Classifies a line-oriented text stream into typed segments using a
//! heuristic cascade. Detectors are pure functions of the form
//! `try_match(lines, at) -> Option<(Segment, consumed)>`, tried in strict
//! priority order by the driver, which owns the line cursor. First match
//! wins; the paragraph collector is the fallback and always matches.
//!
//! Heuristics are deliberately line-local: nothing looks more than one line
//! ahead except the heading underline check. False positives are an accepted
//! tradeoff; every segment carries a confidence score so callers can filter.

use serde::Serialize;

use crate::chunk::ListMarker;
use crate::config::DetectorConfig;

mod code;
mod heading;
mod list;
mod paragraph;

/// How a paragraph's end was decided. Diagnostic only; it never affects
/// splitting or hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphMethod {
    /// Terminated by a blank line or end of input
    DoubleNewline,
    /// A higher-priority detector matched the next line mid-flow
    IndentationChange,
    /// A higher-priority detector matched right after a complete sentence
    SentenceCompletion,
}

/// Typed payload of a detected segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// A heading with its detected level (1 = top)
    Heading {
        /// Heading level
        level: u8,
    },
    /// A single list entry
    ListItem {
        /// Marker style
        marker: ListMarker,
        /// Nesting level from leading indentation
        nesting: u8,
    },
    /// A code block, fenced or indented
    CodeBlock {
        /// Language token from the fence opening, if present
        language: Option<String>,
    },
    /// Prose fallback
    Paragraph {
        /// How the paragraph boundary was decided
        method: ParagraphMethod,
    },
}

/// Which heuristic produced a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Setext-style `=`/`-` underline
    UnderlinedHeading,
    /// `1.2.3 Title` numbered section
    NumberedSection,
    /// Short ALL-CAPS line
    AllCapsHeading,
    /// Leading `#` run
    PrefixedHeading,
    /// Bullet or ordered list marker
    ListMarker,
    /// Triple-backtick fence
    FencedCode,
    /// Indentation-based code run
    IndentedCode,
    /// Paragraph fallback
    ParagraphFallback,
}

/// A classified run of input lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// Typed payload
    pub kind: SegmentKind,
    /// Segment text with structural markers stripped
    pub text: String,
    /// Detection confidence in [0, 1]
    pub confidence: f32,
    /// Heuristic that matched
    pub heuristic: Heuristic,
}

/// Classify `text` into an ordered sequence of segments.
pub fn detect_segments(text: &str, config: &DetectorConfig) -> Vec<Segment> {
    let lines: Vec<&str> = text.lines().collect();
    let mut segments = Vec::new();
    let mut at = 0;

    while at < lines.len() {
        if lines[at].trim().is_empty() {
            at += 1;
            continue;
        }
        let (segment, consumed) = classify(&lines, at, config);
        debug_assert!(consumed > 0, "detector must consume at least one line");
        segments.push(segment);
        at += consumed;
    }

    segments
}

fn classify(lines: &[&str], at: usize, config: &DetectorConfig) -> (Segment, usize) {
    if let Some(hit) = match_structured(lines, at, config) {
        return hit;
    }
    paragraph::take_paragraph(lines, at, config)
}

/// Every detector above the paragraph fallback, in priority order. Also used
/// by the paragraph collector to decide where a paragraph must stop.
pub(crate) fn match_structured(
    lines: &[&str],
    at: usize,
    config: &DetectorConfig,
) -> Option<(Segment, usize)> {
    if config.underlined_headings {
        if let Some(hit) = heading::match_underlined(lines, at) {
            return Some(hit);
        }
    }
    if config.numbered_headings {
        if let Some(hit) = heading::match_numbered(lines[at]) {
            return Some(hit);
        }
    }
    if config.all_caps_headings {
        if let Some(hit) = heading::match_all_caps(lines[at]) {
            return Some(hit);
        }
    }
    if config.prefixed_headings {
        if let Some(hit) = heading::match_prefixed(lines[at]) {
            return Some(hit);
        }
    }
    if config.list_items {
        if let Some(hit) = list::match_item(lines[at], config.indent_step) {
            return Some(hit);
        }
    }
    if config.fenced_code {
        if let Some(hit) = code::match_fenced(lines, at) {
            return Some(hit);
        }
    }
    if config.indented_code {
        if let Some(hit) = code::match_indented(lines, at) {
            return Some(hit);
        }
    }
    None
}
