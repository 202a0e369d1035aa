//! Paragraph fallback
//!
//! Collects consecutive non-blank lines that no higher-priority detector
//! claims, joining them with single spaces. Always matches at least the
//! current line, so the cascade can never fail to make progress.

use super::{Heuristic, ParagraphMethod, Segment, SegmentKind};
use crate::config::DetectorConfig;
use crate::metrics::ends_with_terminal;

pub(super) fn take_paragraph(
    lines: &[&str],
    at: usize,
    config: &DetectorConfig,
) -> (Segment, usize) {
    let mut collected = vec![lines[at].trim()];
    let mut end = at + 1;
    let mut method = ParagraphMethod::DoubleNewline;

    while end < lines.len() {
        if lines[end].trim().is_empty() {
            break;
        }
        if super::match_structured(lines, end, config).is_some() {
            let last = collected.last().expect("collected is never empty");
            method = if ends_with_terminal(last) {
                ParagraphMethod::SentenceCompletion
            } else {
                ParagraphMethod::IndentationChange
            };
            break;
        }
        collected.push(lines[end].trim());
        end += 1;
    }

    let segment = Segment {
        kind: SegmentKind::Paragraph { method },
        text: collected.join(" "),
        confidence: 1.0,
        heuristic: Heuristic::ParagraphFallback,
    };
    (segment, end - at)
}
