//! List item detector
//!
//! Matches bullet markers (`-`, `*`, `•`) and ordered markers (`1.`, `2)`,
//! `a.`, `B)`). Nesting level is derived from leading spaces divided by the
//! configured indent step, floored.

use std::sync::LazyLock;

use regex::Regex;

use super::{Heuristic, Segment, SegmentKind};
use crate::chunk::ListMarker;

const CONFIDENCE_LIST: f32 = 0.90;

static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+|[A-Za-z])[.)]\s+(.*)$").expect("valid regex"));

pub(super) fn match_item(line: &str, indent_step: usize) -> Option<(Segment, usize)> {
    let leading_spaces = line.chars().take_while(|&c| c == ' ').count();
    let rest = line.trim_start();

    let (marker, content) = if let Some(content) = strip_bullet(rest) {
        (ListMarker::Bullet, content)
    } else if let Some(captures) = ORDERED_MARKER.captures(rest) {
        (
            ListMarker::Ordered,
            captures.get(1).expect("mandatory capture").as_str(),
        )
    } else {
        return None;
    };

    let nesting = (leading_spaces / indent_step.max(1)) as u8;

    Some((
        Segment {
            kind: SegmentKind::ListItem { marker, nesting },
            text: content.trim().to_string(),
            confidence: CONFIDENCE_LIST,
            heuristic: Heuristic::ListMarker,
        },
        1,
    ))
}

fn strip_bullet(rest: &str) -> Option<&str> {
    rest.strip_prefix("- ")
        .or_else(|| rest.strip_prefix("* "))
        .or_else(|| rest.strip_prefix("• "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(line: &str) -> (ListMarker, u8, String) {
        let (segment, consumed) = match_item(line, 2).unwrap();
        assert_eq!(consumed, 1);
        match segment.kind {
            SegmentKind::ListItem { marker, nesting } => (marker, nesting, segment.text),
            other => panic!("expected list item, got {other:?}"),
        }
    }

    #[test]
    fn dash_bullet() {
        let (marker, nesting, text) = item("- First point");
        assert_eq!(marker, ListMarker::Bullet);
        assert_eq!(nesting, 0);
        assert_eq!(text, "First point");
    }

    #[test]
    fn star_and_unicode_bullets() {
        assert_eq!(item("* starred").0, ListMarker::Bullet);
        assert_eq!(item("• dotted").0, ListMarker::Bullet);
    }

    #[test]
    fn ordered_markers() {
        assert_eq!(item("1. numbered paren").0, ListMarker::Ordered);
        assert_eq!(item("12) high number").0, ListMarker::Ordered);
        assert_eq!(item("a. lettered").0, ListMarker::Ordered);
        assert_eq!(item("B) capital letter").0, ListMarker::Ordered);
    }

    #[test]
    fn nesting_from_indentation() {
        assert_eq!(item("- zero").1, 0);
        assert_eq!(item("  - one").1, 1);
        assert_eq!(item("    - two").1, 2);
        assert_eq!(item("     - still two").1, 2); // floor of 5 / 2
    }

    #[test]
    fn custom_indent_step() {
        let (segment, _) = match_item("    - deep", 4).unwrap();
        assert_eq!(
            segment.kind,
            SegmentKind::ListItem {
                marker: ListMarker::Bullet,
                nesting: 1
            }
        );
    }

    #[test]
    fn bare_dash_is_not_an_item() {
        assert!(match_item("-", 2).is_none());
        assert!(match_item("----", 2).is_none());
        assert!(match_item("plain text", 2).is_none());
    }

    #[test]
    fn hyphenated_word_is_not_an_item() {
        assert!(match_item("-dash prefixed prose", 2).is_none());
    }
}
