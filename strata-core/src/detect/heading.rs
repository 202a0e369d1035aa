//! Heading detectors
//!
//! Four heuristics, in the cascade's priority order: setext-style underlines,
//! numbered sections, ALL-CAPS lines, and `#`-prefixed lines. Each returns
//! the heading text with markers stripped plus a fixed confidence.

use std::sync::LazyLock;

use regex::Regex;

use super::{Heuristic, Segment, SegmentKind};

const CONFIDENCE_UNDERLINE_EQ: f32 = 0.95;
const CONFIDENCE_UNDERLINE_DASH: f32 = 0.90;
const CONFIDENCE_NUMBERED: f32 = 0.85;
const CONFIDENCE_ALL_CAPS: f32 = 0.70;
const CONFIDENCE_PREFIXED: f32 = 0.75;

/// Underline must be at least this long.
const MIN_UNDERLINE_LEN: usize = 3;

/// Tolerated relative difference between heading and underline length.
const UNDERLINE_LEN_TOLERANCE: f64 = 0.2;

static NUMBERED_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)*)\.?\s+\S.*$").expect("valid regex"));

/// Setext-style heading: a text line underlined by `=` (level 1) or `-`
/// (level 2). The only detector that looks one line ahead.
pub(super) fn match_underlined(lines: &[&str], at: usize) -> Option<(Segment, usize)> {
    let heading = lines[at].trim();
    let underline = lines.get(at + 1)?.trim();

    if heading.is_empty() || underline.chars().count() < MIN_UNDERLINE_LEN {
        return None;
    }
    let underline_char = underline.chars().next()?;
    if underline_char != '=' && underline_char != '-' {
        return None;
    }
    if !underline.chars().all(|c| c == underline_char) {
        return None;
    }
    // A run of '=' or '-' cannot itself be a heading
    if heading.chars().all(|c| c == '=' || c == '-') {
        return None;
    }

    let heading_len = heading.chars().count() as f64;
    let underline_len = underline.chars().count() as f64;
    if (underline_len - heading_len).abs() > heading_len * UNDERLINE_LEN_TOLERANCE {
        return None;
    }

    let (level, confidence) = if underline_char == '=' {
        (1, CONFIDENCE_UNDERLINE_EQ)
    } else {
        (2, CONFIDENCE_UNDERLINE_DASH)
    };

    Some((
        Segment {
            kind: SegmentKind::Heading { level },
            text: heading.to_string(),
            confidence,
            heuristic: Heuristic::UnderlinedHeading,
        },
        2,
    ))
}

/// Numbered section heading, e.g. `2.1.3 Wire format`. Level is the dot
/// count of the section number plus one. Anchored at column zero so indented
/// ordered list items fall through to the list detector.
pub(super) fn match_numbered(line: &str) -> Option<(Segment, usize)> {
    let captures = NUMBERED_SECTION.captures(line)?;
    let number = captures.get(1).expect("mandatory capture").as_str();
    let level = number.matches('.').count() as u8 + 1;

    Some((
        Segment {
            kind: SegmentKind::Heading { level },
            text: line.trim().to_string(),
            confidence: CONFIDENCE_NUMBERED,
            heuristic: Heuristic::NumberedSection,
        },
        1,
    ))
}

/// ALL-CAPS heading. The length window and alphabetic-majority requirement
/// keep short acronyms and long shouted prose from triggering.
pub(super) fn match_all_caps(line: &str) -> Option<(Segment, usize)> {
    let text = line.trim();
    let len = text.chars().count();
    if !(4..=100).contains(&len) {
        return None;
    }

    let alphabetic = text.chars().filter(|c| c.is_alphabetic()).count();
    if alphabetic * 2 <= len {
        return None;
    }
    if text.chars().any(|c| c.is_alphabetic() && !c.is_uppercase()) {
        return None;
    }

    Some((
        Segment {
            kind: SegmentKind::Heading { level: 1 },
            text: text.to_string(),
            confidence: CONFIDENCE_ALL_CAPS,
            heuristic: Heuristic::AllCapsHeading,
        },
        1,
    ))
}

/// `#`-prefixed heading; level is the run length, capped at 6.
pub(super) fn match_prefixed(line: &str) -> Option<(Segment, usize)> {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if hashes == 0 {
        return None;
    }
    let rest = &trimmed[hashes..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }

    Some((
        Segment {
            kind: SegmentKind::Heading {
                level: hashes.min(6) as u8,
            },
            text: text.to_string(),
            confidence: CONFIDENCE_PREFIXED,
            heuristic: Heuristic::PrefixedHeading,
        },
        1,
    ))
}
