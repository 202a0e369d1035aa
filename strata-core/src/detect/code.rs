//! Code block detectors
//!
//! Fenced blocks are delimiter-matched and unambiguous. Indented blocks are
//! heuristic: a run of deeply indented lines only counts as code if it shows
//! at least one code-like token, otherwise it falls through to the paragraph
//! collector.

use std::sync::LazyLock;

use regex::Regex;

use super::{Heuristic, Segment, SegmentKind};

const CONFIDENCE_FENCED: f32 = 1.0;
const CONFIDENCE_INDENTED: f32 = 0.75;

const FENCE: &str = "```";

/// Minimum consecutive indented lines for an indented block.
const MIN_INDENTED_LINES: usize = 2;

/// Identifier immediately followed by an opening brace or parenthesis.
static CODE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*\s*[({]").expect("valid regex"));

const CODE_KEYWORDS: &[&str] = &[
    "fn", "let", "impl", "struct", "enum", "return", "def", "class", "import", "function", "var",
    "const", "public", "private", "void",
];

/// Triple-backtick fenced block. The opening line is the fence plus an
/// optional language token; the block runs to the matching closing fence or,
/// if none exists, to the end of input.
pub(super) fn match_fenced(lines: &[&str], at: usize) -> Option<(Segment, usize)> {
    let opening = lines[at].trim();
    let after_fence = opening.strip_prefix(FENCE)?;
    let language = after_fence
        .split_whitespace()
        .next()
        .map(|token| token.to_string());

    let closing = lines[at + 1..]
        .iter()
        .position(|line| line.trim() == FENCE)
        .map(|offset| at + 1 + offset);

    let body_end = closing.unwrap_or(lines.len());
    let text = lines[at + 1..body_end].join("\n");
    let consumed = match closing {
        Some(close) => close - at + 1,
        None => lines.len() - at,
    };

    Some((
        Segment {
            kind: SegmentKind::CodeBlock { language },
            text,
            confidence: CONFIDENCE_FENCED,
            heuristic: Heuristic::FencedCode,
        },
        consumed,
    ))
}

/// Two or more consecutive lines indented by at least four spaces or a tab,
/// validated by the presence of a code-like token.
pub(super) fn match_indented(lines: &[&str], at: usize) -> Option<(Segment, usize)> {
    let mut end = at;
    while end < lines.len() && is_indented(lines[end]) {
        end += 1;
    }
    if end - at < MIN_INDENTED_LINES {
        return None;
    }

    let dedented: Vec<&str> = lines[at..end].iter().map(|line| dedent(line)).collect();
    let text = dedented.join("\n");
    if !looks_like_code(&text) {
        return None;
    }

    Some((
        Segment {
            kind: SegmentKind::CodeBlock { language: None },
            text,
            confidence: CONFIDENCE_INDENTED,
            heuristic: Heuristic::IndentedCode,
        },
        end - at,
    ))
}

fn is_indented(line: &str) -> bool {
    !line.trim().is_empty() && (line.starts_with("    ") || line.starts_with('\t'))
}

fn dedent(line: &str) -> &str {
    line.strip_prefix("    ")
        .or_else(|| line.strip_prefix('\t'))
        .unwrap_or(line)
}

fn looks_like_code(text: &str) -> bool {
    if CODE_TOKEN.is_match(text) {
        return true;
    }
    if text.lines().any(|line| line.trim_end().ends_with(';')) {
        return true;
    }
    text.split_whitespace()
        .any(|word| CODE_KEYWORDS.contains(&word))
}
