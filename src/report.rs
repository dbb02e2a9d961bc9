use crate::matcher::match_rule;
use crate::rule::Rule;
use crate::validate::ValidationError;
use std::collections::HashSet;

/// Returned verbatim when the sample text is blank; no matching happens.
pub const EMPTY_SAMPLE_HINT: &str = "Enter sample text to preview which rules would match.";

/// Context window on each side of a match in a snippet, in characters.
const SNIPPET_CONTEXT_CHARS: usize = 30;

/// At most this many invalid rules are listed before "(N more)".
const MAX_LISTED_ERRORS: usize = 5;

/// Assemble the human-readable test report for one evaluation.
///
/// Deterministic and pure: identical inputs always yield byte-identical
/// output. Rules whose rows appear in `errors` are excluded from matching;
/// everything else is evaluated in rule order, first match per rule.
pub fn build_report(rules: &[Rule], errors: &[ValidationError], sample_text: &str) -> String {
    if sample_text.trim().is_empty() {
        return EMPTY_SAMPLE_HINT.to_string();
    }

    let mut out = String::new();

    if !errors.is_empty() {
        out.push_str("Invalid REGEX rules (ignored):\n");
        for err in errors.iter().take(MAX_LISTED_ERRORS) {
            out.push_str(&format!("  row {}: {}\n", err.row_index + 1, err.label));
        }
        if errors.len() > MAX_LISTED_ERRORS {
            out.push_str(&format!("  ({} more)\n", errors.len() - MAX_LISTED_ERRORS));
        }
        out.push('\n');
    }

    let invalid_rows: HashSet<usize> = errors.iter().map(|e| e.row_index).collect();

    let mut match_lines: Vec<String> = Vec::new();
    for (row, rule) in rules.iter().enumerate() {
        if invalid_rows.contains(&row) {
            continue;
        }
        if let Some(m) = match_rule(rule, sample_text) {
            let snippet = snippet_around(sample_text, m.start, m.end);
            match_lines.push(format!(
                "- {} [{}]: {}",
                rule.effective_label(),
                rule.kind.tag(),
                snippet
            ));
        }
    }

    if match_lines.is_empty() {
        out.push_str("No matches.");
    } else {
        out.push_str(&format!("Matches ({}):\n", match_lines.len()));
        for line in &match_lines {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }

    out.trim().to_string()
}

/// Extract a one-line context snippet around a match span.
///
/// Takes up to 30 characters of context on each side, collapses whitespace
/// runs in the context (not in the match itself) to single spaces, and wraps
/// the matched segment in `[` `]`.
pub fn snippet_around(text: &str, start: usize, end: usize) -> String {
    let start = floor_char_boundary(text, start.min(text.len()));
    let end = floor_char_boundary(text, end.min(text.len()));
    let (start, end) = if end < start { (start, start) } else { (start, end) };

    let ctx_start = text[..start]
        .char_indices()
        .rev()
        .take(SNIPPET_CONTEXT_CHARS)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start);

    let ctx_end = text[end..]
        .char_indices()
        .nth(SNIPPET_CONTEXT_CHARS)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    let before = collapse_whitespace(&text[ctx_start..start]);
    let after = collapse_whitespace(&text[end..ctx_end]);

    format!("{}[{}]{}", before, &text[start..end], after)
}

/// Collapse every whitespace run to a single ASCII space.
fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_ws = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_ws {
                out.push(' ');
            }
            in_ws = true;
        } else {
            out.push(c);
            in_ws = false;
        }
    }
    out
}

fn floor_char_boundary(text: &str, mut i: usize) -> usize {
    while i > 0 && !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}
