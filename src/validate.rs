use crate::matcher::compile_regex;
use crate::rule::{MatchKind, Rule};
use std::fmt;

/// Inline rendering truncates the compiler message at this many characters.
const SUMMARY_MESSAGE_CHARS: usize = 180;

/// A row-scoped, recoverable report that an enabled regex rule's pattern
/// failed to compile. Never fatal: other rules keep evaluating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub row_index: usize,
    pub label: String,
    pub pattern: String,
    pub message: String,
}

impl ValidationError {
    /// Short single-line form for inline display, message truncated.
    pub fn summary(&self) -> String {
        let mut message: String = self.message.chars().take(SUMMARY_MESSAGE_CHARS).collect();
        if self.message.chars().count() > SUMMARY_MESSAGE_CHARS {
            message.push_str("...");
        }
        let message = message.replace('\n', " ");
        format!("row {}: {}: {}", self.row_index + 1, self.label, message)
    }

    /// Long multi-line form for a dialog, untruncated, with the raw pattern.
    pub fn detail(&self) -> String {
        format!(
            "row {}: {}\npattern: {}\n{}",
            self.row_index + 1,
            self.label,
            self.pattern,
            self.message
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Compile every enabled regex rule with a non-blank pattern, in rule order,
/// collecting one error per failing row. Word rules and disabled or blank
/// rules are skipped.
pub fn validate(rules: &[Rule]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (row_index, rule) in rules.iter().enumerate() {
        if !rule.enabled || rule.kind != MatchKind::Regex || rule.pattern.trim().is_empty() {
            continue;
        }
        if let Err(e) = compile_regex(&rule.pattern, rule.case_sensitive) {
            errors.push(ValidationError {
                row_index,
                label: rule.effective_label().to_string(),
                pattern: rule.pattern.clone(),
                message: e.to_string(),
            });
        }
    }
    errors
}

/// First compile failure in rule order, if any.
///
/// The settings-commit workflow calls this as a hard gate: a `Some` result
/// rejects the commit and is shown to the user.
pub fn first_error(rules: &[Rule]) -> Option<ValidationError> {
    validate(rules).into_iter().next()
}
