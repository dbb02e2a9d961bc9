use crate::rule::{MatchKind, Rule};
use crate::tokenize::tokenize;
use regex::RegexBuilder;

/// A half-open byte span in the source text where a rule matched.
///
/// At most one is produced per rule per evaluation: the first occurrence
/// wins, no attempt is made to find a "best" or longest match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    pub start: usize,
    pub end: usize,
}

/// Compile a regex pattern with the engine's flag policy: Unicode-aware
/// case folding is always on, case-insensitivity follows the rule flag.
pub fn compile_regex(pattern: &str, case_sensitive: bool) -> Result<regex::Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .unicode(true)
        .case_insensitive(!case_sensitive)
        .build()
}

/// Evaluate one rule against one text buffer.
///
/// Disabled rules and rules with a blank pattern yield `None` without any
/// evaluation. A regex rule whose pattern fails to compile also yields
/// `None` here; compile failures surface through the validator, not the
/// matcher.
///
/// For a case-insensitive substring rule the span is computed in a
/// lowercased copy of the text. A few non-ASCII characters change byte
/// length when lowercased (e.g. `İ`), so the span can drift from the
/// original text's coordinates; consumers rendering such a span must clamp
/// it, as the snippet extractor does.
pub fn match_rule(rule: &Rule, text: &str) -> Option<RuleMatch> {
    if !rule.enabled || rule.pattern.trim().is_empty() {
        return None;
    }

    match rule.kind {
        MatchKind::Word { whole_word: true } => {
            match_whole_word(&rule.pattern, text, rule.case_sensitive)
        }
        MatchKind::Word { whole_word: false } => {
            match_substring(&rule.pattern, text, rule.case_sensitive)
        }
        MatchKind::Regex => {
            let re = compile_regex(&rule.pattern, rule.case_sensitive).ok()?;
            re.find(text).map(|m| RuleMatch {
                start: m.start(),
                end: m.end(),
            })
        }
    }
}

/// Scan tokens left to right and return the first one equal to `pattern`
/// under the configured case rule.
///
/// Tokens whose byte length differs from the pattern's are skipped before
/// any character comparison; the length gate makes the common miss cheap.
fn match_whole_word(pattern: &str, text: &str, case_sensitive: bool) -> Option<RuleMatch> {
    let want = pattern.len();
    for token in tokenize(text) {
        if token.len() != want {
            continue;
        }
        let candidate = &text[token.start..token.end];
        let hit = if case_sensitive {
            candidate == pattern
        } else {
            // token text is ASCII by construction
            candidate.eq_ignore_ascii_case(pattern)
        };
        if hit {
            return Some(RuleMatch {
                start: token.start,
                end: token.end,
            });
        }
    }
    None
}

/// Plain substring search. Case-insensitive mode lowercases copies of both
/// the text and the pattern before searching; full-string lowering on every
/// call is an accepted cost for short preview inputs.
fn match_substring(pattern: &str, text: &str, case_sensitive: bool) -> Option<RuleMatch> {
    if case_sensitive {
        text.find(pattern).map(|start| RuleMatch {
            start,
            end: start + pattern.len(),
        })
    } else {
        let lower_text = text.to_lowercase();
        let lower_pattern = pattern.to_lowercase();
        lower_text.find(&lower_pattern).map(|start| RuleMatch {
            start,
            end: start + lower_pattern.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleDraft;

    fn word_rule(pattern: &str, whole_word: bool, case_sensitive: bool) -> Rule {
        RuleDraft {
            pattern: pattern.into(),
            whole_word,
            case_sensitive,
            ..Default::default()
        }
        .materialize()
    }

    fn regex_rule(pattern: &str, case_sensitive: bool) -> Rule {
        RuleDraft {
            pattern: pattern.into(),
            regex: true,
            case_sensitive,
            ..Default::default()
        }
        .materialize()
    }

    #[test]
    fn disabled_rule_never_matches() {
        let mut rule = word_rule("alice", false, false);
        rule.enabled = false;
        assert_eq!(match_rule(&rule, "alice"), None);
    }

    #[test]
    fn blank_pattern_never_matches() {
        let rule = word_rule("   ", false, false);
        assert_eq!(match_rule(&rule, "anything   at all"), None);
    }

    #[test]
    fn whole_word_matches_exact_token() {
        let rule = word_rule("alice", true, true);
        let m = match_rule(&rule, "hey alice, got a sec?").unwrap();
        assert_eq!((m.start, m.end), (4, 9));
    }

    #[test]
    fn whole_word_rejects_partial_token() {
        // "alicealice" is one 10-char token; pattern is 5 chars
        let rule = word_rule("alice", true, false);
        assert_eq!(match_rule(&rule, "alicealice"), None);
    }

    #[test]
    fn whole_word_case_insensitive() {
        let rule = word_rule("alice", true, false);
        let m = match_rule(&rule, "ALICE: ping").unwrap();
        assert_eq!((m.start, m.end), (0, 5));
    }

    #[test]
    fn whole_word_case_sensitive_miss() {
        let rule = word_rule("alice", true, true);
        assert_eq!(match_rule(&rule, "ALICE: ping"), None);
    }

    #[test]
    fn whole_word_first_token_wins() {
        let rule = word_rule("bob", true, false);
        let text = "no bob here, bob";
        let m = match_rule(&rule, text).unwrap();
        assert_eq!(&text[m.start..m.end], "bob");
        assert_eq!(m.start, 3);
    }

    #[test]
    fn substring_matches_inside_token() {
        let rule = word_rule("alice", false, false);
        let text = "Hi ALICEbot";
        let m = match_rule(&rule, text).unwrap();
        assert_eq!(&text[m.start..m.end], "ALICE");
    }

    #[test]
    fn substring_case_sensitive() {
        let rule = word_rule("alice", false, true);
        assert_eq!(match_rule(&rule, "Hi ALICEbot"), None);
        let m = match_rule(&rule, "Hi alicebot").unwrap();
        assert_eq!((m.start, m.end), (3, 8));
    }

    #[test]
    fn substring_span_may_drift_after_length_changing_lowercase() {
        // 'İ' lowercases to two chars (3 bytes vs 2), shifting every later
        // offset in the lowered copy
        let rule = word_rule("alice", false, false);
        let text = "İİ alice";
        let m = match_rule(&rule, text).unwrap();
        assert_eq!(m.end - m.start, "alice".len());
        // drifted past the real position; renderers clamp
        assert!(m.start > 5);
    }

    #[test]
    fn regex_first_match_span() {
        let rule = regex_rule(r"b+", true);
        let text = "a bb bbbb";
        let m = match_rule(&rule, text).unwrap();
        assert_eq!(&text[m.start..m.end], "bb");
    }

    #[test]
    fn regex_case_folding() {
        let rule = regex_rule(r"\bbob\b", false);
        assert!(match_rule(&rule, "BOB is here").is_some());
    }

    #[test]
    fn regex_case_sensitive_respected() {
        let rule = regex_rule(r"\bbob\b", true);
        assert_eq!(match_rule(&rule, "BOB is here"), None);
    }

    #[test]
    fn invalid_regex_is_silent_no_match() {
        let rule = regex_rule("(unclosed", false);
        assert_eq!(match_rule(&rule, "anything (unclosed here"), None);
    }

    #[test]
    fn regex_not_anchored() {
        let rule = regex_rule("mid", true);
        let m = match_rule(&rule, "aa mid zz").unwrap();
        assert_eq!((m.start, m.end), (3, 6));
    }
}
