use std::fmt;

/// How a rule's pattern is interpreted.
///
/// `whole_word` lives on the `Word` variant only: a regex rule encodes its
/// own boundary semantics (e.g. `\b`) and can never carry the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Word { whole_word: bool },
    Regex,
}

impl MatchKind {
    /// Short tag used in report lines.
    pub fn tag(&self) -> &'static str {
        match self {
            MatchKind::Word { .. } => "WORD",
            MatchKind::Regex => "REGEX",
        }
    }
}

/// An RGB highlight color, stored normalized.
///
/// Renders as 6-hex-digit uppercase (`#RRGGBB`); 3-digit shorthand is
/// expanded on parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HighlightColor {
    /// Parse `#RGB` or `#RRGGBB` (case-insensitive, `#` optional).
    /// Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !hex.is_ascii() {
            return None;
        }
        let expand = |c: char| {
            let d = c.to_digit(16)? as u8;
            Some(d << 4 | d)
        };
        match hex.len() {
            3 => {
                let mut chars = hex.chars();
                let r = expand(chars.next()?)?;
                let g = expand(chars.next()?)?;
                let b = expand(chars.next()?)?;
                Some(Self { r, g, b })
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self { r, g, b })
            }
            _ => None,
        }
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// One user-defined matcher, as handed to the engine.
///
/// Rules are created and edited elsewhere; the engine receives them as an
/// immutable ordered list per evaluation and never mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub label: String,
    pub kind: MatchKind,
    pub pattern: String,
    pub enabled: bool,
    pub case_sensitive: bool,
    pub highlight_color: Option<HighlightColor>,
}

impl Rule {
    /// The name used for this rule in reports: the label if non-blank, else
    /// the trimmed pattern, else `(unnamed)`.
    pub fn effective_label(&self) -> &str {
        let label = self.label.trim();
        if !label.is_empty() {
            return label;
        }
        let pattern = self.pattern.trim();
        if !pattern.is_empty() {
            return pattern;
        }
        "(unnamed)"
    }
}

/// Mutable editing state for a rule, before write-time invariants apply.
///
/// Fields arrive free-form from an editor or a rule file; `materialize`
/// produces the canonical `Rule`.
#[derive(Debug, Clone)]
pub struct RuleDraft {
    pub label: String,
    pub regex: bool,
    pub pattern: String,
    pub enabled: bool,
    pub case_sensitive: bool,
    pub whole_word: bool,
    /// Raw color text; normalized or dropped on materialize.
    pub color: Option<String>,
}

impl Default for RuleDraft {
    fn default() -> Self {
        Self {
            label: String::new(),
            regex: false,
            pattern: String::new(),
            enabled: true,
            case_sensitive: false,
            whole_word: false,
            color: None,
        }
    }
}

impl RuleDraft {
    /// Produce the canonical rule, enforcing write-time invariants:
    /// a blank pattern clears `enabled`, a regex rule sheds `whole_word`
    /// (structurally, via the kind enum), and color text that fails to parse
    /// is dropped to `None` rather than rejected.
    pub fn materialize(&self) -> Rule {
        let kind = if self.regex {
            MatchKind::Regex
        } else {
            MatchKind::Word {
                whole_word: self.whole_word,
            }
        };

        let enabled = self.enabled && !self.pattern.trim().is_empty();

        let highlight_color = self
            .color
            .as_deref()
            .and_then(HighlightColor::parse);

        Rule {
            label: self.label.clone(),
            kind,
            pattern: self.pattern.clone(),
            enabled,
            case_sensitive: self.case_sensitive,
            highlight_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(pattern: &str) -> RuleDraft {
        RuleDraft {
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    #[test]
    fn blank_pattern_disables_rule() {
        let rule = draft("   ").materialize();
        assert!(!rule.enabled);

        let rule = draft("").materialize();
        assert!(!rule.enabled);
    }

    #[test]
    fn regex_rule_never_carries_whole_word() {
        let mut d = draft("\\balice\\b");
        d.regex = true;
        d.whole_word = true; // stale editing state
        let rule = d.materialize();
        assert_eq!(rule.kind, MatchKind::Regex);
    }

    #[test]
    fn word_rule_keeps_whole_word() {
        let mut d = draft("alice");
        d.whole_word = true;
        let rule = d.materialize();
        assert_eq!(rule.kind, MatchKind::Word { whole_word: true });
    }

    #[test]
    fn effective_label_fallbacks() {
        let mut d = draft("bob");
        d.label = "My rule".into();
        assert_eq!(d.materialize().effective_label(), "My rule");

        d.label = "  ".into();
        assert_eq!(d.materialize().effective_label(), "bob");

        d.pattern = " ".into();
        assert_eq!(d.materialize().effective_label(), "(unnamed)");
    }

    #[test]
    fn color_normalizes_to_uppercase_six_digit() {
        let c = HighlightColor::parse("#ffcc00").unwrap();
        assert_eq!(c.to_string(), "#FFCC00");

        let c = HighlightColor::parse("#fc0").unwrap();
        assert_eq!(c.to_string(), "#FFCC00");

        let c = HighlightColor::parse("1A2B3C").unwrap();
        assert_eq!(c.to_string(), "#1A2B3C");
    }

    #[test]
    fn invalid_color_drops_to_none() {
        let mut d = draft("alice");
        d.color = Some("not-a-color".into());
        assert_eq!(d.materialize().highlight_color, None);

        d.color = Some("#12345".into());
        assert_eq!(d.materialize().highlight_color, None);

        d.color = Some("#GGHHII".into());
        assert_eq!(d.materialize().highlight_color, None);
    }
}
