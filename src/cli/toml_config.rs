use crate::rule::{Rule, RuleDraft};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum RulesFileError {
    Read(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for RulesFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesFileError::Read(e) => write!(f, "failed to read rules file: {}", e),
            RulesFileError::Parse(e) => write!(f, "failed to parse rules file: {}", e),
        }
    }
}

impl std::error::Error for RulesFileError {}

/// Top-level TOML rules file structure.
#[derive(Debug, Deserialize)]
pub struct RulesFile {
    #[serde(default)]
    pub rule: Vec<TomlRule>,
}

/// A single `[[rule]]` entry.
#[derive(Debug, Deserialize)]
pub struct TomlRule {
    #[serde(default)]
    pub label: String,
    /// `"word"` or `"regex"`; anything else falls back to word.
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub pattern: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default)]
    pub whole_word: bool,
    pub color: Option<String>,
}

fn default_kind() -> String {
    "word".into()
}

fn default_enabled() -> bool {
    true
}

impl TomlRule {
    /// Convert to the engine's draft type; `materialize` then applies the
    /// write-time invariants (blank pattern disables, bad color drops, a
    /// regex rule sheds `whole_word`).
    pub fn to_draft(&self) -> RuleDraft {
        RuleDraft {
            label: self.label.clone(),
            regex: self.kind.eq_ignore_ascii_case("regex"),
            pattern: self.pattern.clone(),
            enabled: self.enabled,
            case_sensitive: self.case_sensitive,
            whole_word: self.whole_word,
            color: self.color.clone(),
        }
    }
}

/// Read and parse a TOML rules file into canonical rules, in file order.
pub fn load_rules(path: &Path) -> Result<Vec<Rule>, RulesFileError> {
    let text = fs::read_to_string(path).map_err(RulesFileError::Read)?;
    let file: RulesFile = toml::from_str(&text).map_err(RulesFileError::Parse)?;
    Ok(file.rule.iter().map(|r| r.to_draft().materialize()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::MatchKind;

    #[test]
    fn parses_rules_in_order() {
        let text = r##"
            [[rule]]
            label = "alice ping"
            pattern = "alice"
            whole_word = true

            [[rule]]
            label = "bob regex"
            kind = "regex"
            pattern = "\\bbob\\b"
            case_sensitive = true
            color = "#fc0"
        "##;
        let file: RulesFile = toml::from_str(text).unwrap();
        let rules: Vec<Rule> = file.rule.iter().map(|r| r.to_draft().materialize()).collect();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].kind, MatchKind::Word { whole_word: true });
        assert!(rules[0].enabled);
        assert!(!rules[0].case_sensitive);

        assert_eq!(rules[1].kind, MatchKind::Regex);
        assert!(rules[1].case_sensitive);
        assert_eq!(rules[1].highlight_color.unwrap().to_string(), "#FFCC00");
    }

    #[test]
    fn unknown_kind_falls_back_to_word() {
        let text = r#"
            [[rule]]
            kind = "glob"
            pattern = "x"
        "#;
        let file: RulesFile = toml::from_str(text).unwrap();
        let rule = file.rule[0].to_draft().materialize();
        assert_eq!(rule.kind, MatchKind::Word { whole_word: false });
    }

    #[test]
    fn bad_color_is_not_a_parse_error() {
        let text = r#"
            [[rule]]
            pattern = "x"
            color = "chartreuse"
        "#;
        let file: RulesFile = toml::from_str(text).unwrap();
        let rule = file.rule[0].to_draft().materialize();
        assert_eq!(rule.highlight_color, None);
    }

    #[test]
    fn empty_file_is_zero_rules() {
        let file: RulesFile = toml::from_str("").unwrap();
        assert!(file.rule.is_empty());
    }
}
