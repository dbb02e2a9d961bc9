//! Rule-based highlight matching and test/preview engine.
//!
//! User-defined word and regex rules are evaluated against chat text to
//! decide when a message should trigger a highlight or notification. The
//! crate provides the rule model with its write-time invariants, a
//! word-boundary tokenizer, the per-rule matcher, ahead-of-match regex
//! validation, a deterministic report builder for previewing a rule set
//! against sample text, and a background test runner that discards results
//! from superseded submissions.

pub mod cli;
pub mod matcher;
pub mod report;
pub mod rule;
pub mod runner;
pub mod tokenize;
pub mod validate;
