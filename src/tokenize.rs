/// A maximal run of word characters in source text, as a half-open byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Word characters are ASCII alphanumerics, `_`, and `-`.
///
/// Deliberately narrower than Unicode word boundaries: non-ASCII letters act
/// as separators, matching the highlight rules' notion of a "word".
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Split `text` into maximal word-character runs, left to right.
///
/// Whitespace and punctuation (including non-ASCII letters) separate tokens
/// and never appear inside one. Empty input yields no tokens.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { text, pos: 0 }
}

/// Iterator over the tokens of a text buffer.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let rest = &self.text[self.pos..];

        let start_off = rest
            .char_indices()
            .find(|&(_, c)| is_word_char(c))
            .map(|(i, _)| i)?;
        let start = self.pos + start_off;

        let after_start = &self.text[start..];
        let end = after_start
            .char_indices()
            .find(|&(_, c)| !is_word_char(c))
            .map(|(i, _)| start + i)
            .unwrap_or(self.text.len());

        self.pos = end;
        Some(Token { start, end })
    }
}
