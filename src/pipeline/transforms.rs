//! Built-in preprocessors.
//!
//! Each one follows the same shape: read `processed_form`/`kind`, rewrite
//! `processed_form` (to `""` to mark the token for dropping), leave
//! `position`/`length` untouched.

use std::collections::HashSet;
use std::sync::Arc;

use crate::lemmatizer::Lemmatiser;
use crate::pipeline::Preprocessor;
use crate::token::{Token, TokenKind};
use crate::util::fold_diacritics;

/// Drops any token whose `kind` is in the given set.
pub struct TokenFilter {
    kinds: HashSet<TokenKind>,
}

impl TokenFilter {
    pub fn new(kinds: impl IntoIterator<Item = TokenKind>) -> Self {
        TokenFilter { kinds: kinds.into_iter().collect() }
    }
}

impl Preprocessor for TokenFilter {
    fn apply(&self, mut token: Token, _document: &str) -> Token {
        if self.kinds.contains(&token.kind) {
            token.processed_form.clear();
        }
        token
    }
}

/// Drops any token whose `processed_form` is in the stopword set.
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new(words: HashSet<String>) -> Self {
        StopWords { words }
    }

    /// Load one stopword per line from a UTF-8 file; no comment syntax.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(StopWords::new(contents.lines().map(str::to_string).collect()))
    }
}

impl Preprocessor for StopWords {
    fn apply(&self, mut token: Token, _document: &str) -> Token {
        if self.words.contains(&token.processed_form) {
            token.processed_form.clear();
        }
        token
    }
}

/// Locale-insensitive lowercase.
pub struct Lowercase;

impl Preprocessor for Lowercase {
    fn apply(&self, mut token: Token, _document: &str) -> Token {
        token.processed_form = token.processed_form.to_lowercase();
        token
    }
}

/// Extracts visible text from HTML fragments inside the token. Idempotent:
/// text with no tags passes through unchanged.
pub struct HtmlStrip;

impl Preprocessor for HtmlStrip {
    fn apply(&self, mut token: Token, _document: &str) -> Token {
        token.processed_form = strip_tags(&token.processed_form);
        token
    }
}

fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Removes interior spaces and trims ends.
pub struct WhitespaceStrip;

impl Preprocessor for WhitespaceStrip {
    fn apply(&self, mut token: Token, _document: &str) -> Token {
        token.processed_form = token.processed_form.replace(' ', "");
        token.processed_form = token.processed_form.trim().to_string();
        token
    }
}

/// Drops tokens shorter than `n` characters.
pub struct TokenLength {
    min_length: usize,
}

impl TokenLength {
    pub fn new(min_length: usize) -> Self {
        TokenLength { min_length }
    }
}

impl Preprocessor for TokenLength {
    fn apply(&self, mut token: Token, _document: &str) -> Token {
        if token.processed_form.chars().count() < self.min_length {
            token.processed_form.clear();
        }
        token
    }
}

/// ASCII-folds diacritics (NFD decomposition, drop combining marks).
pub struct Unidecode;

impl Preprocessor for Unidecode {
    fn apply(&self, mut token: Token, _document: &str) -> Token {
        token.processed_form = fold_diacritics(&token.processed_form);
        token
    }
}

/// Replaces `processed_form` with its lemma when `kind == Word`, via an
/// injected [`Lemmatiser`] collaborator.
pub struct Lemmatise {
    lemmatiser: Arc<dyn Lemmatiser>,
}

impl Lemmatise {
    pub fn new(lemmatiser: Arc<dyn Lemmatiser>) -> Self {
        Lemmatise { lemmatiser }
    }
}

impl Preprocessor for Lemmatise {
    fn apply(&self, mut token: Token, _document: &str) -> Token {
        if token.kind == TokenKind::Word {
            token.processed_form = self.lemmatiser.lemmatise(&token.processed_form);
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lemmatizer::NoopLemmatiser;

    fn tok(s: &str, kind: TokenKind) -> Token {
        Token::new(s, 0, s.len(), kind)
    }

    #[test]
    fn token_filter_clears_matching_kinds() {
        let f = TokenFilter::new([TokenKind::Punct]);
        let out = f.apply(tok(",", TokenKind::Punct), "");
        assert_eq!(out.processed_form, "");
        let out = f.apply(tok("cat", TokenKind::Word), "");
        assert_eq!(out.processed_form, "cat");
    }

    #[test]
    fn stopwords_clears_matching_terms() {
        let sw = StopWords::new(["the".to_string()].into_iter().collect());
        assert_eq!(sw.apply(tok("the", TokenKind::Word), "").processed_form, "");
        assert_eq!(sw.apply(tok("cat", TokenKind::Word), "").processed_form, "cat");
    }

    #[test]
    fn lowercase_is_locale_insensitive_ascii() {
        assert_eq!(Lowercase.apply(tok("HELLO", TokenKind::Word), "").processed_form, "hello");
    }

    #[test]
    fn html_strip_extracts_visible_text_and_is_idempotent() {
        let once = HtmlStrip.apply(tok("<b>bold</b>", TokenKind::Word), "").processed_form;
        assert_eq!(once, "bold");
        let twice = HtmlStrip.apply(tok(&once, TokenKind::Word), "").processed_form;
        assert_eq!(once, twice);
    }

    #[test]
    fn whitespace_strip_removes_interior_and_trims() {
        let out = WhitespaceStrip.apply(tok("  a b  ", TokenKind::Word), "").processed_form;
        assert_eq!(out, "ab");
    }

    #[test]
    fn token_length_drops_short_tokens() {
        let tl = TokenLength::new(3);
        assert_eq!(tl.apply(tok("ab", TokenKind::Word), "").processed_form, "");
        assert_eq!(tl.apply(tok("abc", TokenKind::Word), "").processed_form, "abc");
    }

    #[test]
    fn unidecode_folds_diacritics() {
        assert_eq!(Unidecode.apply(tok("Plzeň", TokenKind::Word), "").processed_form, "Plzen");
    }

    #[test]
    fn lemmatise_only_touches_word_tokens() {
        let lem = Lemmatise::new(Arc::new(NoopLemmatiser));
        let word = lem.apply(tok("running", TokenKind::Word), "");
        assert_eq!(word.processed_form, "running");
        let punct = lem.apply(tok("!", TokenKind::Punct), "");
        assert_eq!(punct.processed_form, "!");
    }
}
