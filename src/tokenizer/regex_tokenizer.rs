//! The regex-match tokeniser.
//!
//! Scans left-to-right over a single precedence-ordered alternation. First
//! match wins; the precedence is fixed:
//!
//! ```text
//! URL -> TAG -> EDITION -> EXTENSION -> NUMBER -> WORD -> PUNCT
//! ```
//!
//! Matching is Unicode-aware and case-insensitive (`(?i)` + the `regex`
//! crate's default Unicode mode). `EDITION`/`EXTENSION` require a digit
//! prefix; lacking one, the scanner falls through to `WORD`/`PUNCT` because
//! those patterns simply don't match.

use std::sync::LazyLock;

use regex::Regex;

use crate::token::{Token, TokenKind};
use crate::tokenizer::Tokenizer;

const EDITION_WORDS: &str = "edition|edice|edici|vydani|vyd\u{e1}n\u{ed}|vydanie|vyd\\.|dil|d\u{ed}l|serii|s\u{e9}rii";
const EXTENSION_WORDS: &str = "rozsireni|roz\u{161}\u{ed}\u{159}en\u{ed}|roz\u{161}|rozs";

fn pattern() -> String {
    format!(
        r"(?i)(?P<URL>http\S+|www\S+)|(?P<TAG><[^>]*>)|(?P<EDITION>\d+(?:th|nd|rd|st)?\s*(?:{editions})\w*)|(?P<EXTENSION>\d+(?:th|nd|rd|st)?\s*(?:{extensions})\w*)|(?P<NUMBER>\d+(?:[.,]\d*)?)|(?P<WORD>\w{{2,}})|(?P<PUNCT>[^\w\s]+)",
        editions = EDITION_WORDS,
        extensions = EXTENSION_WORDS,
    )
}

static PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(&pattern()).expect("tokenizer pattern is valid"));
static LEADING_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));

/// Precedence-ordered alternation tokeniser: URL, TAG, EDITION, EXTENSION,
/// NUMBER, WORD, PUNCT.
pub struct RegexMatchTokenizer;

impl RegexMatchTokenizer {
    pub fn new() -> Self {
        RegexMatchTokenizer
    }
}

impl Default for RegexMatchTokenizer {
    fn default() -> Self {
        RegexMatchTokenizer::new()
    }
}

impl Tokenizer for RegexMatchTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for caps in PATTERN.captures_iter(text) {
            let (kind, raw, m) = if let Some(m) = caps.name("URL") {
                (TokenKind::Url, m.as_str().to_string(), m)
            } else if let Some(m) = caps.name("TAG") {
                (TokenKind::Tag, m.as_str().to_string(), m)
            } else if let Some(m) = caps.name("EDITION") {
                let digits = leading_digits(m.as_str());
                (TokenKind::Edition, format!("{digits}[ed]"), m)
            } else if let Some(m) = caps.name("EXTENSION") {
                let digits = leading_digits(m.as_str());
                (TokenKind::Extension, format!("{digits}[ex]"), m)
            } else if let Some(m) = caps.name("NUMBER") {
                (TokenKind::Number, "[num]".to_string(), m)
            } else if let Some(m) = caps.name("WORD") {
                (TokenKind::Word, m.as_str().to_string(), m)
            } else if let Some(m) = caps.name("PUNCT") {
                (TokenKind::Punct, m.as_str().to_string(), m)
            } else {
                continue;
            };
            tokens.push(Token::new(raw, m.start(), m.end() - m.start(), kind));
        }
        tokens
    }
}

fn leading_digits(matched: &str) -> &str {
    LEADING_DIGITS
        .find(matched)
        .map(|m| m.as_str())
        .unwrap_or("0")
}
