//! Boolean query parser and evaluator, grounded on the original source's
//! `boolean_parser.py`/`boolean_engine.py`.
//!
//! Grammar (`OR` lowest precedence, `AND` next, `NOT` unary, parens group):
//!
//! ```text
//! expr   := term   ("OR"  term  )*
//! term   := factor ("AND" factor)*
//! factor := "NOT" base | base
//! base   := "(" expr ")" | TERM
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use crate::document::Document;
use crate::engine::SearchEngine;
use crate::error::{Result, SearchError};
use crate::index::PositionalIndex;
use crate::lemmatizer::Lemmatiser;
use crate::pipeline::Pipeline;
use crate::tokenizer::Tokenizer;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Lexeme {
    And,
    Or,
    Not,
    LParen,
    RParen,
    Term(String),
}

/// Left-to-right character scan, mirroring the source's
/// `re.finditer(r"AND|OR|NOT|\(|\)|\w+|\S")` dispatch: `(`/`)` are
/// standalone tokens regardless of what's adjacent to them, so
/// `"NOT(cherry)"` lexes the same as `"NOT ( cherry )"`.
fn lex(query: &str) -> Result<Vec<Lexeme>> {
    let chars: Vec<char> = query.chars().collect();
    let mut lexemes = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c == '(' {
            lexemes.push(Lexeme::LParen);
            i += 1;
        } else if c == ')' {
            lexemes.push(Lexeme::RParen);
            i += 1;
        } else if c.is_alphanumeric() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            lexemes.push(match word.as_str() {
                "AND" => Lexeme::And,
                "OR" => Lexeme::Or,
                "NOT" => Lexeme::Not,
                _ => Lexeme::Term(word),
            });
        } else {
            return Err(SearchError::BooleanSyntax(format!("unexpected character {c:?} in query")));
        }
    }
    Ok(lexemes)
}

/// AST node. Term literals are stored pre-normalisation; normalisation
/// happens once at parse time via `normalize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    Term(String),
    Not(Box<Ast>),
    And(Box<Ast>, Box<Ast>),
    Or(Box<Ast>, Box<Ast>),
}

struct Parser<'a> {
    lexemes: &'a [Lexeme],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(lexemes: &'a [Lexeme]) -> Self {
        Parser { lexemes, pos: 0 }
    }

    fn peek(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Lexeme> {
        let l = self.lexemes.get(self.pos);
        self.pos += 1;
        l
    }

    fn parse_expr(&mut self) -> Result<Ast> {
        let mut left = self.parse_term()?;
        while matches!(self.peek(), Some(Lexeme::Or)) {
            self.advance();
            let right = self.parse_term()?;
            left = Ast::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Ast> {
        let mut left = self.parse_factor()?;
        while matches!(self.peek(), Some(Lexeme::And)) {
            self.advance();
            let right = self.parse_factor()?;
            left = Ast::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Ast> {
        if matches!(self.peek(), Some(Lexeme::Not)) {
            self.advance();
            let base = self.parse_base()?;
            Ok(Ast::Not(Box::new(base)))
        } else {
            self.parse_base()
        }
    }

    fn parse_base(&mut self) -> Result<Ast> {
        match self.advance() {
            Some(Lexeme::LParen) => {
                let inner = self.parse_expr()?;
                match self.advance() {
                    Some(Lexeme::RParen) => Ok(inner),
                    other => Err(SearchError::BooleanSyntax(format!("expected ')', found {other:?}"))),
                }
            }
            Some(Lexeme::Term(t)) => Ok(Ast::Term(t.clone())),
            other => Err(SearchError::BooleanSyntax(format!("unexpected token: {other:?}"))),
        }
    }
}

/// Parse `query` into an AST, normalising every `TERM` literal through the
/// same lemmatise→tokenise→preprocess pipeline corpus text receives, so
/// Boolean lookups match indexed forms.
pub fn parse(
    query: &str,
    lemmatiser: &dyn Lemmatiser,
    tokenizer: &dyn Tokenizer,
    pipeline: &Pipeline,
) -> Result<Ast> {
    let lexemes = lex(query)?;
    if lexemes.is_empty() {
        return Err(SearchError::BooleanSyntax("empty query".to_string()));
    }
    let mut parser = Parser::new(&lexemes);
    let ast = parser.parse_expr()?;
    if parser.pos != lexemes.len() {
        return Err(SearchError::BooleanSyntax(format!(
            "trailing tokens starting at {:?}",
            lexemes[parser.pos]
        )));
    }
    normalize(ast, lemmatiser, tokenizer, pipeline)
}

fn normalize(ast: Ast, lemmatiser: &dyn Lemmatiser, tokenizer: &dyn Tokenizer, pipeline: &Pipeline) -> Result<Ast> {
    match ast {
        Ast::Term(lit) => Ok(Ast::Term(normalize_term(&lit, lemmatiser, tokenizer, pipeline))),
        Ast::Not(c) => Ok(Ast::Not(Box::new(normalize(*c, lemmatiser, tokenizer, pipeline)?))),
        Ast::And(a, b) => Ok(Ast::And(
            Box::new(normalize(*a, lemmatiser, tokenizer, pipeline)?),
            Box::new(normalize(*b, lemmatiser, tokenizer, pipeline)?),
        )),
        Ast::Or(a, b) => Ok(Ast::Or(
            Box::new(normalize(*a, lemmatiser, tokenizer, pipeline)?),
            Box::new(normalize(*b, lemmatiser, tokenizer, pipeline)?),
        )),
    }
}

fn normalize_term(lit: &str, lemmatiser: &dyn Lemmatiser, tokenizer: &dyn Tokenizer, pipeline: &Pipeline) -> String {
    let lemmatised = lemmatiser.lemmatise(lit);
    let tokens = pipeline.run(tokenizer.tokenize(&lemmatised), &lemmatised);
    tokens
        .into_iter()
        .next()
        .map(|t| t.processed_form)
        .unwrap_or_else(|| lit.to_lowercase())
}

/// Evaluate an AST against an index, returning the matching `doc_id` set.
pub fn evaluate(ast: &Ast, index: &PositionalIndex, all_doc_ids: &HashSet<u64>) -> HashSet<u64> {
    match ast {
        Ast::Term(lit) => index.postings(lit).map(|p| p.keys().copied().collect()).unwrap_or_default(),
        Ast::Not(c) => all_doc_ids.difference(&evaluate(c, index, all_doc_ids)).copied().collect(),
        Ast::And(a, b) => {
            let left = evaluate(a, index, all_doc_ids);
            let right = evaluate(b, index, all_doc_ids);
            left.intersection(&right).copied().collect()
        }
        Ast::Or(a, b) => {
            let left = evaluate(a, index, all_doc_ids);
            let right = evaluate(b, index, all_doc_ids);
            left.union(&right).copied().collect()
        }
    }
}

pub struct BooleanEngine<'a> {
    index: &'a PositionalIndex,
    lemmatiser: Arc<dyn Lemmatiser>,
    tokenizer: Box<dyn Tokenizer>,
    pipeline: Pipeline,
}

impl<'a> BooleanEngine<'a> {
    pub fn new(
        index: &'a PositionalIndex,
        lemmatiser: Arc<dyn Lemmatiser>,
        tokenizer: Box<dyn Tokenizer>,
        pipeline: Pipeline,
    ) -> Self {
        BooleanEngine { index, lemmatiser, tokenizer, pipeline }
    }
}

impl<'a> SearchEngine for BooleanEngine<'a> {
    /// Parses, evaluates, and returns the first `k` documents by ascending
    /// `doc_id` (the source leaves Boolean result order unspecified;
    /// fixing it by id gives deterministic tests, §4.9).
    fn search(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        let ast = parse(query, self.lemmatiser.as_ref(), self.tokenizer.as_ref(), &self.pipeline)?;
        let all_doc_ids = self.index.document_ids();
        let mut matches: Vec<u64> = evaluate(&ast, self.index, &all_doc_ids).into_iter().collect();
        matches.sort_unstable();
        matches.truncate(k);
        Ok(matches.into_iter().filter_map(|id| self.index.document(id).cloned()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocIdAllocator;
    use crate::lemmatizer::NoopLemmatiser;
    use crate::tokenizer::WhitespaceSplitTokenizer;

    fn build_index(texts: &[&str]) -> PositionalIndex {
        let alloc = DocIdAllocator::new();
        let docs: Vec<Document> = texts
            .iter()
            .map(|t| {
                let mut doc = Document::new(&alloc, "", *t);
                doc.tokenize(&WhitespaceSplitTokenizer::default());
                doc.preprocess(&Pipeline::empty());
                doc
            })
            .collect();
        PositionalIndex::build(docs)
    }

    fn boolean_engine(index: &PositionalIndex) -> BooleanEngine<'_> {
        BooleanEngine::new(
            index,
            Arc::new(NoopLemmatiser),
            Box::new(WhitespaceSplitTokenizer::default()),
            Pipeline::empty(),
        )
    }

    #[test]
    fn scenario_3_apple_and_banana_or_not_cherry() {
        let index = build_index(&["apple banana", "apple cherry", "banana"]);
        let engine = boolean_engine(&index);
        let results = engine.search("apple AND (banana OR NOT cherry)", 10).unwrap();
        let ids: HashSet<u64> = results.iter().map(|d| d.doc_id).collect();
        assert_eq!(ids, [0u64].into_iter().collect());
    }

    #[test]
    fn lex_does_not_require_spacing_around_keywords_or_parens() {
        let lexemes = lex("NOT(cherry)").unwrap();
        assert_eq!(lexemes, vec![Lexeme::Not, Lexeme::LParen, Lexeme::Term("cherry".to_string()), Lexeme::RParen]);
    }

    #[test]
    fn scenario_3_is_unaffected_by_missing_whitespace_around_parens() {
        let index = build_index(&["apple banana", "apple cherry", "banana"]);
        let engine = boolean_engine(&index);
        let results = engine.search("apple AND(banana OR NOT(cherry))", 10).unwrap();
        let ids: HashSet<u64> = results.iter().map(|d| d.doc_id).collect();
        assert_eq!(ids, [0u64].into_iter().collect());
    }

    #[test]
    fn de_morgans_law_holds_over_the_index() {
        let index = build_index(&["apple banana", "apple cherry", "banana"]);
        let all: HashSet<u64> = index.document_ids();
        let lemmatiser = NoopLemmatiser;
        let tokenizer = WhitespaceSplitTokenizer::default();
        let pipeline = Pipeline::empty();
        let left = parse("NOT (apple AND banana)", &lemmatiser, &tokenizer, &pipeline).unwrap();
        let right = parse("(NOT apple) OR (NOT banana)", &lemmatiser, &tokenizer, &pipeline).unwrap();
        assert_eq!(evaluate(&left, &index, &all), evaluate(&right, &index, &all));
    }

    #[test]
    fn a_or_not_a_is_all_documents() {
        let index = build_index(&["apple", "banana", "cherry"]);
        let all: HashSet<u64> = index.document_ids();
        let lemmatiser = NoopLemmatiser;
        let tokenizer = WhitespaceSplitTokenizer::default();
        let pipeline = Pipeline::empty();
        let ast = parse("apple OR NOT apple", &lemmatiser, &tokenizer, &pipeline).unwrap();
        assert_eq!(evaluate(&ast, &index, &all), all);
    }

    #[test]
    fn a_and_a_is_idempotent() {
        let index = build_index(&["apple", "banana"]);
        let all: HashSet<u64> = index.document_ids();
        let lemmatiser = NoopLemmatiser;
        let tokenizer = WhitespaceSplitTokenizer::default();
        let pipeline = Pipeline::empty();
        let single = parse("apple", &lemmatiser, &tokenizer, &pipeline).unwrap();
        let doubled = parse("apple AND apple", &lemmatiser, &tokenizer, &pipeline).unwrap();
        assert_eq!(evaluate(&single, &index, &all), evaluate(&doubled, &index, &all));
    }

    #[test]
    fn unbalanced_parens_is_a_syntax_error() {
        let index = build_index(&["apple"]);
        let engine = boolean_engine(&index);
        assert!(matches!(engine.search("(apple", 10), Err(SearchError::BooleanSyntax(_))));
    }

    #[test]
    fn trailing_tokens_are_a_syntax_error() {
        let index = build_index(&["apple"]);
        let engine = boolean_engine(&index);
        assert!(matches!(engine.search("apple apple", 10), Err(SearchError::BooleanSyntax(_))));
    }
}
