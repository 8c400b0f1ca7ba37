//! The preprocessing pipeline: an ordered chain of token transforms.
//!
//! Each [`Preprocessor`] rewrites `processed_form` in place (it never moves
//! `position`/`length`, which stay pinned to the original surface text). The
//! [`Pipeline`] driver runs every transform over every token in order, and
//! after each transform drops tokens whose `processed_form` became empty or
//! whitespace-only before handing the survivors to the next transform.
//!
//! # Invariant
//!
//! Running a pipeline over its own output is a no-op: every built-in
//! transform here is idempotent, and the empty/whitespace filter is stable
//! once nothing more changes.

pub mod transforms;

use crate::token::Token;

pub use transforms::{HtmlStrip, Lemmatise, Lowercase, StopWords, TokenFilter, TokenLength, Unidecode, WhitespaceStrip};

/// A single token transform. `document` is the full source text the token
/// was taken from, for transforms that need surrounding context.
pub trait Preprocessor {
    fn apply(&self, token: Token, document: &str) -> Token;

    /// Run this transform over every token, dropping anything that comes
    /// out empty or whitespace-only.
    fn apply_all(&self, tokens: Vec<Token>, document: &str) -> Vec<Token> {
        tokens
            .into_iter()
            .map(|tok| self.apply(tok, document))
            .filter(|tok| !tok.is_empty_after_processing())
            .collect()
    }
}

/// An ordered sequence of preprocessors, applied left to right.
#[derive(Default)]
pub struct Pipeline {
    preprocessors: Vec<Box<dyn Preprocessor + Send + Sync>>,
}

impl Pipeline {
    pub fn new(preprocessors: Vec<Box<dyn Preprocessor + Send + Sync>>) -> Self {
        Pipeline { preprocessors }
    }

    pub fn empty() -> Self {
        Pipeline { preprocessors: Vec::new() }
    }

    pub fn run(&self, mut tokens: Vec<Token>, document: &str) -> Vec<Token> {
        for preprocessor in &self.preprocessors {
            tokens = preprocessor.apply_all(tokens, document);
        }
        tokens
    }
}
