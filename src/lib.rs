//! A positional inverted index over a static document corpus, with ranked
//! (SMART ltc/ltu TF-IDF) and Boolean (AND/OR/NOT) retrieval.
//!
//! Data flow: raw text -> [`Document`] -> a [`tokenizer::Tokenizer`] -> a
//! [`pipeline::Pipeline`] -> [`index::PositionalIndex`]. A query goes
//! through the same tokeniser/pipeline, then either
//! [`engine::BooleanEngine`] or [`engine::TfIdfEngine`] returns the
//! matching/top-k documents.
//!
//! Everything outside the core indexing-and-ranking engine — dataset
//! loaders, the morphological lemmatiser, the CLI — is an external
//! collaborator behind a narrow trait, so the core never depends on how a
//! given deployment sources documents or lemmas.

pub mod binary;
pub mod dataset;
pub mod document;
pub mod engine;
pub mod error;
pub mod heap;
pub mod index;
pub mod lemmatizer;
pub mod pipeline;
pub mod progress;
pub mod token;
pub mod tokenizer;
pub mod vector;

pub use document::{DocIdAllocator, Document};
pub use engine::{BooleanEngine, Method, SearchEngine, TfIdfEngine};
pub use error::{Result, SearchError};
pub use index::PositionalIndex;
pub use lemmatizer::{Lemmatiser, NoopLemmatiser};
pub use pipeline::Pipeline;
pub use token::{Token, TokenKind};
pub use tokenizer::{RegexMatchTokenizer, Tokenizer, WhitespaceSplitTokenizer};
