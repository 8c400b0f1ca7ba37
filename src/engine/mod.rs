//! Search engines: implementations of the one interface embedders need,
//! [`SearchEngine`]. Two concrete engines are provided; both borrow the
//! index immutably and are stateless beyond their precomputed statistics.

pub mod boolean;
pub mod tfidf;

use crate::document::Document;
use crate::error::Result;

pub use boolean::BooleanEngine;
pub use tfidf::{Method, TfIdfEngine};

/// Run a query against an index and return up to `k` documents.
///
/// Higher scores precede lower ones for ranked engines; the Boolean engine
/// returns results ordered ascending by `doc_id` (§6).
pub trait SearchEngine {
    fn search(&self, query: &str, k: usize) -> Result<Vec<Document>>;
}
