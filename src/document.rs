//! Documents: raw text, token sequence, and a stable id.
//!
//! # Invariant
//!
//! `doc_id` is assigned once, at construction, from a [`DocIdAllocator`] and
//! never changes. Documents are mutated only by [`Document::tokenize`],
//! [`Document::preprocess`], and [`Document::index_content`]; `title` and
//! `text` themselves are never rewritten after construction, so callers that
//! need to index a transformed (e.g. lemmatised) form of the content must
//! route it through `index_content` rather than overwriting `text`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::pipeline::Pipeline;
use crate::token::Token;
use crate::tokenizer::Tokenizer;

/// Explicit id allocator, owned by the index (or the dataset wrapping it),
/// not a process-wide global (§9 redesign flag).
///
/// After loading a pre-built index, the allocator is reset to
/// `max(existing doc_ids) + 1` so freshly inserted documents never collide
/// with ids already present in postings.
#[derive(Debug, Default)]
pub struct DocIdAllocator {
    next: AtomicU64,
}

impl DocIdAllocator {
    pub fn new() -> Self {
        DocIdAllocator { next: AtomicU64::new(0) }
    }

    pub fn starting_at(next: u64) -> Self {
        DocIdAllocator { next: AtomicU64::new(next) }
    }

    pub fn allocate(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// Advance the allocator so the next id is at least `min_next`. Used
    /// when loading a cache to guarantee newly inserted documents never
    /// collide with ids already present in postings.
    pub fn ensure_at_least(&self, min_next: u64) {
        self.next.fetch_max(min_next, Ordering::SeqCst);
    }

    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

/// A single document: title, body text, and its tokens once tokenised and
/// preprocessed.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Document {
    pub doc_id: u64,
    pub title: String,
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Document {
    pub fn new(allocator: &DocIdAllocator, title: impl Into<String>, text: impl Into<String>) -> Self {
        Document {
            doc_id: allocator.allocate(),
            title: title.into(),
            text: text.into(),
            tokens: Vec::new(),
        }
    }

    /// Construct with an explicit id. Used only when rebuilding a `Document`
    /// from a deserialised cache, where the id is already known.
    pub fn with_id(doc_id: u64, title: impl Into<String>, text: impl Into<String>) -> Self {
        Document { doc_id, title: title.into(), text: text.into(), tokens: Vec::new() }
    }

    /// The text a tokeniser runs over: title and body joined with a space,
    /// mirroring the source's `content = title + " " + text`.
    pub fn content(&self) -> String {
        format!("{} {}", self.title, self.text)
    }

    pub fn tokenize(&mut self, tokenizer: &dyn Tokenizer) -> &mut Self {
        self.tokens = tokenizer.tokenize(&self.content());
        self
    }

    pub fn preprocess(&mut self, pipeline: &Pipeline) -> &mut Self {
        let content = self.content();
        self.tokens = pipeline.run(std::mem::take(&mut self.tokens), &content);
        self
    }

    /// Tokenise and preprocess against an explicit content string rather
    /// than `self.content()` — used when the text handed to the tokeniser
    /// (e.g. lemmatised) must differ from the stored `title`/`text`, which
    /// this never touches.
    pub fn index_content(&mut self, content: &str, tokenizer: &dyn Tokenizer, pipeline: &Pipeline) -> &mut Self {
        let tokens = tokenizer.tokenize(content);
        self.tokens = pipeline.run(tokens, content);
        self
    }

    pub fn unique_terms(&self) -> HashSet<String> {
        self.tokens.iter().map(|t| t.processed_form.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::WhitespaceSplitTokenizer;

    #[test]
    fn allocator_assigns_strictly_increasing_ids() {
        let alloc = DocIdAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        let c = alloc.allocate();
        assert_eq!((a, b, c), (0, 1, 2));
    }

    #[test]
    fn allocator_resumes_after_max_plus_one() {
        let alloc = DocIdAllocator::new();
        alloc.ensure_at_least(42);
        assert_eq!(alloc.allocate(), 42);
    }

    #[test]
    fn document_tokenize_then_preprocess_populates_tokens() {
        let alloc = DocIdAllocator::new();
        let mut doc = Document::new(&alloc, "title", "a b");
        doc.tokenize(&WhitespaceSplitTokenizer::default());
        assert_eq!(doc.tokens.len(), 3); // "title", "a", "b"
    }

    #[test]
    fn unique_terms_deduplicates() {
        let alloc = DocIdAllocator::new();
        let mut doc = Document::new(&alloc, "x", "a a b");
        doc.tokenize(&WhitespaceSplitTokenizer::default());
        assert_eq!(doc.unique_terms().len(), 3); // "x", "a", "b"
    }
}
