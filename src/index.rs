//! The positional inverted index: `term -> (doc_id -> positions)`.
//!
//! # INVARIANTS
//!
//! 1. **TERM_NONEMPTY**: a term key exists in the index iff at least one of
//!    its postings is non-empty.
//! 2. **DOC_PRESENT**: for every `doc_id` under any term, that `doc_id` has
//!    a corresponding entry in `documents`.
//! 3. **TF_EQUALS_POSITIONS**: `tf(term, doc) == positions(term, doc).len()`.
//! 4. **POSITIONS_INCREASING**: positions for a given `(term, doc_id)` are
//!    strictly increasing, in the order the tokeniser emitted them. No
//!    sorting is needed at build time because of this.
//! 5. **DOCUMENT_LENGTH_CONSISTENT**: `document_length(d)` equals the sum of
//!    `tf(t, d)` over all terms `t`.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::document::{DocIdAllocator, Document};

/// `term -> doc_id -> positions`.
///
/// `allocator` is deliberately not serialised: a loaded index's allocator
/// is reconstructed by the caller from `max(document_ids) + 1` (§4.4,
/// §4.10), so carrying a stale snapshot in the cache would be misleading.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PositionalIndex {
    postings: HashMap<String, HashMap<u64, Vec<usize>>>,
    documents: HashMap<u64, Document>,
    #[serde(skip)]
    allocator: DocIdAllocator,
}

impl PositionalIndex {
    /// Build an index from a finalised document list. Documents must
    /// already be tokenised and preprocessed.
    pub fn build(documents: Vec<Document>) -> Self {
        let mut index = PositionalIndex::default();
        let max_id = documents.iter().map(|d| d.doc_id).max();
        for doc in documents {
            index.add_document(doc);
        }
        if let Some(max_id) = max_id {
            index.allocator.ensure_at_least(max_id + 1);
        }
        index
    }

    /// Append a document's tokens to the index. Per `add_document` in §4.5:
    /// builds the new postings into a local scratch map first, then merges
    /// it into the shared maps in one step, so a concurrent reader never
    /// observes the new `doc_id` under some terms but not others.
    pub fn add_document(&mut self, doc: Document) {
        let mut scratch: HashMap<String, Vec<usize>> = HashMap::new();
        for token in &doc.tokens {
            scratch.entry(token.processed_form.clone()).or_default().push(token.position);
        }
        let doc_id = doc.doc_id;
        for (term, positions) in scratch {
            self.postings.entry(term).or_default().insert(doc_id, positions);
        }
        self.allocator.ensure_at_least(doc_id + 1);
        self.documents.insert(doc_id, doc);
    }

    /// Allocate a fresh `doc_id`, consistent with every id already present
    /// in this index.
    pub fn allocate_doc_id(&self) -> u64 {
        self.allocator.allocate()
    }

    pub fn postings(&self, term: &str) -> Option<&HashMap<u64, Vec<usize>>> {
        self.postings.get(term).filter(|p| !p.is_empty())
    }

    pub fn df(&self, term: &str) -> usize {
        self.postings(term).map_or(0, |p| p.len())
    }

    pub fn tf(&self, term: &str, doc_id: u64) -> usize {
        self.positions(term, doc_id).map_or(0, |p| p.len())
    }

    pub fn positions(&self, term: &str, doc_id: u64) -> Option<&[usize]> {
        self.postings(term).and_then(|p| p.get(&doc_id)).map(|v| v.as_slice())
    }

    pub fn document(&self, doc_id: u64) -> Option<&Document> {
        self.documents.get(&doc_id)
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn document_ids(&self) -> HashSet<u64> {
        self.documents.keys().copied().collect()
    }

    pub fn document_length(&self, doc_id: u64) -> usize {
        self.documents.get(&doc_id).map_or(0, |d| d.tokens.len())
    }

    pub fn documents_count(&self) -> usize {
        self.documents.len()
    }

    /// Vocabulary of the whole index, or of a single document when `doc_id`
    /// is given.
    pub fn unique_terms(&self, doc_id: Option<u64>) -> HashSet<String> {
        match doc_id {
            Some(id) => self.documents.get(&id).map(Document::unique_terms).unwrap_or_default(),
            None => self.postings.keys().cloned().collect(),
        }
    }

    pub fn avg_document_length(&self) -> f64 {
        if self.documents.is_empty() {
            return 0.0;
        }
        let total: usize = self.documents.values().map(|d| d.tokens.len()).sum();
        total as f64 / self.documents.len() as f64
    }
}
