//! Dataset lifecycle: parse a JSON corpus into [`Document`]s, or load an
//! already-built cache, per §4.10.

pub mod parser;

use std::path::Path;
use std::sync::Arc;

use crate::document::DocIdAllocator;
use crate::error::Result;
use crate::index::PositionalIndex;
use crate::lemmatizer::Lemmatiser;
use crate::pipeline::Pipeline;
use crate::tokenizer::Tokenizer;

pub use parser::{CwParser, DocumentParser, ZhParser};

use crate::binary;

/// A fully built positional index plus the allocator it was built with,
/// ready for searching or further insertion.
pub struct Dataset {
    pub index: PositionalIndex,
    pub allocator: DocIdAllocator,
}

impl Dataset {
    /// If `cache_path` exists, load it and resume the allocator from
    /// `max_doc_id + 1`. Otherwise parse `json_path` with `parser`, run
    /// lemmatise→tokenise→preprocess→build, and write `cache_path`.
    ///
    /// A corrupt cache is treated the same as a missing one: this falls
    /// back to a rebuild rather than propagating the error (§7).
    pub fn open(
        json_path: impl AsRef<Path>,
        cache_path: impl AsRef<Path>,
        parser: &dyn DocumentParser,
        lemmatiser: Arc<dyn Lemmatiser>,
        tokenizer: &dyn Tokenizer,
        pipeline: &Pipeline,
    ) -> Result<Dataset> {
        let cache_path = cache_path.as_ref();
        if cache_path.exists() {
            match binary::load(cache_path) {
                Ok(index) => {
                    let max_id = index.document_ids().into_iter().max();
                    let allocator = DocIdAllocator::new();
                    if let Some(max_id) = max_id {
                        allocator.ensure_at_least(max_id + 1);
                    }
                    return Ok(Dataset { index, allocator });
                }
                Err(_) => {
                    // Corrupt or unreadable cache: fall through to rebuild.
                }
            }
        }
        Dataset::build(json_path, cache_path, parser, lemmatiser, tokenizer, pipeline)
    }

    fn build(
        json_path: impl AsRef<Path>,
        cache_path: impl AsRef<Path>,
        parser: &dyn DocumentParser,
        lemmatiser: Arc<dyn Lemmatiser>,
        tokenizer: &dyn Tokenizer,
        pipeline: &Pipeline,
    ) -> Result<Dataset> {
        let allocator = DocIdAllocator::new();
        let raw = std::fs::read_to_string(&json_path)?;
        let mut documents = parser.parse(&raw, &allocator)?;

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let progress = super::progress::bar(documents.len() as u64, "indexing");
            documents.par_iter_mut().for_each(|doc| {
                let content = lemmatiser.lemmatise(&doc.content());
                doc.index_content(&content, tokenizer, pipeline);
                progress.inc(1);
            });
            progress.finish_and_clear();
        }

        #[cfg(not(feature = "parallel"))]
        for doc in &mut documents {
            let content = lemmatiser.lemmatise(&doc.content());
            doc.index_content(&content, tokenizer, pipeline);
        }

        let index = PositionalIndex::build(documents);
        binary::save(&index, cache_path.as_ref())?;
        Ok(Dataset { index, allocator })
    }
}
