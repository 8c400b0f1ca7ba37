//! CLI definitions.
//!
//! Three subcommands: `index` builds or rebuilds a cache from a JSON
//! corpus, `search` runs a query (ranked TF-IDF or Boolean) against a
//! cached index, and `inspect` prints index statistics without running a
//! query.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ir-core", about = "Positional inverted index and vector-space/Boolean retrieval", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build or rebuild a cache from a JSON corpus.
    Index {
        /// Path to the JSON corpus.
        #[arg(long)]
        input: String,

        /// Path to write the binary cache.
        #[arg(long)]
        cache: String,

        /// Corpus field layout: `zh` or `cw`.
        #[arg(long, default_value = "cw")]
        dataset: String,
    },

    /// Run a query against a cached index.
    Search {
        /// Path to the binary cache.
        #[arg(long)]
        cache: String,

        /// `tfidf` for ranked retrieval, `boolean` for AND/OR/NOT queries.
        #[arg(long, default_value = "tfidf")]
        engine: String,

        /// SMART weighting scheme, only meaningful for the `tfidf` engine.
        #[arg(long, default_value = "ltc.ltc")]
        method: String,

        /// Maximum number of results to print.
        #[arg(long, default_value_t = 10)]
        top_k: usize,

        /// Query text (a free-text query for `tfidf`, a boolean expression
        /// for `boolean`).
        query: String,
    },

    /// Print index statistics without running a query.
    Inspect {
        /// Path to the binary cache.
        #[arg(long)]
        cache: String,
    },
}
