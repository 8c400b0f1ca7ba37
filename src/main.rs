//! `ir-core` CLI: build, inspect, and search cached positional indexes.

mod cli;

use std::sync::Arc;

use clap::Parser;

use ir_core::dataset::{parser, Dataset};
use ir_core::engine::{BooleanEngine, Method, SearchEngine, TfIdfEngine};
use ir_core::{NoopLemmatiser, Pipeline, RegexMatchTokenizer};

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> ir_core::Result<()> {
    match cli.command {
        Commands::Index { input, cache, dataset } => run_index(&input, &cache, &dataset),
        Commands::Search { cache, engine, method, top_k, query } => {
            run_search(&cache, &engine, &method, top_k, &query)
        }
        Commands::Inspect { cache } => run_inspect(&cache),
    }
}

fn run_index(input: &str, cache: &str, dataset: &str) -> ir_core::Result<()> {
    let parser = parser::parser_for(dataset)?;
    let tokenizer = RegexMatchTokenizer::new();
    let pipeline = default_pipeline();
    let built = Dataset::open(input, cache, parser.as_ref(), Arc::new(NoopLemmatiser), &tokenizer, &pipeline)?;
    println!("indexed {} documents into {cache}", built.index.documents_count());
    Ok(())
}

fn run_search(cache: &str, engine: &str, method: &str, top_k: usize, query: &str) -> ir_core::Result<()> {
    let index = ir_core::binary::load(std::path::Path::new(cache))?;
    match engine {
        "tfidf" => {
            let method: Method = method.parse()?;
            let tfidf = TfIdfEngine::new(&index, Box::new(RegexMatchTokenizer::new()), default_pipeline(), method);
            print_results(&tfidf.search(query, top_k)?);
        }
        "boolean" => {
            let boolean = BooleanEngine::new(
                &index,
                Arc::new(NoopLemmatiser),
                Box::new(RegexMatchTokenizer::new()),
                default_pipeline(),
            );
            print_results(&boolean.search(query, top_k)?);
        }
        other => return Err(ir_core::SearchError::UnknownEngine(other.to_string())),
    }
    Ok(())
}

fn run_inspect(cache: &str) -> ir_core::Result<()> {
    let index = ir_core::binary::load(std::path::Path::new(cache))?;
    println!("documents:  {}", index.documents_count());
    println!("vocabulary: {}", index.unique_terms(None).len());
    println!("avg length: {:.2}", index.avg_document_length());
    Ok(())
}

fn print_results(docs: &[ir_core::Document]) {
    for doc in docs {
        println!("{}\t{}", doc.doc_id, doc.title);
    }
}

fn default_pipeline() -> Pipeline {
    use ir_core::pipeline::{Lowercase, TokenLength, Unidecode};
    Pipeline::new(vec![Box::new(Lowercase), Box::new(Unidecode), Box::new(TokenLength::new(2))])
}
