//! # PDF Search Demo
//!
//! Converts a PDF to text, ingests it, and answers one query against it.
//!
//! Requires an OpenAI-compatible embeddings endpoint: set
//! `OPENAI_API_KEY`, and `OPENAI_BASE_URL` for a local server.
//!
//! Run: `cargo run --example pdf_search --features "pdf openai" -- file.pdf "your question"`

use std::path::PathBuf;
use std::sync::Arc;

use docdex::{DocdexConfig, DocdexPipeline, InMemoryVectorStore, OpenAiEmbedder, PdfConverter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (Some(path), Some(query)) = (args.next(), args.next()) else {
        eprintln!("usage: pdf_search <file.pdf> <query>");
        std::process::exit(2);
    };

    let pipeline = DocdexPipeline::builder()
        .config(DocdexConfig::default())
        .embedder(Arc::new(OpenAiEmbedder::from_env()?))
        .store(Arc::new(InMemoryVectorStore::new()))
        .converter(Arc::new(PdfConverter::new()))
        .build()?;

    let report = pipeline.ingest_file(&PathBuf::from(&path)).await?;
    println!(
        "Ingested {} ({} chunks, document id {})",
        report.filename, report.chunk_count, report.document_id
    );

    let response = pipeline.retrieve(&query).await?;
    if response.results.is_empty() {
        println!("No results.");
    }
    for (i, result) in response.results.iter().enumerate() {
        println!(
            "{}. Similarity: {:.1}% | Document: {} | Chunk: {}",
            i + 1,
            result.similarity * 100.0,
            result.metadata.filename,
            result.metadata.chunk_index + 1,
        );
        println!("   {}", result.metadata.preview);
    }

    Ok(())
}
