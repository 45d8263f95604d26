//! # Basic Search Demo
//!
//! Demonstrates the core pipeline: ingest documents, query them, then
//! list everything that was ingested.
//!
//! Uses `InMemoryVectorStore` and a deterministic `HashEmbedder` so it
//! runs with **zero API keys**.
//!
//! Run: `cargo run --example search_basic`

use std::sync::Arc;

use docdex::{DocdexConfig, DocdexPipeline, Document, Embedder, InMemoryVectorStore};

// ---------------------------------------------------------------------------
// HashEmbedder: deterministic hash-based embeddings for demos
// ---------------------------------------------------------------------------

struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

#[async_trait::async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> docdex::Result<Vec<f32>> {
        // Deterministic embedding: hash the text bytes, then generate a
        // normalised vector whose direction depends on the content.
        let hash =
            text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut emb = vec![0.0f32; self.dimensions];
        for (i, v) in emb.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        // L2-normalise so cosine similarity is just the dot product.
        let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            emb.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(emb)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Small chunks keep the demo output readable; top_k=3 returns the
    // three most relevant results per query.
    let config = DocdexConfig::builder().chunk_size(120).chunk_overlap(30).top_k(3).build()?;

    let pipeline = DocdexPipeline::builder()
        .config(config)
        .embedder(Arc::new(HashEmbedder::new(64)))
        .store(Arc::new(InMemoryVectorStore::new()))
        .build()?;

    // Sample "converted" documents, as a PDF converter would hand them over.
    let documents = vec![
        Document::new(
            "onboarding-handbook.pdf",
            "Welcome to the team. Your laptop is preconfigured with the VPN client. \
             Expense reports are due on the last Friday of every month. \
             The support rotation schedule lives in the shared calendar.",
        ),
        Document::new(
            "incident-runbook.pdf",
            "When the pager fires, first check the service dashboard. \
             If the database is unreachable, fail over to the replica. \
             Every incident needs a postmortem within three working days.",
        ),
        Document::new(
            "quarterly-report.pdf",
            "Revenue grew eight percent over the previous quarter. \
             Churn stayed flat while the onboarding funnel improved. \
             Hiring focused on the support and infrastructure teams.",
        ),
    ];

    println!("Ingesting {} documents...", documents.len());
    for doc in &documents {
        let chunk_count = pipeline.ingest(doc).await?;
        println!("  {} -> {} chunk(s)", doc.filename, chunk_count);
    }

    let queries =
        ["when are expense reports due", "database failover steps", "how did revenue change"];

    for query in &queries {
        println!("\nQuery: \"{query}\"");
        let response = pipeline.retrieve(query).await?;
        if response.results.is_empty() {
            println!("  (no results)");
        } else {
            for (i, result) in response.results.iter().enumerate() {
                println!(
                    "  {}. Similarity: {:.1}% | Document: {} | Chunk: {}",
                    i + 1,
                    result.similarity * 100.0,
                    result.metadata.filename,
                    result.metadata.chunk_index + 1,
                );
                println!("     {}", result.metadata.preview);
            }
        }
    }

    println!("\nKnown documents:");
    for summary in pipeline.list_documents().await {
        println!(
            "  - {} (id {}..., {} chunks)",
            summary.filename,
            &summary.document_id[..8.min(summary.document_id.len())],
            summary.chunk_count,
        );
    }

    Ok(())
}
