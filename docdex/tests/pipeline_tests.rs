//! End-to-end pipeline tests with deterministic embeddings.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use docdex::document::EmbeddingRecord;
use docdex::registry::DocumentRegistry;
use docdex::vectorstore::StoreMatch;
use docdex::{
    DocdexConfig, DocdexError, DocdexPipeline, Document, Embedder, InMemoryVectorStore,
    SentenceBoundaryChunker, VectorStore,
};

const SAMPLE_TEXT: &str = "Rust keeps memory safe without a garbage collector. \
    Ownership and borrowing are checked at compile time. \
    Fearless concurrency follows from the same rules.";

/// Deterministic hash-based embedder: identical text always maps to the
/// identical unit vector, so an exact-text query has cosine distance 0
/// to its stored chunk.
struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> docdex::Result<Vec<f32>> {
        let hash =
            text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut emb = vec![0.0f32; self.dimensions];
        for (i, v) in emb.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
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

struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> docdex::Result<Vec<f32>> {
        Err(DocdexError::Embedding {
            provider: "test".to_string(),
            message: "embedder offline".to_string(),
        })
    }

    fn dimensions(&self) -> usize {
        8
    }
}

struct FailingStore;

#[async_trait]
impl VectorStore for FailingStore {
    async fn add(&self, _records: &[EmbeddingRecord]) -> docdex::Result<()> {
        Err(DocdexError::StoreWrite {
            backend: "test".to_string(),
            message: "disk full".to_string(),
        })
    }

    async fn query(&self, _embedding: &[f32], _k: usize) -> docdex::Result<Vec<StoreMatch>> {
        Err(DocdexError::StoreQuery {
            backend: "test".to_string(),
            message: "store offline".to_string(),
        })
    }
}

fn small_config() -> DocdexConfig {
    DocdexConfig::builder().chunk_size(50).chunk_overlap(10).top_k(5).build().unwrap()
}

fn pipeline_with_store(store: Arc<dyn VectorStore>) -> DocdexPipeline {
    DocdexPipeline::builder()
        .config(small_config())
        .embedder(Arc::new(HashEmbedder::new(32)))
        .store(store)
        .build()
        .unwrap()
}

#[tokio::test]
async fn ingest_reports_chunk_count_and_registers_document() {
    let pipeline = pipeline_with_store(Arc::new(InMemoryVectorStore::new()));
    let document = Document::new("rust-notes.pdf", SAMPLE_TEXT);

    let chunk_count = pipeline.ingest(&document).await.unwrap();
    assert!(chunk_count >= 2);

    let entry = pipeline.document(&document.id).await.unwrap();
    assert_eq!(entry.filename, "rust-notes.pdf");
    assert_eq!(entry.chunk_count, chunk_count);
    assert_eq!(entry.text.as_deref(), Some(SAMPLE_TEXT));

    let listing = pipeline.list_documents().await;
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].chunk_count, chunk_count);
}

#[tokio::test]
async fn retrieving_exact_chunk_text_ranks_it_first() {
    let pipeline = pipeline_with_store(Arc::new(InMemoryVectorStore::new()));
    let document = Document::new("rust-notes.pdf", SAMPLE_TEXT);
    pipeline.ingest(&document).await.unwrap();

    // Recompute the chunks the pipeline produced and query with one of
    // them verbatim.
    let chunks = SentenceBoundaryChunker::new(50, 10).split(SAMPLE_TEXT);
    let query = chunks[0].as_str();

    let response = pipeline.retrieve_n(query, 1).await.unwrap();
    assert_eq!(response.total_results, 1);

    let result = &response.results[0];
    assert_eq!(result.text, chunks[0]);
    assert_eq!(result.metadata.filename, "rust-notes.pdf");
    assert_eq!(result.metadata.document_id, document.id);
    assert!(result.similarity > 0.999);

    // The exact match is the maximum over the whole store.
    let all = pipeline.retrieve_n(query, 100).await.unwrap();
    assert_eq!(all.results[0].text, chunks[0]);
}

#[tokio::test]
async fn retrieve_on_empty_store_returns_zero_results() {
    let pipeline = pipeline_with_store(Arc::new(InMemoryVectorStore::new()));

    let response = pipeline.retrieve("anything").await.unwrap();
    assert_eq!(response.total_results, 0);
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn requesting_more_results_than_stored_returns_everything() {
    let pipeline = pipeline_with_store(Arc::new(InMemoryVectorStore::new()));
    let document = Document::new("rust-notes.pdf", SAMPLE_TEXT);
    let chunk_count = pipeline.ingest(&document).await.unwrap();

    let response = pipeline.retrieve_n("ownership", chunk_count + 50).await.unwrap();
    assert_eq!(response.total_results, chunk_count);
}

#[tokio::test]
async fn retrieve_is_idempotent_without_intervening_ingestion() {
    let pipeline = pipeline_with_store(Arc::new(InMemoryVectorStore::new()));
    pipeline.ingest(&Document::new("rust-notes.pdf", SAMPLE_TEXT)).await.unwrap();

    let first = pipeline.retrieve("memory safety").await.unwrap();
    let second = pipeline.retrieve("memory safety").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn results_are_sorted_by_non_increasing_similarity() {
    let pipeline = pipeline_with_store(Arc::new(InMemoryVectorStore::new()));
    pipeline.ingest(&Document::new("rust-notes.pdf", SAMPLE_TEXT)).await.unwrap();
    pipeline
        .ingest(&Document::new(
            "recipes.pdf",
            "Bring the water to a boil. Add salt and the pasta. Drain after ten minutes.",
        ))
        .await
        .unwrap();

    let response = pipeline.retrieve_n("how does rust manage memory", 10).await.unwrap();
    assert!(response.total_results >= 2);
    for window in response.results.windows(2) {
        assert!(window[0].similarity >= window[1].similarity);
    }
}

#[tokio::test]
async fn chunk_ids_never_collide_across_documents() {
    let store = Arc::new(InMemoryVectorStore::new());
    let pipeline = pipeline_with_store(store.clone());

    // Same text, distinct document identifiers: every chunk id is
    // prefixed by its own document id, so the bulk writes cannot clash.
    let first = Document::new("copy-one.pdf", SAMPLE_TEXT);
    let second = Document::new("copy-two.pdf", SAMPLE_TEXT);
    let count_first = pipeline.ingest(&first).await.unwrap();
    let count_second = pipeline.ingest(&second).await.unwrap();

    assert_eq!(store.len().await, count_first + count_second);
}

#[tokio::test]
async fn failed_embedding_leaves_registry_untouched() {
    let pipeline = DocdexPipeline::builder()
        .config(small_config())
        .embedder(Arc::new(FailingEmbedder))
        .store(Arc::new(InMemoryVectorStore::new()))
        .build()
        .unwrap();

    let err = pipeline.ingest(&Document::new("a.pdf", SAMPLE_TEXT)).await.unwrap_err();
    assert!(matches!(err, DocdexError::Ingestion { .. }));
    assert!(pipeline.list_documents().await.is_empty());
}

#[tokio::test]
async fn failed_store_write_leaves_registry_untouched() {
    let pipeline = pipeline_with_store(Arc::new(FailingStore));

    let err = pipeline.ingest(&Document::new("a.pdf", SAMPLE_TEXT)).await.unwrap_err();
    assert!(matches!(err, DocdexError::Ingestion { .. }));
    assert!(pipeline.list_documents().await.is_empty());
}

#[tokio::test]
async fn blank_document_registers_with_zero_chunks() {
    let store = Arc::new(InMemoryVectorStore::new());
    let pipeline = pipeline_with_store(store.clone());
    let document = Document::new("blank.pdf", "   \n  ");

    let chunk_count = pipeline.ingest(&document).await.unwrap();
    assert_eq!(chunk_count, 0);
    assert_eq!(pipeline.document(&document.id).await.unwrap().chunk_count, 0);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn metadata_preview_is_capped_with_ellipsis() {
    let pipeline = DocdexPipeline::builder()
        .config(DocdexConfig::builder().chunk_size(400).chunk_overlap(50).top_k(1).build().unwrap())
        .embedder(Arc::new(HashEmbedder::new(32)))
        .store(Arc::new(InMemoryVectorStore::new()))
        .build()
        .unwrap();

    let long_text = "x".repeat(300);
    pipeline.ingest(&Document::new("long.pdf", long_text.clone())).await.unwrap();

    let response = pipeline.retrieve_n(&long_text, 1).await.unwrap();
    let preview = &response.results[0].metadata.preview;
    assert!(preview.ends_with("..."));
    assert_eq!(preview.chars().count(), 203);
}

#[tokio::test]
async fn registry_rebuilds_from_store_metadata() {
    let store = Arc::new(InMemoryVectorStore::new());
    let pipeline = pipeline_with_store(store.clone());
    pipeline.ingest(&Document::new("one.pdf", SAMPLE_TEXT)).await.unwrap();
    pipeline
        .ingest(&Document::new("two.pdf", "A single short sentence."))
        .await
        .unwrap();

    let snapshot = store.metadata_snapshot().await;
    let rebuilt = DocumentRegistry::from_metadata(&snapshot);

    let mut expected = pipeline.list_documents().await;
    let mut recovered = rebuilt.list().await;
    expected.sort_by(|a, b| a.document_id.cmp(&b.document_id));
    recovered.sort_by(|a, b| a.document_id.cmp(&b.document_id));
    assert_eq!(expected, recovered);
}

#[tokio::test]
async fn ingest_file_without_converter_is_a_config_error() {
    let pipeline = pipeline_with_store(Arc::new(InMemoryVectorStore::new()));

    let err = pipeline.ingest_file(Path::new("missing.pdf")).await.unwrap_err();
    assert!(matches!(err, DocdexError::Config(_)));
    assert!(pipeline.list_documents().await.is_empty());
}

#[test]
fn config_builder_rejects_inconsistent_parameters() {
    assert!(matches!(
        DocdexConfig::builder().chunk_size(100).chunk_overlap(100).build(),
        Err(DocdexError::Config(_))
    ));
    assert!(matches!(
        DocdexConfig::builder().chunk_size(0).build(),
        Err(DocdexError::Config(_))
    ));
    assert!(matches!(
        DocdexConfig::builder().top_k(0).build(),
        Err(DocdexError::Config(_))
    ));
}

#[test]
fn pipeline_builder_requires_components() {
    assert!(matches!(
        DocdexPipeline::builder().build(),
        Err(DocdexError::Config(_))
    ));
}
