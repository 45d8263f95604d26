//! Ingestion and retrieval pipeline.
//!
//! [`DocdexPipeline`] is the single context object for the whole system.
//! It composes an [`Embedder`], a [`VectorStore`], a [`Chunker`], an
//! optional [`Converter`], and the owned [`DocumentRegistry`]. Construct
//! one at startup via [`DocdexPipeline::builder()`] and share it by
//! reference; there is no hidden global state.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docdex::{DocdexConfig, DocdexPipeline, Document, InMemoryVectorStore};
//!
//! let pipeline = DocdexPipeline::builder()
//!     .config(DocdexConfig::default())
//!     .embedder(Arc::new(my_embedder))
//!     .store(Arc::new(InMemoryVectorStore::new()))
//!     .build()?;
//!
//! let doc = Document::new("notes.pdf", converted_text);
//! let chunk_count = pipeline.ingest(&doc).await?;
//! let answer = pipeline.retrieve("what were the action items?").await?;
//! ```

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::chunking::{Chunker, SentenceBoundaryChunker};
use crate::config::DocdexConfig;
use crate::convert::Converter;
use crate::document::{
    ChunkMetadata, Document, EmbeddingRecord, IngestReport, QueryResponse, SearchResult,
};
use crate::embedding::Embedder;
use crate::error::{DocdexError, Result};
use crate::registry::{DocumentEntry, DocumentRegistry, DocumentSummary};
use crate::vectorstore::VectorStore;

/// The ingestion and retrieval orchestrator.
///
/// Ingestion runs chunk → embed → store → register; retrieval runs
/// embed → search → format. Construct one via
/// [`DocdexPipeline::builder()`].
pub struct DocdexPipeline {
    config: DocdexConfig,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    chunker: Arc<dyn Chunker>,
    converter: Option<Arc<dyn Converter>>,
    registry: DocumentRegistry,
}

fn ingest_err(document_id: &str, source: DocdexError) -> DocdexError {
    DocdexError::Ingestion { document_id: document_id.to_string(), source: Box::new(source) }
}

fn query_err(source: DocdexError) -> DocdexError {
    DocdexError::Query { source: Box::new(source) }
}

impl DocdexPipeline {
    /// Create a new [`DocdexPipelineBuilder`].
    pub fn builder() -> DocdexPipelineBuilder {
        DocdexPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &DocdexConfig {
        &self.config
    }

    /// Return a reference to the document registry.
    pub fn registry(&self) -> &DocumentRegistry {
        &self.registry
    }

    /// Ingest one document: chunk, embed, store, then register.
    ///
    /// Chunk embeddings are obtained in a single batched call and written
    /// to the vector store in one bulk operation. The registry entry is
    /// written only after the store accepts the write, so a failed
    /// ingestion leaves no partial state behind. Returns the number of
    /// chunks written; a document whose text yields no chunks is
    /// registered with a chunk count of zero and no store call is made.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::Ingestion`] wrapping the embedder or store
    /// failure. Nothing is retried.
    pub async fn ingest(&self, document: &Document) -> Result<usize> {
        let chunks = self.chunker.chunk(document);
        if chunks.is_empty() {
            self.registry
                .insert(DocumentEntry {
                    document_id: document.id.clone(),
                    filename: document.filename.clone(),
                    text: Some(document.text.clone()),
                    chunk_count: 0,
                    ingested_at: Utc::now(),
                })
                .await;
            info!(document_id = %document.id, chunk_count = 0, "ingested document (no chunks)");
            return Ok(0);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await.map_err(|e| {
            error!(document_id = %document.id, error = %e, "embedding failed during ingestion");
            ingest_err(&document.id, e)
        })?;

        let records: Vec<EmbeddingRecord> = chunks
            .iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| EmbeddingRecord {
                chunk_id: chunk.id.clone(),
                embedding,
                text: chunk.text.clone(),
                metadata: ChunkMetadata::new(document, chunk),
            })
            .collect();

        self.store.add(&records).await.map_err(|e| {
            error!(document_id = %document.id, error = %e, "store write failed during ingestion");
            ingest_err(&document.id, e)
        })?;

        let chunk_count = records.len();
        self.registry
            .insert(DocumentEntry {
                document_id: document.id.clone(),
                filename: document.filename.clone(),
                text: Some(document.text.clone()),
                chunk_count,
                ingested_at: Utc::now(),
            })
            .await;
        info!(document_id = %document.id, chunk_count, "ingested document");

        Ok(chunk_count)
    }

    /// Convert a file and ingest the result as a new document.
    ///
    /// Mints a fresh document identifier, derives the filename from the
    /// path, and runs the normal ingest flow on the converted text.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::Config`] when no converter is configured,
    /// or [`DocdexError::Conversion`] when the converter rejects the
    /// file; in both cases the registry is left untouched.
    pub async fn ingest_file(&self, path: &Path) -> Result<IngestReport> {
        let converter = self
            .converter
            .as_ref()
            .ok_or_else(|| DocdexError::Config("no converter configured".to_string()))?;

        let text = converter.convert(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let document = Document::new(filename, text);
        let chunk_count = self.ingest(&document).await?;

        Ok(IngestReport {
            document_id: document.id,
            filename: document.filename,
            chunk_count,
        })
    }

    /// Retrieve the most relevant chunks for a query, returning the
    /// configured `top_k` results.
    pub async fn retrieve(&self, query: &str) -> Result<QueryResponse> {
        self.retrieve_n(query, self.config.top_k).await
    }

    /// Retrieve up to `n` most relevant chunks for a query.
    ///
    /// The query is embedded as a single-item batch and searched against
    /// the vector store. Each match's similarity is `1 - distance`, and
    /// results keep the store's ascending-distance order, so they come
    /// back sorted by non-increasing similarity. An empty store yields
    /// zero results, not an error; when `n` exceeds the store size every
    /// stored chunk is returned.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::Query`] wrapping the embedder or store
    /// failure.
    pub async fn retrieve_n(&self, query: &str, n: usize) -> Result<QueryResponse> {
        let embedding = self.embedder.embed(query).await.map_err(|e| {
            error!(error = %e, "embedding failed during query");
            query_err(e)
        })?;

        let matches = self.store.query(&embedding, n).await.map_err(|e| {
            error!(error = %e, "vector store query failed");
            query_err(e)
        })?;

        let results: Vec<SearchResult> = matches
            .into_iter()
            .map(|m| SearchResult {
                text: m.text,
                metadata: m.metadata,
                similarity: 1.0 - m.distance,
            })
            .collect();

        let total_results = results.len();
        info!(result_count = total_results, "query completed");

        Ok(QueryResponse { query: query.to_string(), results, total_results })
    }

    /// List all known documents with filename and chunk count.
    pub async fn list_documents(&self) -> Vec<DocumentSummary> {
        self.registry.list().await
    }

    /// Look up one document's registry entry.
    pub async fn document(&self, document_id: &str) -> Option<DocumentEntry> {
        self.registry.get(document_id).await
    }
}

/// Builder for constructing a [`DocdexPipeline`].
///
/// `config`, `embedder`, and `store` are required. The chunker defaults
/// to a [`SentenceBoundaryChunker`] built from the config's chunk
/// parameters; the converter is optional and only needed for
/// [`DocdexPipeline::ingest_file`].
#[derive(Default)]
pub struct DocdexPipelineBuilder {
    config: Option<DocdexConfig>,
    embedder: Option<Arc<dyn Embedder>>,
    store: Option<Arc<dyn VectorStore>>,
    chunker: Option<Arc<dyn Chunker>>,
    converter: Option<Arc<dyn Converter>>,
}

impl DocdexPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: DocdexConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedder.
    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector store backend.
    pub fn store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set an optional file converter, enabling
    /// [`DocdexPipeline::ingest_file`].
    pub fn converter(mut self, converter: Arc<dyn Converter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Build the [`DocdexPipeline`], validating that required components
    /// are set.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::Config`] if `config`, `embedder`, or
    /// `store` is missing.
    pub fn build(self) -> Result<DocdexPipeline> {
        let config =
            self.config.ok_or_else(|| DocdexError::Config("config is required".to_string()))?;
        let embedder =
            self.embedder.ok_or_else(|| DocdexError::Config("embedder is required".to_string()))?;
        let store =
            self.store.ok_or_else(|| DocdexError::Config("store is required".to_string()))?;
        let chunker = self.chunker.unwrap_or_else(|| {
            Arc::new(SentenceBoundaryChunker::new(config.chunk_size, config.chunk_overlap))
        });

        Ok(DocdexPipeline {
            config,
            embedder,
            store,
            chunker,
            converter: self.converter,
            registry: DocumentRegistry::new(),
        })
    }
}
