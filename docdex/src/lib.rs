//! # docdex
//!
//! Chunking, embedding, and semantic retrieval for local document search.
//!
//! docdex turns converted document text into overlapping, boundary-aware
//! chunks, embeds each chunk through a pluggable [`Embedder`], persists
//! the vectors in a pluggable [`VectorStore`], and answers free-text
//! queries with a ranked list of the most relevant chunks. The
//! conversion engine, the embedding model, and the vector database stay
//! behind traits; this crate is the contract for turning text into
//! retrievable, ranked chunks.
//!
//! ## Quick start
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
//!
//! ## Feature flags
//!
//! - `openai`: [`OpenAiEmbedder`] for OpenAI-compatible embeddings APIs.
//! - `pdf`: [`PdfConverter`] backed by the `pdf-extract` crate.

pub mod chunking;
pub mod config;
pub mod convert;
pub mod document;
pub mod embedding;
pub mod error;
pub mod inmemory;
#[cfg(feature = "openai")]
pub mod openai;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod pipeline;
pub mod registry;
pub mod vectorstore;

pub use chunking::{Chunker, SentenceBoundaryChunker};
pub use config::{DocdexConfig, DocdexConfigBuilder};
pub use convert::Converter;
pub use document::{
    Chunk, ChunkMetadata, Document, EmbeddingRecord, IngestReport, PREVIEW_MAX_CHARS,
    QueryResponse, SearchResult,
};
pub use embedding::Embedder;
pub use error::{DocdexError, Result};
pub use inmemory::InMemoryVectorStore;
#[cfg(feature = "openai")]
pub use openai::OpenAiEmbedder;
#[cfg(feature = "pdf")]
pub use pdf::PdfConverter;
pub use pipeline::{DocdexPipeline, DocdexPipelineBuilder};
pub use registry::{DocumentEntry, DocumentRegistry, DocumentSummary};
pub use vectorstore::{StoreMatch, VectorStore};
