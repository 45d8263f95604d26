//! Data types for documents, chunks, and retrieval results.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of characters kept in a chunk's metadata preview.
pub const PREVIEW_MAX_CHARS: usize = 200;

/// A source document: converted text plus identity.
///
/// Documents are immutable once created and live for the lifetime of the
/// process in the [`DocumentRegistry`](crate::registry::DocumentRegistry).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Opaque unique identifier, assigned at ingestion time and never reused.
    pub id: String,
    /// Original filename, carried into every chunk's metadata.
    pub filename: String,
    /// The full converted text.
    pub text: String,
}

impl Document {
    /// Create a document with a freshly minted v4 UUID identifier.
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), filename, text)
    }

    /// Create a document with a caller-supplied identifier.
    pub fn with_id(
        id: impl Into<String>,
        filename: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self { id: id.into(), filename: filename.into(), text: text.into() }
    }
}

/// A contiguous, trimmed segment of a [`Document`]'s text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Derived identifier, unique across the whole store.
    pub id: String,
    /// 0-based position within the document's chunk sequence.
    pub index: usize,
    /// The chunk text.
    pub text: String,
    /// The ID of the owning [`Document`].
    pub document_id: String,
}

impl Chunk {
    /// Derive the globally unique chunk identifier from the owning
    /// document's identifier and the chunk index.
    pub fn derive_id(document_id: &str, index: usize) -> String {
        format!("{document_id}_chunk_{index}")
    }
}

/// The metadata bundle stored alongside each embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkMetadata {
    /// Identifier of the owning document.
    pub document_id: String,
    /// Filename of the owning document.
    pub filename: String,
    /// 0-based position of the chunk within its document.
    pub chunk_index: usize,
    /// Chunk text capped at [`PREVIEW_MAX_CHARS`] characters, with `...`
    /// appended when truncated.
    pub preview: String,
}

impl ChunkMetadata {
    /// Build the metadata bundle for one chunk of a document.
    pub fn new(document: &Document, chunk: &Chunk) -> Self {
        Self {
            document_id: document.id.clone(),
            filename: document.filename.clone(),
            chunk_index: chunk.index,
            preview: preview_of(&chunk.text),
        }
    }
}

/// Truncate text to the preview cap, appending `...` when cut.
fn preview_of(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_MAX_CHARS) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// An embedding vector paired with its chunk's identity and metadata.
///
/// One record exists per chunk; all records in a store share the same
/// vector dimensionality.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingRecord {
    /// Identifier of the embedded chunk.
    pub chunk_id: String,
    /// The embedding vector.
    pub embedding: Vec<f32>,
    /// Full chunk text, returned verbatim by queries.
    pub text: String,
    /// The chunk's metadata bundle.
    pub metadata: ChunkMetadata,
}

/// A retrieved chunk paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// The retrieved chunk text.
    pub text: String,
    /// The chunk's metadata bundle.
    pub metadata: ChunkMetadata,
    /// `1 - cosine distance`, in `[-1, 1]`; higher is more relevant.
    pub similarity: f32,
}

/// A ranked answer to a retrieval call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryResponse {
    /// The query text as submitted.
    pub query: String,
    /// Results ordered by non-increasing similarity.
    pub results: Vec<SearchResult>,
    /// Number of results returned.
    pub total_results: usize,
}

/// Summary returned after ingesting a file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestReport {
    /// Identifier minted for the ingested document.
    pub document_id: String,
    /// Filename derived from the ingested path.
    pub filename: String,
    /// Number of chunks written to the store.
    pub chunk_count: usize,
}
