//! Vector store trait for persisting embeddings and answering
//! nearest-neighbor queries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::{ChunkMetadata, EmbeddingRecord};
use crate::error::Result;

/// A single nearest-neighbor match returned by [`VectorStore::query`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreMatch {
    /// Identifier of the matched chunk.
    pub chunk_id: String,
    /// Full chunk text.
    pub text: String,
    /// Metadata bundle stored with the chunk.
    pub metadata: ChunkMetadata,
    /// Cosine distance to the query vector, in `[0, 2]`.
    pub distance: f32,
}

/// A storage backend for embeddings with nearest-neighbor search.
///
/// # Example
///
/// ```rust,ignore
/// use docdex::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.add(&records).await?;
/// let matches = store.query(&query_embedding, 5).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Bulk-insert records. The write is all-or-nothing: a rejected
    /// record leaves the store unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::StoreWrite`](crate::error::DocdexError::StoreWrite)
    /// if a chunk id already exists or a record's dimensionality differs
    /// from the store's.
    async fn add(&self, records: &[EmbeddingRecord]) -> Result<()>;

    /// Return up to `k` records nearest to `embedding`, ordered by
    /// ascending cosine distance.
    ///
    /// An empty store yields an empty list, not an error.
    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<StoreMatch>>;
}
