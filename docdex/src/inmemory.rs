//! In-memory vector store using cosine distance.
//!
//! This module provides [`InMemoryVectorStore`], a zero-dependency store
//! backed by a `HashMap` protected by a `tokio::sync::RwLock`. It is
//! suitable for development, testing, and small single-node deployments.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::document::{ChunkMetadata, EmbeddingRecord};
use crate::error::{DocdexError, Result};
use crate::vectorstore::{StoreMatch, VectorStore};

const BACKEND: &str = "InMemory";

/// An in-memory vector store ranking by cosine distance.
///
/// Records are keyed by chunk id. All operations are async-safe via
/// `tokio::sync::RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    records: RwLock<HashMap<String, EmbeddingRecord>>,
}

impl InMemoryVectorStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// True when the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Snapshot of every stored metadata bundle.
    ///
    /// The snapshot is enough to rebuild the document registry's listing
    /// side; see [`DocumentRegistry::from_metadata`](crate::registry::DocumentRegistry::from_metadata).
    pub async fn metadata_snapshot(&self) -> Vec<ChunkMetadata> {
        self.records.read().await.values().map(|r| r.metadata.clone()).collect()
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(&self, records: &[EmbeddingRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut store = self.records.write().await;

        // Validate the whole batch before touching the map; a rejected
        // record must not leave a partial write behind.
        let mut expected_dim = store.values().next().map(|r| r.embedding.len());
        let mut incoming: HashSet<&str> = HashSet::with_capacity(records.len());
        for record in records {
            if store.contains_key(&record.chunk_id) || !incoming.insert(&record.chunk_id) {
                return Err(DocdexError::StoreWrite {
                    backend: BACKEND.to_string(),
                    message: format!("chunk id '{}' already exists", record.chunk_id),
                });
            }
            match expected_dim {
                Some(dim) if record.embedding.len() != dim => {
                    return Err(DocdexError::StoreWrite {
                        backend: BACKEND.to_string(),
                        message: format!(
                            "record '{}' has dimensionality {}, store has {dim}",
                            record.chunk_id,
                            record.embedding.len()
                        ),
                    });
                }
                Some(_) => {}
                None => expected_dim = Some(record.embedding.len()),
            }
        }

        for record in records {
            store.insert(record.chunk_id.clone(), record.clone());
        }
        debug!(backend = BACKEND, added = records.len(), total = store.len(), "stored records");
        Ok(())
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<StoreMatch>> {
        let store = self.records.read().await;
        if store.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        if let Some(record) = store.values().next() {
            if record.embedding.len() != embedding.len() {
                return Err(DocdexError::StoreQuery {
                    backend: BACKEND.to_string(),
                    message: format!(
                        "query dimensionality {} does not match stored {}",
                        embedding.len(),
                        record.embedding.len()
                    ),
                });
            }
        }

        let mut matches: Vec<StoreMatch> = store
            .values()
            .map(|record| StoreMatch {
                chunk_id: record.chunk_id.clone(),
                text: record.text.clone(),
                metadata: record.metadata.clone(),
                distance: 1.0 - cosine_similarity(&record.embedding, embedding),
            })
            .collect();

        matches.sort_by(|a, b| {
            a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(k);
        Ok(matches)
    }
}
