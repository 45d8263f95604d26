//! In-memory document registry.
//!
//! Maps document identifiers to their listing metadata. The registry is
//! process-lifetime state and is not persisted, while the vector store
//! may be; [`DocumentRegistry::from_metadata`] rebuilds the listing side
//! from store metadata after a restart.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::document::ChunkMetadata;

/// Registry entry for one ingested document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentEntry {
    /// The document's identifier.
    pub document_id: String,
    /// Original filename.
    pub filename: String,
    /// Full converted text. `None` for entries rebuilt from store
    /// metadata, which does not carry the text.
    pub text: Option<String>,
    /// Number of chunks the document was split into.
    pub chunk_count: usize,
    /// When the document was registered.
    pub ingested_at: DateTime<Utc>,
}

/// Listing summary for one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSummary {
    /// The document's identifier.
    pub document_id: String,
    /// Original filename.
    pub filename: String,
    /// Number of chunks the document was split into.
    pub chunk_count: usize,
}

/// In-memory mapping from document identifier to [`DocumentEntry`].
///
/// Entries are inserted only after a successful vector store write and
/// are never evicted.
#[derive(Debug, Default)]
pub struct DocumentRegistry {
    entries: RwLock<HashMap<String, DocumentEntry>>,
}

impl DocumentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from stored chunk metadata.
    ///
    /// Groups chunks by owning document and recovers filename and chunk
    /// count; the result is a pure function of the metadata. Full text is
    /// not recoverable from the store and is left `None`.
    pub fn from_metadata<'a, I>(metadata: I) -> Self
    where
        I: IntoIterator<Item = &'a ChunkMetadata>,
    {
        let now = Utc::now();
        let mut entries: HashMap<String, DocumentEntry> = HashMap::new();
        for meta in metadata {
            let entry =
                entries.entry(meta.document_id.clone()).or_insert_with(|| DocumentEntry {
                    document_id: meta.document_id.clone(),
                    filename: meta.filename.clone(),
                    text: None,
                    chunk_count: 0,
                    ingested_at: now,
                });
            entry.chunk_count += 1;
        }
        Self { entries: RwLock::new(entries) }
    }

    /// Register a document. Overwrites any entry with the same identifier.
    pub async fn insert(&self, entry: DocumentEntry) {
        self.entries.write().await.insert(entry.document_id.clone(), entry);
    }

    /// Look up one document by identifier.
    pub async fn get(&self, document_id: &str) -> Option<DocumentEntry> {
        self.entries.read().await.get(document_id).cloned()
    }

    /// Enumerate all known documents, oldest first.
    pub async fn list(&self) -> Vec<DocumentSummary> {
        let entries = self.entries.read().await;
        let mut all: Vec<&DocumentEntry> = entries.values().collect();
        all.sort_by(|a, b| {
            a.ingested_at.cmp(&b.ingested_at).then_with(|| a.document_id.cmp(&b.document_id))
        });
        all.into_iter()
            .map(|e| DocumentSummary {
                document_id: e.document_id.clone(),
                filename: e.filename.clone(),
                chunk_count: e.chunk_count,
            })
            .collect()
    }

    /// Number of registered documents.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when no documents are registered.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
