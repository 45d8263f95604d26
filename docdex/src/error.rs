//! Error types for the `docdex` crate.

use thiserror::Error;

/// Errors that can occur during document ingestion and retrieval.
#[derive(Debug, Error)]
pub enum DocdexError {
    /// The external document converter rejected or failed to read a file.
    #[error("Conversion error for '{path}': {message}")]
    Conversion {
        /// Path of the input file that failed to convert.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding backend that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A bulk write to the vector store failed.
    #[error("Vector store write error ({backend}): {message}")]
    StoreWrite {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A nearest-neighbor query against the vector store failed.
    #[error("Vector store query error ({backend}): {message}")]
    StoreQuery {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// Ingestion of a document was aborted.
    ///
    /// Carries the underlying embedder or store failure as its source.
    /// The document registry is left untouched when this is returned.
    #[error("Ingestion failed for document '{document_id}'")]
    Ingestion {
        /// Identifier of the document whose ingestion failed.
        document_id: String,
        /// The underlying failure.
        #[source]
        source: Box<DocdexError>,
    },

    /// A retrieval call was aborted.
    #[error("Query failed")]
    Query {
        /// The underlying failure.
        #[source]
        source: Box<DocdexError>,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for docdex operations.
pub type Result<T> = std::result::Result<T, DocdexError>;
