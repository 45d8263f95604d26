//! Configuration for the ingestion and retrieval pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{DocdexError, Result};

/// Configuration parameters for the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocdexConfig {
    /// Target chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Default number of results returned by retrieval.
    pub top_k: usize,
}

impl Default for DocdexConfig {
    fn default() -> Self {
        Self { chunk_size: 1000, chunk_overlap: 200, top_k: 5 }
    }
}

impl DocdexConfig {
    /// Create a new builder for constructing a [`DocdexConfig`].
    pub fn builder() -> DocdexConfigBuilder {
        DocdexConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`DocdexConfig`].
#[derive(Debug, Clone, Default)]
pub struct DocdexConfigBuilder {
    config: DocdexConfig,
}

impl DocdexConfigBuilder {
    /// Set the target chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the default number of retrieval results.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Build the [`DocdexConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::Config`] if:
    /// - `chunk_size == 0`
    /// - `chunk_overlap >= chunk_size`
    /// - `top_k == 0`
    pub fn build(self) -> Result<DocdexConfig> {
        if self.config.chunk_size == 0 {
            return Err(DocdexError::Config("chunk_size must be greater than zero".to_string()));
        }
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(DocdexError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.top_k == 0 {
            return Err(DocdexError::Config("top_k must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}
