//! Embedder trait for mapping text into fixed-length vectors.

use async_trait::async_trait;

use crate::error::Result;

/// A collaborator that maps text to fixed-length numeric vectors.
///
/// Implementations wrap specific embedding backends behind a unified
/// async interface. The default [`embed_batch`](Embedder::embed_batch)
/// implementation calls [`embed`](Embedder::embed) sequentially; backends
/// that support native batching should override it.
///
/// # Example
///
/// ```rust,ignore
/// use docdex::Embedder;
///
/// let embedding = embedder.embed("hello world").await?;
/// assert_eq!(embedding.len(), embedder.dimensions());
/// ```
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs.
    ///
    /// Order-preserving: the output contains one vector per input text,
    /// in input order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of vectors produced by this embedder.
    fn dimensions(&self) -> usize;
}
