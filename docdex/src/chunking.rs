//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and its default
//! implementation, [`SentenceBoundaryChunker`], which splits text into
//! overlapping windows that prefer to end at a sentence period or a
//! newline.

use crate::document::{Chunk, Document};

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s with text and position but no
/// embeddings. Embeddings are attached later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document text is empty or blank.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits text into overlapping windows, preferring sentence boundaries.
///
/// Each window targets `chunk_size` characters. When a window would cut
/// mid-sentence, the splitter looks backward for the last period or
/// newline and ends the chunk there instead, provided that boundary sits
/// past the window's midpoint. Consecutive chunks share `overlap`
/// characters of context.
///
/// # Example
///
/// ```rust,ignore
/// use docdex::SentenceBoundaryChunker;
///
/// let chunker = SentenceBoundaryChunker::new(1000, 200);
/// let pieces = chunker.split("First sentence. Second sentence.");
/// ```
#[derive(Debug, Clone)]
pub struct SentenceBoundaryChunker {
    chunk_size: usize,
    overlap: usize,
}

impl Default for SentenceBoundaryChunker {
    fn default() -> Self {
        Self::new(1000, 200)
    }
}

impl SentenceBoundaryChunker {
    /// Create a new chunker.
    ///
    /// # Arguments
    ///
    /// * `chunk_size`: target number of characters per chunk
    /// * `overlap`: number of characters shared between consecutive chunks
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self { chunk_size, overlap }
    }

    /// Split raw text into trimmed, non-empty, overlapping pieces.
    ///
    /// Window positions are counted in characters and slicing always
    /// lands on char boundaries, so multi-byte input is safe. The cursor
    /// advance is clamped to at least one character per iteration, so the
    /// split terminates for every `chunk_size`/`overlap` combination.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() || self.chunk_size == 0 {
            return Vec::new();
        }

        // Byte offset of every char start, plus the end of the text, so a
        // char index maps straight to a safe slice position.
        let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        offsets.push(text.len());
        let total = offsets.len() - 1;

        let mut pieces = Vec::new();
        let mut start = 0usize;

        while start < total {
            let window_end = (start + self.chunk_size).min(total);
            let mut end = window_end;

            if window_end < total {
                let window = &text[offsets[start]..offsets[window_end]];
                // Later of the last sentence period and the last newline.
                let break_at = match (window.rfind('.'), window.rfind('\n')) {
                    (Some(p), Some(n)) => Some(p.max(n)),
                    (p, n) => p.or(n),
                };
                if let Some(byte) = break_at {
                    let break_char = start + window[..byte].chars().count();
                    // Honor the boundary only when it falls past the
                    // window midpoint; end the chunk just after it.
                    if break_char > start + self.chunk_size / 2 {
                        end = break_char + 1;
                    }
                }
            }

            let piece = text[offsets[start]..offsets[end]].trim();
            if !piece.is_empty() {
                pieces.push(piece.to_string());
            }

            // Once the chosen end reaches the end of the text the input
            // is fully covered.
            if end >= total {
                break;
            }
            // Step back by the overlap, clamped so the cursor always
            // advances even when overlap >= chunk_size.
            start = end.saturating_sub(self.overlap).max(start + 1);
        }

        pieces
    }
}

impl Chunker for SentenceBoundaryChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        self.split(&document.text)
            .into_iter()
            .enumerate()
            .map(|(index, text)| Chunk {
                id: Chunk::derive_id(&document.id, index),
                index,
                text,
                document_id: document.id.clone(),
            })
            .collect()
    }
}
