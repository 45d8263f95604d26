//! Converter trait for turning source files into plain text.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// An external document-to-text converter.
///
/// The conversion engine itself (PDF parsing, OCR) lives outside this
/// crate; implementations adapt one engine to this seam.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Convert the file at `path` to plain text.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::Conversion`](crate::error::DocdexError::Conversion)
    /// on unreadable or malformed input.
    async fn convert(&self, path: &Path) -> Result<String>;
}
