//! PDF text extraction backed by the `pdf-extract` crate.
//!
//! This module is only available when the `pdf` feature is enabled.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::convert::Converter;
use crate::error::{DocdexError, Result};

/// A [`Converter`] that extracts plain text from PDF files.
///
/// Thin adapter over `pdf-extract`. No OCR is attempted, so image-only
/// PDFs convert to empty text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfConverter;

impl PdfConverter {
    /// Create a new converter.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Converter for PdfConverter {
    async fn convert(&self, path: &Path) -> Result<String> {
        debug!(path = %path.display(), "extracting pdf text");
        let text = pdf_extract::extract_text(path).map_err(|e| DocdexError::Conversion {
            path: path.display().to_string(),
            message: format!("failed to extract text: {e}"),
        })?;
        Ok(text)
    }
}
