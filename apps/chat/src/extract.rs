//! PDF text extraction. Turns an attached resume into the plain text the backend reads.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::errors::ExtractError;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, pdf: Bytes) -> Result<String, ExtractError>;
}

/// Extractor backed by the `pdf-extract` crate.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, pdf: Bytes) -> Result<String, ExtractError> {
        // pdf-extract is synchronous and CPU-bound; a panic inside it comes back as a JoinError.
        let pages = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem_by_pages(&pdf).map_err(|e| e.to_string())
        })
        .await?
        .map_err(ExtractError::Pdf)?;

        let text = join_pages(&pages);
        debug!("Extracted {} chars from {} pages", text.len(), pages.len());
        Ok(text)
    }
}

/// One line per page, in page order. Inside a page every whitespace run collapses to a
/// single space, so text items end up joined by exactly one space.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| page.as_ref().split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
