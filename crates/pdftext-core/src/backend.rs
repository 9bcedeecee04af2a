use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    Open(String),
    #[error("PDF is encrypted")]
    Encrypted,
    #[error("failed to extract text from page {}: {message}", .index + 1)]
    Page { index: usize, message: String },
    #[error("PDF parser panicked: {0}")]
    Panicked(String),
}

/// Trait for PDF parsing backends.
///
/// Implementors only parse the document and hand out per-page text; page
/// iteration, joining and fallback handling live in
/// [`crate::extractor::TextExtractor`].
pub trait PdfBackend: Send + Sync {
    /// Short identifier used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Parse an in-memory PDF.
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>, BackendError>;
}

/// A parsed document, valid for the duration of a single extraction.
pub trait PdfDocument {
    /// Number of pages in the page tree.
    fn page_count(&self) -> usize;

    /// Text of the page at `index` (0-based, document order).
    fn page_text(&self, index: usize) -> Result<String, BackendError>;
}
