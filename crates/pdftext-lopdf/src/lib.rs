//! lopdf-based PDF backend.
//!
//! Implements [`PdfBackend`] with the pure-Rust [lopdf](https://crates.io/crates/lopdf)
//! parser. It shares no code with MuPDF, which makes it the fallback when
//! the primary backend rejects a document.

use lopdf::Document;

use pdftext_core::{BackendError, PdfBackend, PdfDocument};

#[cfg(any(test, feature = "fixture"))]
pub mod fixture;

/// The lopdf-based PDF backend.
#[derive(Debug, Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for LopdfBackend {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>, BackendError> {
        let inner = Document::load_mem(bytes).map_err(|e| BackendError::Open(e.to_string()))?;

        if inner.is_encrypted() {
            return Err(BackendError::Encrypted);
        }

        // get_pages() is keyed by 1-based page number in page-tree order.
        let page_numbers = inner.get_pages().into_keys().collect();

        Ok(Box::new(LopdfDocument {
            inner,
            page_numbers,
        }))
    }
}

/// A parsed PDF document backed by lopdf.
struct LopdfDocument {
    inner: Document,
    page_numbers: Vec<u32>,
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String, BackendError> {
        let page_number = self
            .page_numbers
            .get(index)
            .copied()
            .ok_or_else(|| BackendError::Page {
                index,
                message: "page index out of range".into(),
            })?;

        self.inner
            .extract_text(&[page_number])
            .map_err(|e| BackendError::Page {
                index,
                message: e.to_string(),
            })
    }
}
