use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use thiserror::Error;

use crate::backend::{BackendError, PdfBackend, PdfDocument};

/// Text extracted from a whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    /// Length of `text` in characters.
    pub characters: usize,
    /// Number of pages iterated.
    pub pages: usize,
    /// Name of the backend that produced `text`.
    pub backend: &'static str,
}

impl ExtractedText {
    fn from_pages(pages_text: Vec<String>, backend: &'static str) -> Self {
        let pages = pages_text.len();
        let text = pages_text.join("\n");
        let characters = text.chars().count();
        Self {
            text,
            characters,
            pages,
            backend,
        }
    }

    /// True when the document yielded nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Every strategy that was tried failed for the whole document.
#[derive(Error, Debug)]
#[error("could not extract text from PDF ({})", describe(.attempts))]
pub struct ExtractionError {
    /// `(backend name, failure)` in the order the backends were tried.
    pub attempts: Vec<(&'static str, BackendError)>,
}

fn describe(attempts: &[(&'static str, BackendError)]) -> String {
    attempts
        .iter()
        .map(|(name, err)| format!("{name}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Page-by-page extractor with an optional fallback strategy.
///
/// The fallback only runs when the primary backend fails for the whole
/// document. A single page failing is logged and treated as empty text.
#[derive(Clone)]
pub struct TextExtractor {
    primary: Arc<dyn PdfBackend>,
    fallback: Option<Arc<dyn PdfBackend>>,
}

impl TextExtractor {
    pub fn new(primary: Arc<dyn PdfBackend>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn PdfBackend>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Names of the configured backends, in the order they are tried.
    pub fn backends(&self) -> Vec<&'static str> {
        std::iter::once(&self.primary)
            .chain(self.fallback.as_ref())
            .map(|b| b.name())
            .collect()
    }

    /// Extract the text of every page of `bytes`, joined by newlines.
    ///
    /// This is CPU-bound and may call into C code; async callers should run
    /// it on a blocking thread.
    pub fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let mut attempts = Vec::new();

        match run_backend(self.primary.as_ref(), bytes) {
            Ok(extracted) => return Ok(extracted),
            Err(e) => {
                tracing::warn!(
                    backend = self.primary.name(),
                    error = %e,
                    "primary extraction failed"
                );
                attempts.push((self.primary.name(), e));
            }
        }

        if let Some(fallback) = &self.fallback {
            tracing::info!(backend = fallback.name(), "trying fallback extraction");
            match run_backend(fallback.as_ref(), bytes) {
                Ok(extracted) => return Ok(extracted),
                Err(e) => {
                    tracing::warn!(
                        backend = fallback.name(),
                        error = %e,
                        "fallback extraction failed"
                    );
                    attempts.push((fallback.name(), e));
                }
            }
        }

        Err(ExtractionError { attempts })
    }
}

fn run_backend(backend: &dyn PdfBackend, bytes: &[u8]) -> Result<ExtractedText, BackendError> {
    let name = backend.name();

    // Parsers can panic on malformed input; treat that as a failed attempt.
    let document = panic::catch_unwind(AssertUnwindSafe(|| backend.open(bytes)))
        .map_err(|payload| BackendError::Panicked(panic_message(payload)))??;

    let page_count = document.page_count();
    tracing::info!(backend = name, pages = page_count, "PDF opened");

    let pages_text = (0..page_count)
        .map(|index| page_text_or_empty(document.as_ref(), index, name))
        .collect();

    Ok(ExtractedText::from_pages(pages_text, name))
}

fn page_text_or_empty(document: &dyn PdfDocument, index: usize, backend: &str) -> String {
    let result = panic::catch_unwind(AssertUnwindSafe(|| document.page_text(index)))
        .unwrap_or_else(|payload| Err(BackendError::Panicked(panic_message(payload))));

    match result {
        Ok(text) => {
            if text.is_empty() {
                tracing::warn!(backend, page = index + 1, "no text extracted from page");
            }
            text
        }
        Err(e) => {
            tracing::warn!(
                backend,
                page = index + 1,
                error = %e,
                "page extraction failed, using empty text"
            );
            String::new()
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
