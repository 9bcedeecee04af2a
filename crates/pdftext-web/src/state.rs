use std::sync::Arc;

use pdftext_core::TextExtractor;
use pdftext_lopdf::LopdfBackend;
use pdftext_mupdf::MupdfBackend;

use crate::config::Config;

/// Shared application state accessible from all handlers.
///
/// Built once at startup and never mutated.
pub struct AppState {
    pub config: Config,
    pub extractor: TextExtractor,
}

impl AppState {
    /// MuPDF as the primary strategy, lopdf as fallback unless disabled.
    pub fn new(config: Config) -> Self {
        let mut extractor = TextExtractor::new(Arc::new(MupdfBackend::new()));
        if config.fallback {
            extractor = extractor.with_fallback(Arc::new(LopdfBackend::new()));
        }
        Self::with_extractor(config, extractor)
    }

    pub fn with_extractor(config: Config, extractor: TextExtractor) -> Self {
        Self { config, extractor }
    }
}
