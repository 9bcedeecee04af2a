pub mod backend;
pub mod decode;
pub mod extractor;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use backend::{BackendError, PdfBackend, PdfDocument};
pub use decode::{DecodeError, decode_base64};
pub use extractor::{ExtractedText, ExtractionError, TextExtractor};
