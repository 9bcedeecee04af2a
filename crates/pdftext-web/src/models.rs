use serde::Serialize;
use serde_json::Value;

use pdftext_core::ExtractedText;

use crate::error::ApiError;

pub const NOT_JSON: &str = "Request must be JSON with a base64-encoded PDF";
pub const NO_PDF: &str = "No PDF data found in request";
pub const PDF_NOT_STRING: &str = "`pdf` must be a base64-encoded string";
pub const NO_TEXT_WARNING: &str = "No text could be extracted from the PDF";

// ── Request validation ──────────────────────────────────────────────────

/// Pull the base64 `pdf` field out of a JSON request body.
pub fn pdf_field(body: &Value) -> Result<&str, ApiError> {
    let object = body
        .as_object()
        .ok_or_else(|| ApiError::InvalidRequest(NOT_JSON.to_string()))?;

    match object.get("pdf") {
        None | Some(Value::Null) => Err(ApiError::InvalidRequest(NO_PDF.to_string())),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(ApiError::InvalidRequest(NO_PDF.to_string()))
        }
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ApiError::InvalidRequest(PDF_NOT_STRING.to_string())),
    }
}

// ── Response bodies ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub characters: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<ExtractedText> for ExtractResponse {
    fn from(extracted: ExtractedText) -> Self {
        let warning = extracted
            .is_blank()
            .then(|| NO_TEXT_WARNING.to_string());
        ExtractResponse {
            text: extracted.text,
            characters: extracted.characters,
            warning,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub usage: &'static str,
    pub version: &'static str,
}

impl Default for StatusResponse {
    fn default() -> Self {
        StatusResponse {
            status: "online",
            message: "PDF Extraction API is running",
            usage: "Send a POST request to /extract-pdf with a base64-encoded PDF",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rejection(body: Value) -> String {
        pdf_field(&body).unwrap_err().to_string()
    }

    #[test]
    fn accepts_string_field() {
        let body = json!({ "pdf": "JVBERi0=" });
        assert_eq!(pdf_field(&body).unwrap(), "JVBERi0=");
    }

    #[test]
    fn ignores_extra_fields() {
        let body = json!({ "pdf": "JVBERi0=", "filename": "a.pdf" });
        assert!(pdf_field(&body).is_ok());
    }

    #[test]
    fn rejects_missing_null_and_empty() {
        assert_eq!(rejection(json!({})), NO_PDF);
        assert_eq!(rejection(json!({ "pdf": null })), NO_PDF);
        assert_eq!(rejection(json!({ "pdf": "" })), NO_PDF);
        assert_eq!(rejection(json!({ "pdf": "   " })), NO_PDF);
    }

    #[test]
    fn rejects_non_string_pdf() {
        assert_eq!(rejection(json!({ "pdf": 42 })), PDF_NOT_STRING);
        assert_eq!(rejection(json!({ "pdf": ["JVBE"] })), PDF_NOT_STRING);
    }

    #[test]
    fn rejects_non_object_body() {
        assert_eq!(rejection(json!("JVBERi0=")), NOT_JSON);
        assert_eq!(rejection(json!([1, 2])), NOT_JSON);
    }

    #[test]
    fn blank_text_carries_warning() {
        let response = ExtractResponse::from(ExtractedText {
            text: "\n".into(),
            characters: 1,
            pages: 2,
            backend: "mupdf",
        });
        assert_eq!(response.warning.as_deref(), Some(NO_TEXT_WARNING));
        assert_eq!(response.characters, 1);

        let json = serde_json::to_value(ExtractResponse::from(ExtractedText {
            text: "hello".into(),
            characters: 5,
            pages: 1,
            backend: "mupdf",
        }))
        .unwrap();
        assert_eq!(json, json!({ "text": "hello", "characters": 5 }));
    }
}
