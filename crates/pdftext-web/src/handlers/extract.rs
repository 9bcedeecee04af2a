use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde_json::Value;

use pdftext_core::{ExtractedText, decode_base64};

use crate::error::ApiError;
use crate::models::{self, ExtractResponse};
use crate::state::AppState;

/// `POST /extract-pdf`: validate, decode, extract.
pub async fn extract_pdf(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| reject(rejection, &state))?;
    let encoded = models::pdf_field(&body)?;

    tracing::info!("Received PDF extraction request. Processing...");

    let bytes = decode_base64(encoded)?;
    let extracted = extract_blocking(&state, bytes).await?;

    if extracted.is_blank() {
        tracing::warn!(pages = extracted.pages, "No text extracted from PDF");
    } else {
        tracing::info!(
            backend = extracted.backend,
            pages = extracted.pages,
            "Successfully extracted {} characters",
            extracted.characters
        );
    }

    Ok(Json(ExtractResponse::from(extracted)))
}

fn reject(rejection: JsonRejection, state: &AppState) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::PayloadTooLarge {
            limit: state.config.max_payload_bytes,
        };
    }
    tracing::debug!("JSON rejection: {}", rejection.body_text());
    ApiError::InvalidRequest(models::NOT_JSON.to_string())
}

/// Run extraction on a blocking thread; MuPDF is CPU-bound and not `Send`,
/// so the document is opened and dropped inside the closure.
async fn extract_blocking(state: &AppState, bytes: Vec<u8>) -> Result<ExtractedText, ApiError> {
    let extractor = state.extractor.clone();
    let extracted = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
        .await
        .map_err(|e| ApiError::Internal(format!("extraction task failed: {}", e)))??;
    Ok(extracted)
}
