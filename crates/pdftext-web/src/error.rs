use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use pdftext_core::{DecodeError, ExtractionError};

use crate::models::ErrorBody;

/// Everything that can go wrong between receiving a request and answering it.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("PDF payload exceeds the maximum allowed size of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("{0}")]
    Decode(#[from] DecodeError),

    #[error("{0}")]
    Extraction(#[from] ExtractionError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) | ApiError::Decode(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Extraction(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(detail) => {
                tracing::error!("Unexpected failure: {}", detail);
                "Internal server error".to_string()
            }
            ApiError::Extraction(e) => {
                tracing::error!("PDF extraction error: {}", e);
                self.to_string()
            }
            _ => {
                tracing::warn!("Rejected request: {}", self);
                self.to_string()
            }
        };

        (self.status(), Json(ErrorBody { error: message })).into_response()
    }
}
