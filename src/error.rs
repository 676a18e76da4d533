//! Unified API error handling
//!
//! Provides consistent error responses across all endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Non-2xx from the voice platform or LLM provider. The upstream status
    /// and body are forwarded so the caller sees what the platform said.
    #[error("Upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// The model returned nothing, or something else in the extraction
    /// pipeline failed without producing output worth inspecting.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// The model produced output that does not parse as the expected
    /// structure. The raw text is attached so a human can inspect it; it is
    /// never coerced into a default assessment.
    #[error("Extraction output did not parse: {message}")]
    ExtractionParse { message: String, raw: String },

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    /// Raw model output, attached only for extraction parse failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Extraction(_) | Self::ExtractionParse { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::Extraction(_) => "EXTRACTION_FAILED",
            Self::ExtractionParse { .. } => "EXTRACTION_PARSE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::NotFound(msg)
            | Self::BadRequest(msg)
            | Self::PayloadTooLarge(msg)
            | Self::UnsupportedMediaType(msg)
            | Self::Extraction(msg) => msg.clone(),
            Self::Upstream { body, .. } => body.clone(),
            Self::ExtractionParse { message, .. } => message.clone(),
            // Don't leak internal error details
            Self::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = ?e, "Internal server error");
            }
            Self::Upstream { status, body } => {
                tracing::error!(status = status, body = %body, "Upstream error");
            }
            Self::Extraction(_) | Self::ExtractionParse { .. } => {
                tracing::error!(error = %self, "Extraction error");
            }
            _ => {
                tracing::warn!(error = %self, "API error");
            }
        }

        let status = self.status_code();
        let raw = match &self {
            Self::ExtractionParse { raw, .. } => Some(raw.clone()),
            _ => None,
        };
        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.public_message(),
            raw,
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
