pub mod calls;
pub mod health;
pub mod reports;
pub mod webhooks;

use axum::{
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::app::AppState;
use crate::error::ErrorResponse;

/// Build the API router with all routes
pub fn api_router(webhook_body_limit_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        // Public routes
        .route("/health", get(health::health_check))
        // Call placement
        .route("/api/call", post(calls::start_screening_call))
        // Post-call assessment
        .route("/api/call-report/:call_id", get(reports::call_report))
        .route(
            "/api/call-report/:call_id/download",
            get(reports::download_report),
        )
        .route("/api/call-logs/:call_id", get(reports::call_logs))
        // Webhooks
        .route("/webhook/transcript", post(webhooks::transcript_event))
        .route(
            "/vapi/webhook",
            post(webhooks::platform_event)
                .route_layer(RequestBodyLimitLayer::new(webhook_body_limit_bytes)),
        )
        .route("/vapi/call-end", post(webhooks::call_end))
        .route("/transcript", get(webhooks::live_transcript))
        .fallback(not_found)
}

async fn not_found() -> (axum::http::StatusCode, Json<ErrorResponse>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            code: "NOT_FOUND".to_string(),
            message: "Route not found".to_string(),
            raw: None,
        }),
    )
}
