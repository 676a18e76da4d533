//! Post-call assessment endpoints.
//!
//! All three endpoints share the same front half: fetch the call record,
//! normalize the transcript, enforce the size ceiling. They differ in which
//! extraction runs and how the result is serialized.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::domain::assessment::CandidateAssessment;
use crate::domain::extraction::{self, ScreeningOutcome};
use crate::domain::transcript::{self, RawTranscript, TRANSCRIPT_UNAVAILABLE};
use crate::error::{ApiError, ApiResult};
use crate::report::{self, Theme};

const EXTRACTION_SYSTEM_PROMPT: &str =
    "You are a recruitment assistant bot that evaluates candidate screening calls based on strict rules.";

const ASSESSMENT_TEMPERATURE: f32 = 0.3;
const OUTCOME_TEMPERATURE: f32 = 0.4;

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub format: Option<String>,
}

fn validate_call_id(call_id: &str) -> ApiResult<()> {
    let ok = !call_id.is_empty()
        && call_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(ApiError::BadRequest("Invalid call ID format".to_string()))
    }
}

/// Fetches the call and reduces its transcript to dialogue text, enforcing
/// the processing ceiling.
async fn screening_transcript(state: &AppState, call_id: &str) -> ApiResult<String> {
    let record = state.vapi.get_call(call_id).await?;
    let raw = record
        .raw_transcript()
        .unwrap_or_else(|| RawTranscript::Text(TRANSCRIPT_UNAVAILABLE.to_string()));
    let dialogue = transcript::normalize(&raw);

    info!(call_id = %call_id, chars = dialogue.chars().count(), "Transcript normalized");
    extraction::check_transcript_len(&dialogue, state.settings.transcript_max_chars)?;
    Ok(dialogue)
}

/// Runs the structured-assessment extraction for one call.
async fn assess_call(state: &AppState, call_id: &str) -> ApiResult<CandidateAssessment> {
    let dialogue = screening_transcript(state, call_id).await?;
    let prompt = extraction::build_assessment_prompt(
        &dialogue,
        &state.settings.report_org_name,
        &state.settings.policy,
    );
    let raw = state
        .llm
        .chat(EXTRACTION_SYSTEM_PROMPT, &prompt, ASSESSMENT_TEMPERATURE)
        .await?;
    extraction::parse_assessment(&raw)
}

/// Runs the quick labeled-block screening for one call.
async fn screen_call(state: &AppState, call_id: &str) -> ApiResult<ScreeningOutcome> {
    let dialogue = screening_transcript(state, call_id).await?;
    let prompt = extraction::build_outcome_prompt(&dialogue, &state.settings.policy);
    let raw = state
        .llm
        .chat(EXTRACTION_SYSTEM_PROMPT, &prompt, OUTCOME_TEMPERATURE)
        .await?;
    extraction::parse_outcome(&raw)
}

/// GET /api/call-report/:call_id?format=json|html|pdf
pub async fn call_report(
    State(state): State<Arc<AppState>>,
    Path(call_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Response> {
    validate_call_id(&call_id)?;
    let format = query.format.as_deref().unwrap_or("json");
    if !matches!(format, "json" | "html" | "pdf") {
        return Err(ApiError::BadRequest(format!(
            "unsupported format {format:?}, expected json, html, or pdf"
        )));
    }

    let assessment = assess_call(&state, &call_id).await?;

    match format {
        "html" => {
            let html = report::render_html_report(
                &assessment,
                &state.settings.report_org_name,
                Theme::App,
            );
            Ok(attachment_response(
                Html(html).into_response(),
                &format!("call-report-{call_id}.html"),
            ))
        }
        "pdf" => {
            let pdf = render_report_pdf(&state, &assessment).await?;
            Ok(pdf_response(pdf, &call_id))
        }
        _ => Ok(DataResponse::new(assessment).into_response()),
    }
}

/// GET /api/call-report/:call_id/download
pub async fn download_report(
    State(state): State<Arc<AppState>>,
    Path(call_id): Path<String>,
) -> ApiResult<Response> {
    validate_call_id(&call_id)?;
    let assessment = assess_call(&state, &call_id).await?;
    let pdf = render_report_pdf(&state, &assessment).await?;
    Ok(pdf_response(pdf, &call_id))
}

/// GET /api/call-logs/:call_id
///
/// Serves the quick screening outcome as a plain-text attachment.
pub async fn call_logs(
    State(state): State<Arc<AppState>>,
    Path(call_id): Path<String>,
) -> ApiResult<Response> {
    validate_call_id(&call_id)?;
    let outcome = screen_call(&state, &call_id).await?;
    let body = report::render_outcome_text(&outcome);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    let disposition = format!("attachment; filename=\"call-evaluation-{call_id}.txt\"");
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("invalid header value: {e}")))?,
    );
    Ok((StatusCode::OK, headers, body).into_response())
}

async fn render_report_pdf(
    state: &AppState,
    assessment: &CandidateAssessment,
) -> ApiResult<Vec<u8>> {
    let html =
        report::render_html_report(assessment, &state.settings.report_org_name, Theme::Print);
    state.pdf.render(&html).await
}

fn pdf_response(pdf: Vec<u8>, call_id: &str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    let response = (StatusCode::OK, headers, pdf).into_response();
    attachment_response(response, &format!("call-report-{call_id}.pdf"))
}

/// Marks a response as a download with the given filename.
fn attachment_response(mut response: Response, filename: &str) -> Response {
    let disposition = format!("attachment; filename=\"{filename}\"");
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        response
            .headers_mut()
            .insert(header::CONTENT_DISPOSITION, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_ids_are_restricted_to_url_safe_characters() {
        assert!(validate_call_id("abc-123_DEF").is_ok());
        assert!(validate_call_id("").is_err());
        assert!(validate_call_id("../etc/passwd").is_err());
        assert!(validate_call_id("id with spaces").is_err());
    }
}
