//! Call placement.
//!
//! One endpoint starts a screening call: the recruiter prompt is rebuilt from
//! the campaign profile and pushed onto the assistant, then the outbound call
//! is placed. The two platform writes are sequential with no rollback; a
//! placement failure leaves the updated prompt in place, which the next
//! placement overwrites anyway.

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::app::AppState;
use crate::domain::prompt::{self, CampaignProfile};
use crate::error::{ApiError, ApiResult};

const JSON_BODY_LIMIT: usize = 1024 * 1024;
const DOCUMENT_UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub voice_id: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub candidate_resume: Option<String>,
    #[serde(default)]
    pub client_info: Option<String>,
    #[serde(default)]
    pub candidate_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallPlaced {
    pub success: bool,
    pub assistant_id: String,
    pub call_id: String,
}

/// POST /api/call
///
/// Accepts either a JSON body or multipart form data; multipart may carry the
/// candidate's resume as a PDF upload, which is converted to text and used in
/// place of the built-in resume.
pub async fn start_screening_call(
    State(state): State<Arc<AppState>>,
    req: Request,
) -> ApiResult<Json<CallPlaced>> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let request = if content_type.starts_with("application/json") {
        let bytes = axum::body::to_bytes(req.into_body(), JSON_BODY_LIMIT)
            .await
            .map_err(|e| ApiError::BadRequest(format!("unreadable request body: {e}")))?;
        serde_json::from_slice::<CallRequest>(&bytes)
            .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))?
    } else if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?;
        parse_multipart(multipart).await?
    } else {
        return Err(ApiError::UnsupportedMediaType(format!(
            "expected application/json or multipart/form-data, got {content_type:?}"
        )));
    };

    if request.candidate_name.trim().is_empty()
        || request.phone_number.trim().is_empty()
        || request.voice_id.trim().is_empty()
    {
        return Err(ApiError::BadRequest(
            "Missing required fields: candidateName, phoneNumber, or voiceId".to_string(),
        ));
    }

    let voice = prompt::select_voice(&request.voice_id).to_string();

    let mut profile = CampaignProfile::default();
    if let Some(jd) = request.job_description {
        profile.job_description = jd;
    }
    if let Some(resume) = request.candidate_resume {
        profile.candidate_resume = resume;
    }
    if let Some(ci) = request.client_info {
        profile.client_info = ci;
    }
    if let Some(id) = request.candidate_id {
        profile.candidate_id = id;
    }

    let system_prompt =
        prompt::build_recruiter_prompt(&profile, &state.settings.policy, Utc::now());

    let assistant_id = state.settings.recruiter_assistant_id.clone();
    state
        .vapi
        .configure_recruiter_assistant(
            &assistant_id,
            &system_prompt,
            &voice,
            &state.settings.server_url,
        )
        .await?;

    let created = state
        .vapi
        .start_call(
            &assistant_id,
            &state.settings.vapi_phone_number_id,
            &request.candidate_name,
            &request.phone_number,
        )
        .await?;

    info!(call_id = %created.id, voice = %voice, "Screening call placed");

    Ok(Json(CallPlaced {
        success: true,
        assistant_id,
        call_id: created.id,
    }))
}

/// Folds multipart fields into a call request. The `resume` field, when it is
/// a PDF upload, replaces the campaign resume with the extracted text.
async fn parse_multipart(mut multipart: Multipart) -> ApiResult<CallRequest> {
    let mut request = CallRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart field: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "candidateName" => request.candidate_name = read_text_field(field).await?,
            "phoneNumber" => request.phone_number = read_text_field(field).await?,
            "voiceId" => request.voice_id = read_text_field(field).await?,
            "clientInfo" => request.client_info = Some(read_text_field(field).await?),
            "candidateId" => request.candidate_id = Some(read_text_field(field).await?),
            // document fields may be inline text or a PDF upload
            "jobDescription" => request.job_description = Some(read_document_field(field).await?),
            "resume" => request.candidate_resume = Some(read_document_field(field).await?),
            _ => {}
        }
    }

    Ok(request)
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart field: {e}")))
}

/// Reads a campaign document field: PDF uploads are converted to text, plain
/// text passes through, anything else is rejected.
async fn read_document_field(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    let name = field.name().unwrap_or_default().to_string();
    let content_type = field.content_type().unwrap_or_default().to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(format!("unreadable upload for {name}: {e}")))?;
    if bytes.len() > DOCUMENT_UPLOAD_LIMIT {
        return Err(ApiError::PayloadTooLarge(format!(
            "{name} upload exceeds 10 MB"
        )));
    }

    match content_type.as_str() {
        "application/pdf" => extract_pdf_text(&name, bytes.to_vec()).await,
        // form fields without an explicit type arrive as plain text
        "" | "text/plain" => String::from_utf8(bytes.to_vec())
            .map(|s| s.trim().to_string())
            .map_err(|_| ApiError::BadRequest(format!("{name} is not valid UTF-8 text"))),
        other => Err(ApiError::UnsupportedMediaType(format!(
            "{name} must be PDF or plain text, got {other:?}"
        ))),
    }
}

/// PDF text extraction is CPU-bound, so it runs off the async runtime.
async fn extract_pdf_text(name: &str, bytes: Vec<u8>) -> ApiResult<String> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
        .map_err(|e| ApiError::BadRequest(format!("could not read PDF for {name}: {e}")))?;

    let trimmed = text.trim().to_string();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "PDF for {name} contains no extractable text"
        )));
    }
    Ok(trimmed)
}
