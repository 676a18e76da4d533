//! Voice platform webhook receivers.
//!
//! Live transcript fragments arrive here during a call and accumulate in the
//! session store; status updates and tool calls arrive on the platform
//! webhook; the end-of-call report closes the session out.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

use crate::app::AppState;
use crate::domain::schedule;
use crate::error::{ApiError, ApiResult};

/// Session key for transcript events that carry no call ID.
const UNATTRIBUTED_SESSION: &str = "live";

/// Assistant prompt echoes are recognized by the prompt's opening words and
/// kept out of the transcript log.
const PROMPT_ECHO_MARKER: &str = "You are RecruitAI";

#[derive(Debug, Deserialize)]
pub struct TranscriptEvent {
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub call: Option<CallRef>,
    #[serde(default)]
    pub summary: Option<MessageBatch>,
    #[serde(default)]
    pub message: Option<InnerMessage>,
}

#[derive(Debug, Deserialize)]
pub struct CallRef {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MessageBatch {
    #[serde(default)]
    pub messages: Vec<SpokenMessage>,
}

#[derive(Debug, Deserialize)]
pub struct InnerMessage {
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub messages: Vec<SpokenMessage>,
    #[serde(default)]
    pub call: Option<CallRef>,
}

#[derive(Debug, Deserialize)]
pub struct SpokenMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

fn call_id_of(event: &TranscriptEvent) -> String {
    event
        .call
        .as_ref()
        .and_then(|c| c.id.clone())
        .or_else(|| {
            event
                .message
                .as_ref()
                .and_then(|m| m.call.as_ref())
                .and_then(|c| c.id.clone())
        })
        .unwrap_or_else(|| UNATTRIBUTED_SESSION.to_string())
}

/// POST /webhook/transcript
///
/// Accepts the three live-transcript payload shapes the platform emits and
/// appends each utterance once.
pub async fn transcript_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<TranscriptEvent>,
) -> StatusCode {
    let call_id = call_id_of(&event);

    let log_line = |speaker: &str, text: &str| {
        if text.contains(PROMPT_ECHO_MARKER) {
            return;
        }
        if state.sessions.append(&call_id, speaker, text) {
            info!(call_id = %call_id, speaker = %speaker.to_uppercase(), text = %text, "Transcript line");
        }
    };

    if event.event_type.as_deref() == Some("transcript") {
        if let (Some(speaker), Some(text)) = (&event.speaker, &event.transcript) {
            log_line(speaker, text);
        }
    } else if let Some(summary) = &event.summary {
        for msg in &summary.messages {
            if let (Some(role), Some(text)) = (&msg.role, &msg.message) {
                log_line(role, text);
            }
        }
    } else if let Some(message) = &event.message {
        if message.event_type.as_deref() == Some("conversation-update") {
            for msg in &message.messages {
                if let (Some(role), Some(text)) = (&msg.role, &msg.message) {
                    log_line(role, text);
                }
            }
        }
    }

    StatusCode::OK
}

#[derive(Debug, Default, Deserialize)]
pub struct TranscriptQuery {
    #[serde(default)]
    pub call_id: Option<String>,
}

/// GET /transcript
pub async fn live_transcript(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TranscriptQuery>,
) -> Json<Value> {
    match query.call_id {
        Some(call_id) => Json(json!({ "transcript": state.sessions.snapshot(&call_id) })),
        None => Json(json!({ "sessions": state.sessions.snapshot_all() })),
    }
}

/// POST /vapi/webhook
///
/// Status updates and tool calls. The route carries a body-size limit layer,
/// so oversized payloads are rejected before this handler runs.
pub async fn platform_event(body: Bytes) -> ApiResult<Json<Value>> {
    let data: Value = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON".to_string()))?;

    let message = &data["message"];
    match message["type"].as_str() {
        Some("status-update") => {
            info!(
                call_id = message["call"]["id"].as_str().unwrap_or("unknown"),
                status = message["status"].as_str().unwrap_or("unknown"),
                "Call status update"
            );
            Ok(Json(json!({ "received": true })))
        }
        Some("tool-calls") => {
            let results = handle_tool_calls(message);
            Ok(Json(json!({ "results": results })))
        }
        _ => Ok(Json(json!({ "received": true }))),
    }
}

/// Resolves rescheduleCandidate tool calls; other tools are acknowledged
/// without action.
fn handle_tool_calls(message: &Value) -> Vec<Value> {
    let empty = Vec::new();
    let calls = message["toolCallList"]
        .as_array()
        .or_else(|| message["toolCalls"].as_array())
        .unwrap_or(&empty);

    let mut results = Vec::new();
    for call in calls {
        let tool_call_id = call["id"].as_str().unwrap_or_default();
        let name = call["function"]["name"]
            .as_str()
            .or_else(|| call["name"].as_str())
            .unwrap_or_default();
        if name != "rescheduleCandidate" {
            results.push(json!({ "toolCallId": tool_call_id, "result": "ignored" }));
            continue;
        }

        let args = tool_arguments(call);
        let candidate_id = args["candidateID"].as_str().unwrap_or_default();
        let requested = args["rescheduleTime"].as_str().unwrap_or_default();
        let timezone = args["timeZone"].as_str().unwrap_or("EST");

        match resolve_reschedule(requested, timezone, Utc::now()) {
            Some(slot) => {
                let lead = schedule::lead_time(slot, Utc::now());
                info!(
                    candidate_id = %candidate_id,
                    scheduled = %slot.to_rfc3339(),
                    lead_minutes = lead.num_minutes(),
                    "Candidate rescheduled"
                );
                results.push(json!({
                    "toolCallId": tool_call_id,
                    "result": format!("scheduled for {}", slot.to_rfc3339()),
                }));
            }
            None => {
                warn!(
                    candidate_id = %candidate_id,
                    requested = %requested,
                    timezone = %timezone,
                    "Could not resolve reschedule time"
                );
                results.push(json!({
                    "toolCallId": tool_call_id,
                    "result": "error: could not resolve the requested time",
                }));
            }
        }
    }
    results
}

/// Tool arguments arrive either as a JSON object or as a JSON-encoded string.
fn tool_arguments(call: &Value) -> Value {
    let args = &call["function"]["arguments"];
    if args.is_object() {
        return args.clone();
    }
    if let Some(s) = args.as_str() {
        if let Ok(parsed) = serde_json::from_str::<Value>(s) {
            return parsed;
        }
    }
    call["arguments"].clone()
}

/// The assistant is instructed to send ISO 8601 UTC, but candidates' phrasing
/// sometimes comes through verbatim, so spoken forms are resolved too.
fn resolve_reschedule(
    requested: &str,
    timezone: &str,
    reference: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(requested) {
        return Some(parsed.with_timezone(&Utc));
    }
    schedule::resolve_slot(requested, timezone, reference)
}

/// POST /vapi/call-end
pub async fn call_end(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let message = &body["message"];
    let call_id = message["call"]["id"].as_str().unwrap_or("unknown");

    info!(
        call_id = %call_id,
        ended_reason = message["endedReason"].as_str().unwrap_or("unknown"),
        summary = message["summary"].as_str().unwrap_or(""),
        "End-of-call report received"
    );

    if call_id != "unknown" {
        state.sessions.remove(call_id);
    }

    Json(json!({ "status": "acknowledged" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn iso_times_pass_through_and_phrases_resolve() {
        let reference = Utc.with_ymd_and_hms(2026, 3, 10, 15, 0, 0).unwrap();
        assert_eq!(
            resolve_reschedule("2026-03-12T19:00:00Z", "EST", reference),
            Some(Utc.with_ymd_and_hms(2026, 3, 12, 19, 0, 0).unwrap())
        );
        assert_eq!(
            resolve_reschedule("tomorrow at 2pm", "EST", reference),
            Some(Utc.with_ymd_and_hms(2026, 3, 11, 19, 0, 0).unwrap())
        );
        assert_eq!(resolve_reschedule("whenever", "EST", reference), None);
    }

    #[test]
    fn tool_arguments_accept_object_or_encoded_string() {
        let call = json!({"function": {"arguments": {"candidateID": "c1"}}});
        assert_eq!(tool_arguments(&call)["candidateID"], "c1");

        let call = json!({"function": {"arguments": "{\"candidateID\": \"c2\"}"}});
        assert_eq!(tool_arguments(&call)["candidateID"], "c2");
    }

    #[test]
    fn transcript_events_deserialize_all_three_shapes() {
        let live: TranscriptEvent = serde_json::from_str(
            r#"{"type": "transcript", "speaker": "user", "transcript": "hello", "call": {"id": "c1"}}"#,
        )
        .unwrap();
        assert_eq!(live.event_type.as_deref(), Some("transcript"));
        assert_eq!(call_id_of(&live), "c1");

        let summary: TranscriptEvent = serde_json::from_str(
            r#"{"summary": {"messages": [{"role": "user", "message": "hi"}]}}"#,
        )
        .unwrap();
        assert_eq!(summary.summary.unwrap().messages.len(), 1);

        let update: TranscriptEvent = serde_json::from_str(
            r#"{"message": {"type": "conversation-update", "messages": [], "call": {"id": "c9"}}}"#,
        )
        .unwrap();
        assert_eq!(call_id_of(&update), "c9");

        let bare: TranscriptEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(call_id_of(&bare), UNATTRIBUTED_SESSION);
    }
}
