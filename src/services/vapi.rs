//! Voice platform client.
//!
//! Wraps the three platform operations the screening pipeline needs: pushing
//! the recruiter prompt onto the assistant, placing an outbound call, and
//! fetching a call record afterwards. Non-2xx platform responses are
//! forwarded to the caller with their original status and body.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error};

use crate::domain::transcript::RawTranscript;
use crate::error::ApiError;

/// Client for the voice platform API.
#[derive(Clone)]
pub struct VapiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Call record as returned by the platform. Only the fields the pipeline
/// reads are modeled; the transcript may live in any of three places
/// depending on how the call ended.
#[derive(Debug, Deserialize)]
pub struct CallRecord {
    #[serde(default)]
    pub transcript: Option<RawTranscript>,
    #[serde(default)]
    pub artifact: Option<CallArtifact>,
    #[serde(default)]
    pub call: Option<CallDetail>,
}

#[derive(Debug, Deserialize)]
pub struct CallArtifact {
    #[serde(default)]
    pub transcript: Option<RawTranscript>,
}

#[derive(Debug, Deserialize)]
pub struct CallDetail {
    #[serde(default)]
    pub transcripts: Vec<TranscriptEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptEntry {
    #[serde(default)]
    pub text: Option<String>,
}

impl CallRecord {
    /// The first transcript the record carries, in precedence order:
    /// top-level, artifact, then the per-call transcript list.
    pub fn raw_transcript(&self) -> Option<RawTranscript> {
        if let Some(t) = &self.transcript {
            return Some(t.clone());
        }
        if let Some(t) = self.artifact.as_ref().and_then(|a| a.transcript.as_ref()) {
            return Some(t.clone());
        }
        self.call
            .as_ref()
            .and_then(|c| c.transcripts.first())
            .and_then(|e| e.text.clone())
            .map(RawTranscript::Text)
    }
}

/// Response to a call placement.
#[derive(Debug, Deserialize)]
pub struct CreatedCall {
    pub id: String,
}

impl VapiClient {
    pub fn new(base_url: &str, api_key: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(base_url = base_url, "Voice platform client initialized");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetches one call record by platform call ID.
    pub async fn get_call(&self, call_id: &str) -> Result<CallRecord, ApiError> {
        let url = format!("{}/call/{}", self.base_url, call_id);
        debug!(url = %url, "Fetching call record");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Voice platform request failed");
                ApiError::Internal(anyhow::anyhow!("Voice platform unavailable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<CallRecord>().await.map_err(|e| {
            error!(error = %e, "Failed to parse call record");
            ApiError::Internal(anyhow::anyhow!("Invalid call record: {}", e))
        })
    }

    /// Pushes the recruiter configuration onto the assistant: system prompt,
    /// voice, reschedule tool, transcriber, and webhook target.
    pub async fn configure_recruiter_assistant(
        &self,
        assistant_id: &str,
        system_prompt: &str,
        voice_id: &str,
        webhook_url: &str,
    ) -> Result<(), ApiError> {
        let url = format!("{}/assistant/{}", self.base_url, assistant_id);
        let payload = json!({
            "voice": {
                "provider": "vapi",
                "voiceId": voice_id,
            },
            "model": {
                "provider": "openai",
                "model": "gpt-4o",
                "messages": [
                    {
                        "role": "assistant",
                        "content": system_prompt.trim(),
                    }
                ],
                "tools": [
                    {
                        "type": "apiRequest",
                        "name": "rescheduleCandidate",
                        "function": {
                            "name": "rescheduleCandidate",
                            "description": "Reschedules a candidate by sending candidateID and rescheduleTime to an external API",
                        },
                        "url": format!("{}/vapi/webhook", webhook_url.trim_end_matches('/')),
                        "method": "POST",
                        "body": {
                            "type": "object",
                            "properties": {
                                "candidateID": {
                                    "type": "string",
                                    "description": "The ID of the candidate",
                                },
                                "rescheduleTime": {
                                    "type": "string",
                                    "description": "The new scheduled time",
                                },
                            },
                            "required": ["candidateID", "rescheduleTime"],
                        },
                    }
                ],
            },
            "firstMessage": "Hi",
            "firstMessageMode": "assistant-speaks-first",
            "transcriber": {
                "provider": "deepgram",
                "language": "en",
            },
            "server": {
                "url": format!("{}/vapi/webhook", webhook_url.trim_end_matches('/')),
            },
        });

        debug!(url = %url, "Updating assistant configuration");

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Assistant update failed");
                ApiError::Internal(anyhow::anyhow!("Voice platform unavailable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Places the outbound call. Runs after the assistant update; there is no
    /// rollback of the prompt if placement fails.
    pub async fn start_call(
        &self,
        assistant_id: &str,
        phone_number_id: &str,
        candidate_name: &str,
        phone_number: &str,
    ) -> Result<CreatedCall, ApiError> {
        let url = format!("{}/call", self.base_url);
        let payload = json!({
            "customer": {
                "number": phone_number,
                "name": candidate_name,
            },
            "assistantId": assistant_id,
            "phoneNumberId": phone_number_id,
        });

        debug!(url = %url, "Placing outbound call");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Call placement failed");
                ApiError::Internal(anyhow::anyhow!("Voice platform unavailable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<CreatedCall>().await.map_err(|e| {
            error!(error = %e, "Failed to parse call placement response");
            ApiError::Internal(anyhow::anyhow!("Invalid call placement response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_precedence_is_top_level_then_artifact_then_call() {
        let record: CallRecord = serde_json::from_str(
            r#"{"transcript": "AI: Hi\nUSER: Yo", "artifact": {"transcript": ["AI: other"]}}"#,
        )
        .unwrap();
        assert!(matches!(
            record.raw_transcript(),
            Some(RawTranscript::Text(_))
        ));

        let record: CallRecord =
            serde_json::from_str(r#"{"artifact": {"transcript": ["AI: Hi", "USER: Yo"]}}"#)
                .unwrap();
        assert!(matches!(
            record.raw_transcript(),
            Some(RawTranscript::Lines(_))
        ));

        let record: CallRecord =
            serde_json::from_str(r#"{"call": {"transcripts": [{"text": "AI: Hi"}]}}"#).unwrap();
        match record.raw_transcript() {
            Some(RawTranscript::Text(t)) => assert_eq!(t, "AI: Hi"),
            other => panic!("unexpected transcript: {other:?}"),
        }
    }

    #[test]
    fn missing_transcript_is_none() {
        let record: CallRecord = serde_json::from_str("{}").unwrap();
        assert!(record.raw_transcript().is_none());
    }
}
