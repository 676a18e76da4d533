use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    #[allow(dead_code)]
    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

/// Screening thresholds that the campaign rule tables disagree on.
///
/// Different campaign variants used age 40 vs 45 and commute 40 vs 50 minutes,
/// so these are surfaced as configuration with defaults rather than
/// hard-coding one variant's numbers.
#[derive(Debug, Clone)]
pub struct ScreeningPolicy {
    /// Age at or above which the physical-demands confirmation applies.
    pub age_physical_confirm_min: u32,
    /// Age above which the age criterion is an automatic Fail.
    pub age_fail_over: u32,
    /// Commute time in minutes at or above which the commute criterion
    /// drops to Conditional Pass / Fail.
    pub commute_concern_minutes: u32,
    /// Months of unemployment at or above which the employment criterion fails.
    pub unemployed_fail_months: u32,
    /// Whether candidates at or above the physical-confirm age are routed to a
    /// video interview step in the next-steps script.
    pub video_interview_for_older: bool,
}

impl Default for ScreeningPolicy {
    fn default() -> Self {
        Self {
            age_physical_confirm_min: 45,
            age_fail_over: 60,
            commute_concern_minutes: 40,
            unemployed_fail_months: 6,
            video_interview_for_older: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Voice platform
    pub vapi_base_url: String,
    pub vapi_api_key: String,
    pub vapi_phone_number_id: String,
    pub recruiter_assistant_id: String,
    pub vapi_timeout_seconds: u64,
    /// Public base URL this server is reachable at, used for webhook callbacks.
    pub server_url: String,

    // LLM provider
    pub openai_base_url: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub llm_timeout_seconds: u64,

    // Pipeline limits
    pub transcript_max_chars: usize,
    pub webhook_body_limit_bytes: usize,
    pub max_call_sessions: usize,

    // PDF rendering
    pub wkhtmltopdf_bin: String,
    pub pdf_timeout_seconds: u64,

    // Report branding
    pub report_org_name: String,

    pub policy: ScreeningPolicy,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env_name =
            Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Voice platform. All four are required before any call can be placed.
        let vapi_base_url =
            env::var("VAPI_BASE_URL").unwrap_or_else(|_| "https://api.vapi.ai".to_string());
        let vapi_api_key = env::var("VAPI_API_KEY").context("VAPI_API_KEY must be set")?;
        let vapi_phone_number_id =
            env::var("VAPI_PHONE_NUMBER_ID").context("VAPI_PHONE_NUMBER_ID must be set")?;
        let recruiter_assistant_id =
            env::var("RECRUITER_ASSISTANT_ID").context("RECRUITER_ASSISTANT_ID must be set")?;
        let server_url = env::var("SERVER_URL").context("SERVER_URL must be set")?;
        let vapi_timeout_seconds = env_parse("VAPI_TIMEOUT_SECONDS", 30);

        // LLM provider
        let openai_base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;
        let openai_model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4".to_string());
        let llm_timeout_seconds = env_parse("LLM_TIMEOUT_SECONDS", 120);

        let transcript_max_chars = env_parse("TRANSCRIPT_MAX_CHARS", 12_000);
        let webhook_body_limit_bytes = env_parse("WEBHOOK_BODY_LIMIT_BYTES", 200 * 1024);
        let max_call_sessions = env_parse("MAX_CALL_SESSIONS", 256);

        let wkhtmltopdf_bin =
            env::var("WKHTMLTOPDF_BIN").unwrap_or_else(|_| "wkhtmltopdf".to_string());
        let pdf_timeout_seconds = env_parse("PDF_TIMEOUT_SECONDS", 30);

        let report_org_name =
            env::var("REPORT_ORG_NAME").unwrap_or_else(|_| "TruckerHire.AI".to_string());

        let defaults = ScreeningPolicy::default();
        let policy = ScreeningPolicy {
            age_physical_confirm_min: env_parse(
                "POLICY_AGE_PHYSICAL_CONFIRM_MIN",
                defaults.age_physical_confirm_min,
            ),
            age_fail_over: env_parse("POLICY_AGE_FAIL_OVER", defaults.age_fail_over),
            commute_concern_minutes: env_parse(
                "POLICY_COMMUTE_CONCERN_MINUTES",
                defaults.commute_concern_minutes,
            ),
            unemployed_fail_months: env_parse(
                "POLICY_UNEMPLOYED_FAIL_MONTHS",
                defaults.unemployed_fail_months,
            ),
            video_interview_for_older: env_parse(
                "POLICY_VIDEO_INTERVIEW_FOR_OLDER",
                defaults.video_interview_for_older,
            ),
        };

        Ok(Settings {
            env: env_name,
            server_addr,
            cors_allow_origins,
            vapi_base_url,
            vapi_api_key,
            vapi_phone_number_id,
            recruiter_assistant_id,
            vapi_timeout_seconds,
            server_url,
            openai_base_url,
            openai_api_key,
            openai_model,
            llm_timeout_seconds,
            transcript_max_chars,
            webhook_body_limit_bytes,
            max_call_sessions,
            wkhtmltopdf_bin,
            pdf_timeout_seconds,
            report_org_name,
            policy,
        })
    }
}
