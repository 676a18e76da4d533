mod api;
mod app;
mod config;
mod domain;
mod error;
mod logging;
mod middleware;
mod report;
mod routes;
mod services;

use anyhow::Result;

use services::{LlmClient, PdfRenderer, SessionStore, VapiClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting recruiter backend"
    );

    // Voice platform client
    let vapi = VapiClient::new(
        &settings.vapi_base_url,
        &settings.vapi_api_key,
        settings.vapi_timeout_seconds,
    )?;

    // LLM provider client
    let llm = LlmClient::new(
        &settings.openai_base_url,
        &settings.openai_api_key,
        &settings.openai_model,
        settings.llm_timeout_seconds,
    )?;

    // PDF renderer subprocess wrapper
    let pdf = PdfRenderer::new(&settings.wkhtmltopdf_bin, settings.pdf_timeout_seconds);

    // Live transcript sessions
    let sessions = SessionStore::new(settings.max_call_sessions);

    // Create application state
    let state = app::AppState::new(settings.clone(), vapi, llm, pdf, sessions);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
