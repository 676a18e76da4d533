//! External service clients and shared runtime state.

pub mod llm;
pub mod pdf;
pub mod session;
pub mod vapi;

pub use llm::LlmClient;
pub use pdf::PdfRenderer;
pub use session::SessionStore;
pub use vapi::VapiClient;
