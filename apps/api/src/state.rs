use crate::gdocs::DocsClient;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both clients are constructed once at startup and live for the process
/// lifetime; handlers get cheap clones.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub docs: DocsClient,
}
