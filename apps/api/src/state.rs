use std::sync::Arc;

use crate::config::Config;
use crate::content_client::ContentClient;
use crate::llm_client::CompletionService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion backend. Default: `LlmClient` against the configured base URL.
    pub completion: Arc<dyn CompletionService>,
    pub content: ContentClient,
    pub config: Config,
}
