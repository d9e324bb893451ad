use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::store::StateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide job cache in front of the configured backend.
    pub store: Arc<StateStore>,
    pub llm: LlmClient,
    pub config: Config,
}
