use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// Model backend. Default: `GeminiClient`; tests inject stubs.
    pub llm: Arc<dyn LanguageModel>,
    pub config: Config,
}
