use std::sync::Arc;

use crate::catalog::ProjectCatalog;
use crate::config::Config;
use crate::llm_client::Completion;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both clients are read-only; parallel uploads each run an isolated pipeline
/// over them with no shared writable state.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn Completion>,
    pub catalog: Arc<dyn ProjectCatalog>,
    /// Kept for handlers that need runtime settings (none yet).
    #[allow(dead_code)]
    pub config: Config,
}
