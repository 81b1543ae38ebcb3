use std::sync::Arc;

use crate::auth::JwtManager;
use crate::candidates::storage::ResumeStorage;
use crate::config::Config;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable persistence. Default: `PgStore`; tests use `MemoryStore`.
    pub store: Arc<dyn Store>,
    pub jwt: JwtManager,
    pub storage: ResumeStorage,
    pub config: Config,
}
