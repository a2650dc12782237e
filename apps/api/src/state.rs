use std::sync::Arc;

use crate::matching::MatchClient;
use crate::store::AtsStore;
use crate::uploads::UploadBroker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres in production, in-memory in demo mode and tests.
    pub store: Arc<dyn AtsStore>,
    pub uploads: UploadBroker,
    pub matcher: MatchClient,
}
