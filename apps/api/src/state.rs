use std::sync::Arc;

use crate::matching::matcher::JobMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; holds the record stores, HTTP client and tagger.
    pub matcher: Arc<JobMatcher>,
}
