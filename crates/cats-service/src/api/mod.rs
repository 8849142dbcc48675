//! HTTP API for the cats service.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use crate::registration::{RegistrationService, RegistrationSettings};
use account_store::Store;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Signup flow
    pub registration: Arc<RegistrationService>,
    /// Account storage backend
    pub store: Arc<Store>,
}

impl AppState {
    /// Create new application state around `store`.
    pub fn new(store: Store, settings: RegistrationSettings) -> Self {
        let store = Arc::new(store);
        let registration = RegistrationService::new(store.clone(), settings);

        Self {
            registration: Arc::new(registration),
            store,
        }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/cats", post(handlers::sign_up))
        .fallback(handlers::not_found)
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
