//! HTTP request handlers.

use super::types::{HealthResponse, SignUpRequest};
use super::AppState;
use crate::error::ServiceError;
use account_store::AccountPublicView;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use tracing::info;

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        accounts: state.store.count().await,
    })
}

/// Register a new cat account.
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountPublicView>), ServiceError> {
    let Json(body) = payload?;
    let request = body.into_registration()?;
    info!(email = %request.email, "Signup request received");

    let timeout = state.registration.settings().timeout;
    let view = state.registration.register_within(request, timeout).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// Catch-all for unknown routes.
pub async fn not_found() -> ServiceError {
    ServiceError::NotFound
}
