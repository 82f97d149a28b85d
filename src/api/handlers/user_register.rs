use super::validation::{RegisterRequest, Validated};
use crate::credentials::{CredentialStore, StoreError};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse};
use std::sync::Arc;
use tracing::{debug, error, instrument};

#[utoipa::path(
    post,
    path= "/register",
    request_body = RegisterRequest,
    responses (
        (status = 204, description = "Registration successful"),
        (status = 400, description = "Request body failed validation"),
        (status = 409, description = "User with the specified username already exists"),
    ),
    tag= "auth"
)]
// axum handler for user registration
#[instrument(skip(store, registration), fields(username = %registration.username))]
pub async fn register(
    store: Extension<Arc<CredentialStore>>,
    Validated(registration): Validated<RegisterRequest>,
) -> impl IntoResponse {
    // reject taken usernames before hashing
    if store.find_by_username(&registration.username).await.is_some() {
        debug!("User already exists");
        return StatusCode::CONFLICT;
    }

    match store
        .register(
            &registration.username,
            registration.email,
            registration.account_type,
            registration.password,
        )
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(StoreError::UsernameTaken) => {
            debug!("User already exists");
            StatusCode::CONFLICT
        }
        Err(e) => {
            error!("Error registering user: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
