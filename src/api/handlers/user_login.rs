use super::validation::{LoginRequest, Validated};
use crate::credentials::{AccountType, CredentialStore, StoreError};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub username: String,
    pub email: String,
    pub account_type: AccountType,
}

#[utoipa::path(
    post,
    path= "/login",
    request_body = LoginRequest,
    responses (
        (status = 200, description = "Login successful", body = LoginResponse, content_type = "application/json"),
        (status = 400, description = "Request body failed validation"),
        (status = 401, description = "Unauthorized"),
    ),
    tag= "auth"
)]
// axum handler for user login
#[instrument(skip(store, credentials), fields(username = %credentials.username))]
pub async fn login(
    store: Extension<Arc<CredentialStore>>,
    Validated(credentials): Validated<LoginRequest>,
) -> Response {
    match store
        .verify(&credentials.username, credentials.password)
        .await
    {
        Ok(record) => {
            debug!("Login successful");

            Json(LoginResponse {
                username: credentials.username,
                email: record.email,
                account_type: record.account_type,
            })
            .into_response()
        }

        Err(StoreError::InvalidCredentials | StoreError::UsernameTaken) => {
            debug!("Unauthorized");

            StatusCode::UNAUTHORIZED.into_response()
        }

        Err(e) => {
            error!("Error verifying credentials: {e}");

            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
