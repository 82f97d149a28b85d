//! Request body schemas.
//!
//! Every body is parsed and checked by a pure function before a handler runs:
//! `parse::<T>(bytes)` either yields the typed, validated value or a
//! [`ValidationError`]. The [`Validated`] extractor does the same on top of
//! axum's `Json` extractor, so a missing or non-JSON `Content-Type` is
//! rejected too; any failure short-circuits with `400 Bad Request` and an
//! empty body.

use crate::credentials::AccountType;
use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use regex::Regex;
use serde::{Deserialize, de::DeserializeOwned};
use std::fmt;
use thiserror::Error;
use tracing::debug;
use utoipa::ToSchema;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 24;
pub const PASSWORD_MIN_LEN: usize = 5;
pub const PASSWORD_MAX_LEN: usize = 24;

/// Punctuation allowed in passwords; at least one is required.
pub const PASSWORD_SPECIAL_CHARS: &str = "$&+,:;=?@#|'<>.^*()%!-";

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("rejected request body: {0}")]
    Rejected(String),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be between {min} and {max} characters")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },
    #[error("invalid email")]
    Email,
    #[error("password contains a character outside the allowed set")]
    PasswordCharset,
    #[error("password must contain at least one special character")]
    PasswordSpecial,
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        debug!("request rejected: {self}");
        StatusCode::BAD_REQUEST.into_response()
    }
}

/// A request schema: raw deserialized body in, checked value out.
pub trait Validate: DeserializeOwned {
    type Output;

    /// Check the content rules serde cannot express.
    ///
    /// # Errors
    /// Returns the first rule the value breaks.
    fn validate(self) -> Result<Self::Output, ValidationError>;
}

/// Deserialize `body` as `T` and validate it.
///
/// # Errors
/// Returns [`ValidationError::Json`] if the body is not a JSON object of the
/// right shape, or the rule violation reported by [`Validate::validate`].
pub fn parse<T: Validate>(body: &[u8]) -> Result<T::Output, ValidationError> {
    serde_json::from_slice::<T>(body)?.validate()
}

/// Extractor that decodes a JSON body as `T` and validates it ahead of the handler.
pub struct Validated<T: Validate>(pub T::Output);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: Validate,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::Rejected(rejection.body_text()))?;

        value.validate().map(Self)
    }
}

#[derive(ToSchema, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RegisterRequest {
    username: String,
    email: String,
    account_type: AccountType,
    password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("account_type", &self.account_type)
            .field("password", &"***")
            .finish()
    }
}

/// A registration that passed every field rule.
pub struct Registration {
    pub username: String,
    pub email: String,
    pub account_type: AccountType,
    pub password: String,
}

impl Validate for RegisterRequest {
    type Output = Registration;

    fn validate(self) -> Result<Registration, ValidationError> {
        check_length(
            "username",
            &self.username,
            USERNAME_MIN_LEN,
            USERNAME_MAX_LEN,
        )?;
        check_not_empty("email", &self.email)?;
        if !valid_email(&self.email) {
            return Err(ValidationError::Email);
        }
        check_length(
            "password",
            &self.password,
            PASSWORD_MIN_LEN,
            PASSWORD_MAX_LEN,
        )?;
        check_password_chars(&self.password)?;

        Ok(Registration {
            username: self.username,
            email: self.email,
            account_type: self.account_type,
            password: self.password,
        })
    }
}

#[derive(ToSchema, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    username: String,
    password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Login credentials; only presence is checked.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Validate for LoginRequest {
    type Output = Credentials;

    fn validate(self) -> Result<Credentials, ValidationError> {
        check_not_empty("username", &self.username)?;
        check_not_empty("password", &self.password)?;

        Ok(Credentials {
            username: self.username,
            password: self.password,
        })
    }
}

/// Email syntax check: one `@`, no whitespace, dotted domain without empty labels.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").is_ok_and(|re| re.is_match(email))
}

fn check_not_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::Empty { field })
    } else {
        Ok(())
    }
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    check_not_empty(field, value)?;
    let len = value.chars().count();
    if (min..=max).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::Length { field, min, max })
    }
}

fn check_password_chars(password: &str) -> Result<(), ValidationError> {
    let is_special = |c: char| PASSWORD_SPECIAL_CHARS.contains(c);

    if !password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || is_special(c))
    {
        return Err(ValidationError::PasswordCharset);
    }

    if !password.chars().any(is_special) {
        return Err(ValidationError::PasswordSpecial);
    }

    Ok(())
}
