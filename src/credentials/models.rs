use argon2::password_hash::{Output, SaltString};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// Role attached to an account at registration time.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    User,
    Admin,
}

impl AccountType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored credentials for one username.
#[derive(Clone)]
pub struct UserRecord {
    pub email: String,
    pub account_type: AccountType,
    pub salt: SaltString,
    pub password_hash: Output,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("email", &self.email)
            .field("account_type", &self.account_type)
            .field("salt", &"***")
            .field("password_hash", &"***")
            .finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("username already registered")]
    UsernameTaken,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("hash error: {0}")]
    Hash(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_type_serializes_lowercase() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&AccountType::User)?, "\"user\"");
        assert_eq!(serde_json::to_string(&AccountType::Admin)?, "\"admin\"");
        assert_eq!(
            serde_json::from_str::<AccountType>("\"admin\"")?,
            AccountType::Admin
        );
        assert!(serde_json::from_str::<AccountType>("\"superuser\"").is_err());
        assert!(serde_json::from_str::<AccountType>("\"Admin\"").is_err());
        Ok(())
    }

    #[test]
    fn debug_redacts_secrets() -> Result<(), StoreError> {
        let salt = SaltString::from_b64("c29tZXNhbHR2YWx1ZQ")
            .map_err(|err| StoreError::Hash(err.to_string()))?;
        let password_hash =
            Output::new(&[7u8; 32]).map_err(|err| StoreError::Hash(err.to_string()))?;
        let record = UserRecord {
            email: "a@example.com".to_string(),
            account_type: AccountType::User,
            salt,
            password_hash,
        };

        let debug = format!("{record:?}");
        assert!(debug.contains("a@example.com"));
        assert!(!debug.contains("c29tZXNhbHR2YWx1ZQ"));
        Ok(())
    }
}
