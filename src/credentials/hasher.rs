//! Salted password hashing.
//!
//! Passwords are hashed with Argon2id. Every record gets its own random salt;
//! the salt and the raw Argon2 output are stored side by side so verification
//! can recompute the digest and compare it in constant time.

use argon2::{
    Algorithm, Argon2, Params, PasswordHasher as _, Version,
    password_hash::{Output, SaltString},
};
use rand::rngs::OsRng;

use super::models::StoreError;

/// Salt used for the throwaway hash when a login names an unknown user.
const DUMMY_SALT: &str = "YWNjZXNvZHVtbXlzYWx0";

/// Argon2id cost parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Argon2id hasher shared by registration and verification.
#[derive(Clone, Debug)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Build a hasher from explicit cost parameters.
    ///
    /// # Errors
    /// Returns [`StoreError::Hash`] if Argon2 rejects the parameters.
    pub fn new(params: HashParams) -> Result<Self, StoreError> {
        let params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            None,
        )
        .map_err(|err| StoreError::Hash(format!("invalid argon2 parameters: {err}")))?;

        Ok(Self { params })
    }

    /// Fresh random salt for a new record.
    #[must_use]
    pub fn generate_salt() -> SaltString {
        SaltString::generate(&mut OsRng)
    }

    /// Derive the digest of `password` under `salt`.
    ///
    /// # Errors
    /// Returns [`StoreError::Hash`] if Argon2 fails.
    pub fn hash(&self, password: &str, salt: &SaltString) -> Result<Output, StoreError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());
        let hash = argon2
            .hash_password(password.as_bytes(), salt)
            .map_err(|err| StoreError::Hash(format!("failed to hash password: {err}")))?;

        hash.hash
            .ok_or_else(|| StoreError::Hash("argon2 returned no output".to_string()))
    }

    /// Recompute the digest and compare against `expected`.
    ///
    /// `Output` equality is constant time.
    ///
    /// # Errors
    /// Returns [`StoreError::Hash`] if Argon2 fails.
    pub fn verify(
        &self,
        password: &str,
        salt: &SaltString,
        expected: &Output,
    ) -> Result<bool, StoreError> {
        let actual = self.hash(password, salt)?;
        Ok(actual == *expected)
    }

    /// Burn one hash so unknown usernames cost as much as wrong passwords.
    pub fn hash_dummy(&self, password: &str) {
        if let Ok(salt) = SaltString::from_b64(DUMMY_SALT) {
            let _ = self.hash(password, &salt);
        }
    }
}
