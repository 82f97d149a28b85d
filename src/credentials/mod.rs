//! User credentials: records, salted hashing and the in-memory store.

pub mod hasher;
pub mod models;
pub mod store;

pub use hasher::{HashParams, PasswordHasher};
pub use models::{AccountType, StoreError, UserRecord};
pub use store::CredentialStore;
