//! API handlers for acceso.
//!
//! Request bodies are checked by the extractors in [`validation`] before any
//! handler runs; handlers only deal with semantic outcomes (conflicts, bad
//! credentials) against the shared credential store.

pub mod health;
pub mod user_login;
pub mod user_register;
pub mod validation;

pub use self::health::health;
pub use self::user_login::login;
pub use self::user_register::register;
