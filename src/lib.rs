//! # Acceso
//!
//! `acceso` is a small HTTP service for user registration and password login.
//!
//! ## Endpoints
//!
//! - `POST /register` stores a new account (`username`, `email`, `accountType`,
//!   `password`). Usernames are unique and case-sensitive; emails are not.
//! - `POST /login` checks a username/password pair and returns the public part
//!   of the record.
//! - `GET /health` reports build information and the number of accounts.
//!
//! ## Credentials
//!
//! Passwords are never stored. Each record keeps a random salt and the
//! Argon2id digest of the password under that salt. Unknown usernames and
//! wrong passwords are indistinguishable to the caller.
//!
//! All state lives in memory and is lost on restart.

pub mod api;
pub mod cli;
pub mod credentials;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // non-git build
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(GIT_COMMIT_HASH.len() >= 7);
    }
}
