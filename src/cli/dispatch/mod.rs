//! Map parsed CLI arguments to an [`Action`].

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{ARG_ADDRESS, ARG_PORT, argon2};
use crate::credentials::{HashParams, PasswordHasher};
use anyhow::{Context, Result};
use std::net::{IpAddr, Ipv6Addr};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if the Argon2 parameters are rejected.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(3000);
    let address = matches
        .get_one::<IpAddr>(ARG_ADDRESS)
        .copied()
        .unwrap_or(IpAddr::V6(Ipv6Addr::UNSPECIFIED));

    let hash_params = HashParams::from(argon2::Options::parse(matches)?);

    // reject bad costs at startup
    PasswordHasher::new(hash_params).context("invalid Argon2 parameters")?;

    Ok(Action::Server(Args {
        address,
        port,
        hash_params,
    }))
}
