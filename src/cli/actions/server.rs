use crate::{
    api,
    cli::telemetry,
    credentials::{CredentialStore, HashParams, PasswordHasher},
};
use anyhow::{Context, Result};
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub address: IpAddr,
    pub port: u16,
    pub hash_params: HashParams,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the hasher cannot be built or the server fails.
pub async fn execute(args: Args) -> Result<()> {
    info!(
        address = %args.address,
        port = args.port,
        argon2_memory_kib = args.hash_params.memory_kib,
        argon2_iterations = args.hash_params.iterations,
        argon2_parallelism = args.hash_params.parallelism,
        "Starting {}", env!("CARGO_PKG_NAME")
    );

    let hasher = PasswordHasher::new(args.hash_params).context("invalid Argon2 parameters")?;
    let store = Arc::new(CredentialStore::new(hasher));

    let result = api::new(SocketAddr::new(args.address, args.port), store).await;

    telemetry::shutdown_tracer();

    result
}
