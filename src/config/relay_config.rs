//! Runtime-read relay configuration accessors.

use std::env;
use thiserror::Error;

use crate::constants::{BACKEND_RPC_ENDPOINT_ENV, DEFAULT_PUBLIC_RPC_ENDPOINT, PUBLIC_RPC_ENDPOINT_ENV};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Backend RPC endpoint not configured")]
    MissingBackendEndpoint,
}

/// Reads the backend RPC endpoint from the environment at call time.
///
/// Never cached: the value is resolved on every invocation so configuration
/// changes take effect without a restart.
pub fn backend_rpc_endpoint() -> Result<String, ConfigError> {
    env::var(BACKEND_RPC_ENDPOINT_ENV)
        .ok()
        .filter(|endpoint| !endpoint.is_empty())
        .ok_or(ConfigError::MissingBackendEndpoint)
}

/// Public-facing proxy endpoint used by the client SDK to reach the proxy.
pub fn public_rpc_endpoint() -> String {
    env::var(PUBLIC_RPC_ENDPOINT_ENV)
        .ok()
        .filter(|endpoint| !endpoint.is_empty())
        .unwrap_or_else(|| DEFAULT_PUBLIC_RPC_ENDPOINT.to_string())
}
