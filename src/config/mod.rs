//! Process configuration.
//!
//! `ServerConfig` captures the values read once at startup (bind address).
//! The backend RPC endpoint is deliberately NOT part of it: it is read from
//! the environment on every request through [`backend_rpc_endpoint`], so a
//! deployment can repoint the backend without a restart and a missing value
//! surfaces as a per-request error rather than a startup crash.

mod server_config;
pub use server_config::ServerConfig;

mod relay_config;
pub use relay_config::{backend_rpc_endpoint, public_rpc_endpoint, ConfigError};
