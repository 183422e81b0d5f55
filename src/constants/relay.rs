//! Proxy and relay constants.

/// Environment variable holding the backend RPC endpoint, read per request.
pub const BACKEND_RPC_ENDPOINT_ENV: &str = "BACKEND_RPC_ENDPOINT";

/// Environment variable holding the public-facing proxy endpoint for clients.
pub const PUBLIC_RPC_ENDPOINT_ENV: &str = "PUBLIC_RPC_ENDPOINT";

/// Default public proxy endpoint when `PUBLIC_RPC_ENDPOINT` is unset.
pub const DEFAULT_PUBLIC_RPC_ENDPOINT: &str = "http://localhost:8080/api/rpc";

/// Path the proxy is mounted at.
pub const RPC_PROXY_PATH: &str = "/api/rpc";

/// Marker headers attached to every proxy response: provider identity,
/// privacy/MEV-protection flags and permissive CORS.
pub const MARKER_HEADERS: [(&str, &str); 6] = [
    ("X-RPC-Provider", "VEIL"),
    ("X-Privacy-Shield", "enabled"),
    ("X-MEV-Protection", "active"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

/// Header carrying the measured upstream latency, value formatted as `<ms>ms`.
pub const RESPONSE_TIME_HEADER: &str = "X-Response-Time";

/// Overall timeout for upstream forwarding requests.
pub const FORWARD_TIMEOUT_SECONDS: u64 = 30;
