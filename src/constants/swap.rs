//! Swap flow constants.

/// Default base URL for the Jupiter aggregator swap API.
pub const DEFAULT_JUPITER_BASE_URL: &str = "https://lite-api.jup.ag/swap/v1";

/// Jupiter endpoint serving the verified token list.
pub const JUPITER_TOKEN_LIST_URL: &str = "https://lite-api.jup.ag/tokens/v2/tag?query=verified";

/// Default slippage tolerance in basis points.
pub const DEFAULT_SLIPPAGE_BPS: u16 = 50;

/// Default `maxRetries` passed to the backend `sendTransaction` call. Retries
/// happen inside the backend RPC, never in the proxy or the SDK.
pub const DEFAULT_SEND_MAX_RETRIES: usize = 3;

/// Token list cache time-to-live.
pub const TOKEN_LIST_TTL_SECONDS: u64 = 300;

/// How many times the flow polls for confirmation before giving up.
pub const CONFIRMATION_POLL_ATTEMPTS: usize = 15;

/// Delay between confirmation polls.
pub const CONFIRMATION_POLL_INTERVAL_MS: u64 = 2_000;

/// Delay before the fallback balance refresh fires when confirmation stays
/// unknown.
pub const BALANCE_REFRESH_DELAY_MS: u64 = 5_000;
