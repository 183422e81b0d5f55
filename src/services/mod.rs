//! Service layer: outbound clients for the aggregator, the proxy and the
//! Solana RPC, plus the token list cache.

pub mod jupiter;
pub mod provider;
pub mod relay;
pub mod token_list;

pub use jupiter::*;
pub use provider::*;
pub use relay::*;
pub use token_list::*;
