//! Verified token list cache.
//!
//! An explicit cache object with a defined TTL and a manual `refresh` API,
//! owned by the component that needs it. When the upstream fetch fails the
//! cache serves the previous list if one exists, else a built-in fallback of
//! well-known tokens.

use log::{info, warn};
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::constants::{JUPITER_TOKEN_LIST_URL, TOKEN_LIST_TTL_SECONDS};
use crate::models::Token;

#[derive(Error, Debug)]
pub enum TokenListError {
    #[error("HTTP request failed: {0}")]
    HttpRequestError(#[from] reqwest::Error),
    #[error("Token list fetch failed: {0}")]
    FetchFailed(u16),
    #[error("Unexpected token list payload")]
    UnexpectedPayload,
}

struct CachedList {
    fetched_at: Instant,
    tokens: Vec<Token>,
}

pub struct TokenListCache {
    source_url: String,
    ttl: Duration,
    client: Client,
    inner: RwLock<Option<CachedList>>,
}

impl Default for TokenListCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenListCache {
    pub fn new() -> Self {
        Self::with_source(
            JUPITER_TOKEN_LIST_URL.to_string(),
            Duration::from_secs(TOKEN_LIST_TTL_SECONDS),
        )
    }

    pub fn with_source(source_url: String, ttl: Duration) -> Self {
        Self {
            source_url,
            ttl,
            client: Client::new(),
            inner: RwLock::new(None),
        }
    }

    /// Cache pre-seeded with a fixed list that never goes stale. Useful for
    /// embedders that manage their own token metadata.
    pub fn with_static(tokens: Vec<Token>) -> Self {
        Self {
            source_url: String::new(),
            ttl: Duration::from_secs(u64::MAX / 4),
            client: Client::new(),
            inner: RwLock::new(Some(CachedList {
                fetched_at: Instant::now(),
                tokens,
            })),
        }
    }

    /// Serves the cached list while fresh, re-fetching once the TTL expires.
    pub async fn get_or_fetch(&self) -> Vec<Token> {
        {
            let guard = self.inner.read().await;
            if let Some(cached) = guard.as_ref() {
                if cached.fetched_at.elapsed() < self.ttl {
                    return cached.tokens.clone();
                }
            }
        }
        self.refresh().await
    }

    /// Forces a re-fetch. On failure the previous list (or the built-in
    /// fallback) is returned and the cache is left untouched.
    pub async fn refresh(&self) -> Vec<Token> {
        match self.fetch().await {
            Ok(tokens) => {
                info!("Loaded {} tokens", tokens.len());
                let mut guard = self.inner.write().await;
                *guard = Some(CachedList {
                    fetched_at: Instant::now(),
                    tokens: tokens.clone(),
                });
                tokens
            }
            Err(error) => {
                warn!("Token list fetch failed, serving fallback: {}", error);
                let guard = self.inner.read().await;
                guard
                    .as_ref()
                    .map(|cached| cached.tokens.clone())
                    .unwrap_or_else(fallback_tokens)
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<Token>, TokenListError> {
        let response = self.client.get(&self.source_url).send().await?;
        if !response.status().is_success() {
            return Err(TokenListError::FetchFailed(response.status().as_u16()));
        }

        let raw: Value = response.json().await?;
        let entries = raw.as_array().ok_or(TokenListError::UnexpectedPayload)?;

        Ok(entries
            .iter()
            .filter_map(|entry| {
                Some(Token {
                    address: entry.get("id")?.as_str()?.to_string(),
                    symbol: entry.get("symbol")?.as_str()?.to_string(),
                    name: entry.get("name")?.as_str()?.to_string(),
                    decimals: entry.get("decimals")?.as_u64()? as u8,
                    logo_uri: entry
                        .get("icon")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                })
            })
            .collect())
    }

    pub async fn token_by_symbol(&self, symbol: &str) -> Option<Token> {
        self.get_or_fetch()
            .await
            .into_iter()
            .find(|token| token.symbol.eq_ignore_ascii_case(symbol))
    }

    pub async fn token_by_address(&self, address: &str) -> Option<Token> {
        self.get_or_fetch()
            .await
            .into_iter()
            .find(|token| token.address == address)
    }

    /// Resolves a token given either a symbol or a mint address.
    pub async fn resolve(&self, identifier: &str) -> Option<Token> {
        if let Some(token) = self.token_by_symbol(identifier).await {
            return Some(token);
        }
        self.token_by_address(identifier).await
    }
}

/// Well-known tokens served when the upstream list is unavailable.
pub fn fallback_tokens() -> Vec<Token> {
    vec![
        Token::new(
            "So11111111111111111111111111111111111111112",
            "SOL",
            "Wrapped SOL",
            9,
        ),
        Token::new(
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "USDC",
            "USD Coin",
            6,
        ),
        Token::new(
            "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB",
            "USDT",
            "Tether USD",
            6,
        ),
        Token::new(
            "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263",
            "BONK",
            "Bonk",
            5,
        ),
        Token::new(
            "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN",
            "JUP",
            "Jupiter",
            6,
        ),
        Token::new(
            "EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm",
            "WIF",
            "dogwifhat",
            6,
        ),
    ]
}
