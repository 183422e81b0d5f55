//! Jupiter aggregator client.
//!
//! Two calls only: `GET /quote` for an immutable quote snapshot and
//! `POST /swap-instructions` for the ordered instruction groups belonging to
//! that quote. Routing itself is the aggregator's business; this client never
//! inspects the route beyond the first label.

use async_trait::async_trait;
use log::debug;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use crate::constants::DEFAULT_JUPITER_BASE_URL;
use crate::models::{Quote, QuoteRequest, SwapInstructions};

/// HTTP request timeout in seconds
const HTTP_REQUEST_TIMEOUT_SECONDS: u64 = 10;

#[derive(Error, Debug)]
pub enum JupiterServiceError {
    #[error("HTTP request failed: {0}")]
    HttpRequestError(#[from] reqwest::Error),
    #[error("Jupiter quote failed: {0}")]
    QuoteFailed(u16),
    #[error("Swap instructions failed: {0}")]
    InstructionsFailed(u16),
    #[error("Jupiter returned an error: {0}")]
    ApiError(String),
    #[error("Failed to deserialize response: {0}")]
    DeserializationError(#[from] serde_json::Error),
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait JupiterServiceTrait: Send + Sync {
    /// Fetches a quote for swapping `amount` smallest units of the input mint
    /// into the output mint.
    async fn get_quote(&self, request: &QuoteRequest) -> Result<Quote, JupiterServiceError>;

    /// Fetches the instruction groups for executing a previously fetched
    /// quote on behalf of `user_public_key`.
    async fn get_swap_instructions(
        &self,
        quote: &Quote,
        user_public_key: &str,
    ) -> Result<SwapInstructions, JupiterServiceError>;
}

pub struct JupiterService {
    base_url: String,
    client: Client,
}

impl JupiterService {
    pub fn new(base_url: Option<String>) -> Result<Self, JupiterServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECONDS))
            .build()
            .map_err(JupiterServiceError::HttpRequestError)?;

        Ok(Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_JUPITER_BASE_URL.to_string()),
            client,
        })
    }
}

#[async_trait]
impl JupiterServiceTrait for JupiterService {
    async fn get_quote(&self, request: &QuoteRequest) -> Result<Quote, JupiterServiceError> {
        let url = format!("{}/quote", self.base_url);
        debug!(
            "Requesting quote: {} -> {}, amount {}, slippage {} bps",
            request.input_mint, request.output_mint, request.amount, request.slippage_bps
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("inputMint", request.input_mint.as_str()),
                ("outputMint", request.output_mint.as_str()),
                ("amount", &request.amount.to_string()),
                ("slippageBps", &request.slippage_bps.to_string()),
                ("onlyDirectRoutes", "false"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(JupiterServiceError::QuoteFailed(response.status().as_u16()));
        }

        let raw: Value = response.json().await?;
        let quote = Quote::from_raw(raw)?;
        debug!(
            "Quote received: in {} out {} via {}",
            quote.in_amount, quote.out_amount, quote.route
        );
        Ok(quote)
    }

    async fn get_swap_instructions(
        &self,
        quote: &Quote,
        user_public_key: &str,
    ) -> Result<SwapInstructions, JupiterServiceError> {
        let url = format!("{}/swap-instructions", self.base_url);
        debug!("Requesting swap instructions for {}", user_public_key);

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "quoteResponse": quote.raw,
                "userPublicKey": user_public_key,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(JupiterServiceError::InstructionsFailed(
                response.status().as_u16(),
            ));
        }

        let raw: Value = response.json().await?;
        // A 2xx body can still carry an embedded error field
        if let Some(error) = raw.get("error").and_then(Value::as_str) {
            return Err(JupiterServiceError::ApiError(error.to_string()));
        }

        Ok(serde_json::from_value(raw)?)
    }
}
