//! Client-side JSON-RPC relay.
//!
//! Speaks JSON-RPC 2.0 to the forwarding proxy (or directly to any
//! Solana-compatible endpoint). `send_transaction` is the submission path of
//! the swap flow; `request` is the generic escape hatch.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use log::debug;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde_json::{json, Value};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, transaction::Transaction};
use thiserror::Error;

use crate::config::public_rpc_endpoint;
use crate::models::{JsonRpcRequest, JsonRpcResponse, SendOptions};

#[derive(Error, Debug)]
pub enum RelayClientError {
    #[error("HTTP request failed: {0}")]
    HttpRequestError(#[from] reqwest::Error),
    #[error("{0}")]
    Rpc(String),
    #[error("Failed to serialize transaction: {0}")]
    Serialization(String),
    #[error("Malformed RPC response: {0}")]
    MalformedResponse(String),
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait RelayClientTrait: Send + Sync {
    /// Submits a signed transaction through the proxy. Returns the signature
    /// string on success. A single attempt; `maxRetries` inside the options
    /// is honored by the backend RPC, not here.
    async fn send_transaction(
        &self,
        transaction: &Transaction,
        options: &SendOptions,
    ) -> Result<String, RelayClientError>;

    /// Generic JSON-RPC call through the proxy.
    async fn request(&self, method: &str, params: Value) -> Result<Value, RelayClientError>;
}

pub struct RelayClient {
    endpoint: String,
    client: Client,
}

impl RelayClient {
    /// Builds a client against the given endpoint, falling back to the
    /// configured public proxy endpoint.
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint: endpoint.unwrap_or_else(public_rpc_endpoint),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Standard nonblocking RPC connection against the proxy endpoint at
    /// `confirmed` commitment.
    pub fn connection(&self) -> RpcClient {
        RpcClient::new_with_commitment(self.endpoint.clone(), CommitmentConfig::confirmed())
    }
}

#[async_trait]
impl RelayClientTrait for RelayClient {
    async fn send_transaction(
        &self,
        transaction: &Transaction,
        options: &SendOptions,
    ) -> Result<String, RelayClientError> {
        let serialized = bincode::serialize(transaction)
            .map_err(|e| RelayClientError::Serialization(e.to_string()))?;
        let encoded = BASE64.encode(serialized);

        debug!("Submitting transaction via relay ({} bytes)", encoded.len());
        let result = self
            .request("sendTransaction", json!([encoded, options]))
            .await?;

        result
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| RelayClientError::MalformedResponse("non-string signature".to_string()))
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, RelayClientError> {
        let request = JsonRpcRequest::new(method, params);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let body: JsonRpcResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(RelayClientError::Rpc(error.message));
        }
        body.result
            .ok_or_else(|| RelayClientError::MalformedResponse("missing result".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{
        instruction::{AccountMeta, Instruction},
        pubkey::Pubkey,
        signature::{Keypair, Signer},
        transaction::Transaction,
    };

    fn unsigned_transaction() -> Transaction {
        let payer = Keypair::new();
        let instruction = Instruction::new_with_bytes(
            Pubkey::new_unique(),
            &[1, 2, 3],
            vec![AccountMeta::new(payer.pubkey(), true)],
        );
        Transaction::new_with_payer(&[instruction], Some(&payer.pubkey()))
    }

    #[tokio::test]
    async fn test_send_transaction_returns_signature() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(json!({
                "jsonrpc": "2.0",
                "method": "sendTransaction",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"jsonrpc": "2.0", "id": 1, "result": "abc123"}).to_string())
            .create_async()
            .await;

        let client = RelayClient::new(Some(server.url()));
        let signature = client
            .send_transaction(&unsigned_transaction(), &SendOptions::default())
            .await
            .unwrap();

        assert_eq!(signature, "abc123");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_transaction_options_on_wire() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::Regex(
                r#""preflightCommitment":"confirmed".*"maxRetries":3"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"jsonrpc": "2.0", "id": 1, "result": "sig"}).to_string())
            .create_async()
            .await;

        let client = RelayClient::new(Some(server.url()));
        client
            .send_transaction(&unsigned_transaction(), &SendOptions::default())
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_transaction_rpc_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "error": {"code": -32002, "message": "Transaction simulation failed"}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = RelayClient::new(Some(server.url()));
        let error = client
            .send_transaction(&unsigned_transaction(), &SendOptions::default())
            .await
            .unwrap_err();

        assert!(
            matches!(error, RelayClientError::Rpc(msg) if msg == "Transaction simulation failed")
        );
    }

    #[tokio::test]
    async fn test_generic_request() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(json!({"method": "getHealth"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"jsonrpc": "2.0", "id": 1, "result": "ok"}).to_string())
            .create_async()
            .await;

        let client = RelayClient::new(Some(server.url()));
        let result = client.request("getHealth", json!([])).await.unwrap();
        assert_eq!(result, json!("ok"));
    }
}
