//! Solana Provider Module
//!
//! A thin abstraction over the nonblocking `RpcClient` covering the reads the
//! swap flow needs: fresh blockhashes, signature status checks for
//! confirmation, and balances for the post-swap refresh.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
};
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey, signature::Signature,
};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolanaProviderError {
    /// Network/IO error (connection issues, timeouts)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// RPC protocol error
    #[error("RPC error: {0}")]
    RpcError(String),
    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

impl SolanaProviderError {
    fn from_rpc_error(error: ClientError) -> Self {
        match error.kind() {
            ClientErrorKind::Io(_) => SolanaProviderError::NetworkError(error.to_string()),
            ClientErrorKind::Reqwest(_) => SolanaProviderError::NetworkError(error.to_string()),
            _ => SolanaProviderError::RpcError(error.to_string()),
        }
    }
}

/// Result of one signature status probe: `None` until the cluster has seen
/// the signature, then the transaction's own result.
pub type SignatureStatus = Option<Result<(), String>>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SolanaProviderTrait: Send + Sync {
    /// Retrieves the latest blockhash at the given commitment.
    async fn get_latest_blockhash_with_commitment(
        &self,
        commitment: CommitmentConfig,
    ) -> Result<Hash, SolanaProviderError>;

    /// Probes the status of a submitted signature at the given commitment.
    async fn get_signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<SignatureStatus, SolanaProviderError>;

    /// Retrieves the balance (in lamports) for the given address.
    async fn get_balance(&self, address: &str) -> Result<u64, SolanaProviderError>;
}

pub struct SolanaProvider {
    client: RpcClient,
}

impl SolanaProvider {
    /// Creates a provider against `url` at `confirmed` default commitment.
    pub fn new(url: String) -> Self {
        Self {
            client: RpcClient::new_with_commitment(url, CommitmentConfig::confirmed()),
        }
    }
}

#[async_trait]
impl SolanaProviderTrait for SolanaProvider {
    async fn get_latest_blockhash_with_commitment(
        &self,
        commitment: CommitmentConfig,
    ) -> Result<Hash, SolanaProviderError> {
        self.client
            .get_latest_blockhash_with_commitment(commitment)
            .await
            .map(|(hash, _last_valid_block_height)| hash)
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<SignatureStatus, SolanaProviderError> {
        let status = self
            .client
            .get_signature_status_with_commitment(signature, commitment)
            .await
            .map_err(SolanaProviderError::from_rpc_error)?;
        Ok(status.map(|result| result.map_err(|e| e.to_string())))
    }

    async fn get_balance(&self, address: &str) -> Result<u64, SolanaProviderError> {
        let pubkey = Pubkey::from_str(address)
            .map_err(|e| SolanaProviderError::InvalidAddress(e.to_string()))?;
        self.client
            .get_balance(&pubkey)
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_balance_rejects_invalid_address() {
        let provider = SolanaProvider::new("http://localhost:8899".to_string());
        let error = provider.get_balance("not-a-pubkey").await.unwrap_err();
        assert!(matches!(error, SolanaProviderError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_get_signature_status_maps_rpc_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "result": {
                        "context": {"slot": 100},
                        "value": [{
                            "slot": 98,
                            "confirmations": 3,
                            "err": null,
                            "status": {"Ok": null},
                            "confirmationStatus": "confirmed"
                        }]
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let provider = SolanaProvider::new(server.url());
        let status = provider
            .get_signature_status(&Signature::default(), CommitmentConfig::confirmed())
            .await
            .unwrap();
        assert_eq!(status, Some(Ok(())));
    }

    #[tokio::test]
    async fn test_get_signature_status_unseen_signature() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "result": {"context": {"slot": 100}, "value": [null]}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let provider = SolanaProvider::new(server.url());
        let status = provider
            .get_signature_status(&Signature::default(), CommitmentConfig::confirmed())
            .await
            .unwrap();
        assert_eq!(status, None);
    }
}
