//! Wallet seam.
//!
//! The browser wallet lives behind [`WalletSigner`]: the flow hands it an
//! unsigned transaction and gets back a signed one, or a rejection that
//! aborts the swap.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::Transaction,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletSignerError {
    #[error("Signing rejected: {0}")]
    Rejected(String),
    #[error("Wallet error: {0}")]
    Other(String),
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait WalletSigner: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Produces a signed copy of the transaction or rejects it. No partial
    /// state survives a rejection.
    async fn sign_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Transaction, WalletSignerError>;
}

/// Keypair-backed signer for server-side and test use.
pub struct LocalWalletSigner {
    keypair: Keypair,
}

impl LocalWalletSigner {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }
}

#[async_trait]
impl WalletSigner for LocalWalletSigner {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn sign_transaction(
        &self,
        mut transaction: Transaction,
    ) -> Result<Transaction, WalletSignerError> {
        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_partial_sign(&[&self.keypair], blockhash)
            .map_err(|e| WalletSignerError::Other(e.to_string()))?;
        Ok(transaction)
    }
}
