//! Transaction submission flow.
//!
//! One call to [`SwapExecutor::swap`] drives a single user-initiated swap:
//! resolve tokens, fetch a quote, fetch instructions, assemble and sign the
//! transaction, submit it through the relay, then wait (best-effort) for
//! confirmation. Every stage error is converted into a terminal
//! [`SwapResult`]; nothing propagates past `swap`. Each invocation owns its
//! quote/instruction/result objects exclusively, so concurrent invocations
//! are independent.

mod wallet;
pub use wallet::{LocalWalletSigner, WalletSigner, WalletSignerError};

use async_trait::async_trait;
use log::{debug, info, warn};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::constants::{
    BALANCE_REFRESH_DELAY_MS, CONFIRMATION_POLL_ATTEMPTS, CONFIRMATION_POLL_INTERVAL_MS,
    DEFAULT_SLIPPAGE_BPS,
};
use crate::models::{
    InstructionSpecError, QuoteRequest, SendOptions, SwapInstructions, SwapRequest, SwapResult,
};
use crate::services::{
    JupiterServiceError, JupiterServiceTrait, RelayClientError, RelayClientTrait,
    SolanaProviderError, SolanaProviderTrait, TokenListCache,
};
use crate::utils::{from_base_units, to_base_units};

/// Flow states for one swap attempt, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapStage {
    Idle,
    QuoteRequested,
    QuoteReady,
    InstructionsRequested,
    TransactionBuilt,
    Signed,
    Submitted,
    Confirmed,
    ConfirmationUnknown,
    Failed,
}

#[derive(Error, Debug)]
pub enum SwapError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("{0}")]
    Aggregator(#[from] JupiterServiceError),
    #[error("Failed to build transaction: {0}")]
    Build(#[from] InstructionSpecError),
    #[error("{0}")]
    Signing(#[from] WalletSignerError),
    #[error("{0}")]
    Submission(#[from] RelayClientError),
    #[error("{0}")]
    Provider(#[from] SolanaProviderError),
    #[error("Transaction failed: {0}")]
    OnChain(String),
}

/// Fire-and-forget hook invoked after a swap whose confirmation stayed
/// unknown, so the embedder can re-read balances.
#[async_trait]
pub trait BalanceRefresher: Send + Sync {
    async fn refresh(&self);
}

enum ConfirmationOutcome {
    Confirmed,
    Failed(String),
    Unknown,
}

pub struct SwapExecutor<J, P, R>
where
    J: JupiterServiceTrait,
    P: SolanaProviderTrait,
    R: RelayClientTrait,
{
    jupiter: Arc<J>,
    provider: Arc<P>,
    relay: Arc<R>,
    tokens: Arc<TokenListCache>,
    refresher: Option<Arc<dyn BalanceRefresher>>,
    refresh_delay: Duration,
    confirmation_attempts: usize,
    confirmation_interval: Duration,
}

impl<J, P, R> SwapExecutor<J, P, R>
where
    J: JupiterServiceTrait,
    P: SolanaProviderTrait,
    R: RelayClientTrait,
{
    pub fn new(
        jupiter: Arc<J>,
        provider: Arc<P>,
        relay: Arc<R>,
        tokens: Arc<TokenListCache>,
    ) -> Self {
        Self {
            jupiter,
            provider,
            relay,
            tokens,
            refresher: None,
            refresh_delay: Duration::from_millis(BALANCE_REFRESH_DELAY_MS),
            confirmation_attempts: CONFIRMATION_POLL_ATTEMPTS,
            confirmation_interval: Duration::from_millis(CONFIRMATION_POLL_INTERVAL_MS),
        }
    }

    pub fn with_balance_refresher(mut self, refresher: Arc<dyn BalanceRefresher>) -> Self {
        self.refresher = Some(refresher);
        self
    }

    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    pub fn with_confirmation(mut self, attempts: usize, interval: Duration) -> Self {
        self.confirmation_attempts = attempts;
        self.confirmation_interval = interval;
        self
    }

    /// Runs the full flow. Always resolves to a terminal result; stage
    /// errors become `{success: false, error}` values.
    pub async fn swap(&self, wallet: &dyn WalletSigner, request: &SwapRequest) -> SwapResult {
        match self.run(wallet, request).await {
            Ok(result) => result,
            Err(error) => {
                warn!("Swap failed: {}", error);
                SwapResult::failure(error.to_string())
            }
        }
    }

    async fn run(
        &self,
        wallet: &dyn WalletSigner,
        request: &SwapRequest,
    ) -> Result<SwapResult, SwapError> {
        let mut stage = SwapStage::Idle;

        let input_token = self
            .tokens
            .resolve(&request.input_token)
            .await
            .ok_or(SwapError::InvalidToken)?;
        let output_token = self
            .tokens
            .resolve(&request.output_token)
            .await
            .ok_or(SwapError::InvalidToken)?;

        advance(&mut stage, SwapStage::QuoteRequested);
        let amount = to_base_units(request.amount, input_token.decimals);
        let quote = self
            .jupiter
            .get_quote(&QuoteRequest {
                input_mint: input_token.address.clone(),
                output_mint: output_token.address.clone(),
                amount,
                slippage_bps: request.slippage_bps.unwrap_or(DEFAULT_SLIPPAGE_BPS),
            })
            .await?;
        advance(&mut stage, SwapStage::QuoteReady);

        advance(&mut stage, SwapStage::InstructionsRequested);
        let payer = wallet.pubkey();
        let instructions = self
            .jupiter
            .get_swap_instructions(&quote, &payer.to_string())
            .await?;

        let mut transaction = build_transaction(&instructions, &payer)?;
        // Fresh blockhash at confirmed commitment, not finalized, to
        // minimize staleness
        let blockhash = self
            .provider
            .get_latest_blockhash_with_commitment(CommitmentConfig::confirmed())
            .await?;
        transaction.message.recent_blockhash = blockhash;
        advance(&mut stage, SwapStage::TransactionBuilt);

        let signed = wallet.sign_transaction(transaction).await?;
        advance(&mut stage, SwapStage::Signed);

        let signature = self
            .relay
            .send_transaction(&signed, &SendOptions::default())
            .await?;
        advance(&mut stage, SwapStage::Submitted);
        info!("Transaction submitted: {}", signature);

        let input_amount = request.amount;
        let output_amount = quote
            .out_amount_base_units()
            .map(|units| from_base_units(units, output_token.decimals))
            .unwrap_or(0.0);
        let price_impact = quote.price_impact();

        match self.wait_for_confirmation(&signature).await {
            ConfirmationOutcome::Confirmed => {
                advance(&mut stage, SwapStage::Confirmed);
                Ok(SwapResult::submitted(
                    signature,
                    input_amount,
                    output_amount,
                    price_impact,
                    None,
                ))
            }
            ConfirmationOutcome::Failed(error) => {
                // Submission succeeded but the transaction failed on chain
                advance(&mut stage, SwapStage::Failed);
                Err(SwapError::OnChain(error))
            }
            ConfirmationOutcome::Unknown => {
                advance(&mut stage, SwapStage::ConfirmationUnknown);
                self.schedule_balance_refresh();
                Ok(SwapResult::submitted(
                    signature,
                    input_amount,
                    output_amount,
                    price_impact,
                    Some("Transaction sent but confirmation pending".to_string()),
                ))
            }
        }
    }

    async fn wait_for_confirmation(&self, signature: &str) -> ConfirmationOutcome {
        let Ok(signature) = Signature::from_str(signature) else {
            warn!("Unparseable signature returned by relay: {}", signature);
            return ConfirmationOutcome::Unknown;
        };

        for attempt in 0..self.confirmation_attempts {
            match self
                .provider
                .get_signature_status(&signature, CommitmentConfig::confirmed())
                .await
            {
                Ok(Some(Ok(()))) => return ConfirmationOutcome::Confirmed,
                Ok(Some(Err(error))) => return ConfirmationOutcome::Failed(error),
                Ok(None) => debug!("Confirmation attempt {}: not yet seen", attempt + 1),
                Err(error) => {
                    warn!("Confirmation check failed: {}", error);
                    return ConfirmationOutcome::Unknown;
                }
            }
            tokio::time::sleep(self.confirmation_interval).await;
        }
        ConfirmationOutcome::Unknown
    }

    fn schedule_balance_refresh(&self) {
        if let Some(refresher) = self.refresher.clone() {
            let delay = self.refresh_delay;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                refresher.refresh().await;
            });
        }
    }
}

fn advance(stage: &mut SwapStage, next: SwapStage) {
    debug!("Swap stage: {:?} -> {:?}", stage, next);
    *stage = next;
}

/// Flattens the instruction groups in their fixed order: compute budget,
/// setup, swap, then cleanup if present. Groups are never interleaved or
/// reordered.
pub fn assemble_instructions(
    instructions: &SwapInstructions,
) -> Result<Vec<Instruction>, InstructionSpecError> {
    let mut assembled = Vec::with_capacity(
        instructions.compute_budget_instructions.len()
            + instructions.setup_instructions.len()
            + 2,
    );
    for spec in &instructions.compute_budget_instructions {
        assembled.push(Instruction::try_from(spec)?);
    }
    for spec in &instructions.setup_instructions {
        assembled.push(Instruction::try_from(spec)?);
    }
    assembled.push(Instruction::try_from(&instructions.swap_instruction)?);
    if let Some(cleanup) = &instructions.cleanup_instruction {
        assembled.push(Instruction::try_from(cleanup)?);
    }
    Ok(assembled)
}

fn build_transaction(
    instructions: &SwapInstructions,
    payer: &Pubkey,
) -> Result<Transaction, InstructionSpecError> {
    let assembled = assemble_instructions(instructions)?;
    Ok(Transaction::new_with_payer(&assembled, Some(payer)))
}
