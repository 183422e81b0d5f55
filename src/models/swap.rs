//! Swap flow models: quotes, instruction descriptors and results.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use std::str::FromStr;
use thiserror::Error;

use crate::constants::DEFAULT_SEND_MAX_RETRIES;

/// Parameters for one user-initiated swap. Tokens may be given by symbol or
/// by mint address; `amount` is the user-entered decimal amount of the input
/// token.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRequest {
    pub input_token: String,
    pub output_token: String,
    pub amount: f64,
    pub slippage_bps: Option<u16>,
}

/// Quote request sent to the aggregator. `amount` is in the input token's
/// smallest unit.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub input_mint: String,
    pub output_mint: String,
    pub amount: u64,
    pub slippage_bps: u16,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteWire {
    input_mint: String,
    output_mint: String,
    in_amount: String,
    out_amount: String,
    price_impact_pct: String,
    #[serde(default)]
    route_plan: Vec<RoutePlanStep>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoutePlanStep {
    swap_info: RouteSwapInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteSwapInfo {
    #[serde(default)]
    label: Option<String>,
}

/// Immutable snapshot of an aggregator quote. Valid only for the instant it
/// was fetched; discarded and re-fetched on any input change.
///
/// `raw` keeps the aggregator's full payload so it can be posted back
/// verbatim to the instruction endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub input_mint: String,
    pub output_mint: String,
    pub in_amount: String,
    pub out_amount: String,
    pub price_impact_pct: String,
    pub route: String,
    pub raw: Value,
}

impl Quote {
    pub fn from_raw(raw: Value) -> Result<Self, serde_json::Error> {
        let wire: QuoteWire = serde_json::from_value(raw.clone())?;
        let route = wire
            .route_plan
            .first()
            .and_then(|step| step.swap_info.label.clone())
            .unwrap_or_else(|| "Direct".to_string());
        Ok(Self {
            input_mint: wire.input_mint,
            output_mint: wire.output_mint,
            in_amount: wire.in_amount,
            out_amount: wire.out_amount,
            price_impact_pct: wire.price_impact_pct,
            route,
            raw,
        })
    }

    /// Quoted output amount in the output token's smallest unit.
    pub fn out_amount_base_units(&self) -> Option<u64> {
        self.out_amount.parse().ok()
    }

    pub fn price_impact(&self) -> f64 {
        self.price_impact_pct.parse().unwrap_or(0.0)
    }
}

/// Account reference inside an opaque instruction descriptor.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstructionAccount {
    pub pubkey: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// Opaque instruction descriptor as returned by the aggregator: a program id,
/// account metas and base64-encoded instruction data.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstructionSpec {
    pub program_id: String,
    pub accounts: Vec<InstructionAccount>,
    pub data: String,
}

#[derive(Error, Debug)]
pub enum InstructionSpecError {
    #[error("Invalid program id: {0}")]
    InvalidProgramId(String),
    #[error("Invalid account pubkey: {0}")]
    InvalidAccount(String),
    #[error("Invalid instruction data: {0}")]
    InvalidData(String),
}

impl TryFrom<&InstructionSpec> for Instruction {
    type Error = InstructionSpecError;

    fn try_from(spec: &InstructionSpec) -> Result<Self, Self::Error> {
        let program_id = Pubkey::from_str(&spec.program_id)
            .map_err(|e| InstructionSpecError::InvalidProgramId(e.to_string()))?;
        let accounts = spec
            .accounts
            .iter()
            .map(|account| {
                Ok(AccountMeta {
                    pubkey: Pubkey::from_str(&account.pubkey)
                        .map_err(|e| InstructionSpecError::InvalidAccount(e.to_string()))?,
                    is_signer: account.is_signer,
                    is_writable: account.is_writable,
                })
            })
            .collect::<Result<Vec<_>, InstructionSpecError>>()?;
        let data = BASE64
            .decode(&spec.data)
            .map_err(|e| InstructionSpecError::InvalidData(e.to_string()))?;
        Ok(Instruction {
            program_id,
            accounts,
            data,
        })
    }
}

/// Ordered instruction groups from the aggregator's instruction endpoint.
/// Assembly order is significant: compute budget, setup, swap, cleanup.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapInstructions {
    #[serde(default)]
    pub compute_budget_instructions: Vec<InstructionSpec>,
    #[serde(default)]
    pub setup_instructions: Vec<InstructionSpec>,
    pub swap_instruction: InstructionSpec,
    #[serde(default)]
    pub cleanup_instruction: Option<InstructionSpec>,
}

/// Options forwarded to the backend `sendTransaction` call.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SendOptions {
    pub encoding: String,
    pub skip_preflight: bool,
    pub preflight_commitment: String,
    pub max_retries: usize,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            encoding: "base64".to_string(),
            skip_preflight: false,
            preflight_commitment: "confirmed".to_string(),
            max_retries: DEFAULT_SEND_MAX_RETRIES,
        }
    }
}

/// Terminal outcome of one swap attempt. Created once per attempt, never
/// reused.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SwapResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_impact: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SwapResult {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            signature: None,
            error: Some(error.into()),
            input_amount: None,
            output_amount: None,
            price_impact: None,
            note: None,
        }
    }

    pub fn submitted(
        signature: String,
        input_amount: f64,
        output_amount: f64,
        price_impact: f64,
        note: Option<String>,
    ) -> Self {
        Self {
            success: true,
            signature: Some(signature),
            error: None,
            input_amount: Some(input_amount),
            output_amount: Some(output_amount),
            price_impact: Some(price_impact),
            note,
        }
    }
}
