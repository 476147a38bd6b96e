//! Data structures shared across the explorer client and the shells.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The one receiver every wallet is checked against.
pub const RECEIVER_ADDRESS: &str = "tb1qqw5qvg0u4rw7wy0eu9mtlmfze6ra7z0xnlwrl8";

/// Shown when a check is requested without an address.
pub const EMPTY_ADDRESS_MESSAGE: &str = "Please enter a wallet address.";

/// Shown whenever history retrieval was cut short, whatever the cause.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching transactions. Please try again.";

/// Errors emitted when a user-supplied wallet address is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("{EMPTY_ADDRESS_MESSAGE}")]
    Empty,
}

/// A wallet address that passed the only check we perform: it is not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimal listing record; `txid` doubles as the pagination cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub txid: String,
}

impl TransactionSummary {
    pub fn new(txid: impl Into<String>) -> Self {
        Self { txid: txid.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxInput {
    /// Owner of the spent output. `None` for coinbase inputs and
    /// non-standard scripts.
    pub funding_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxOutput {
    pub address: Option<String>,
}

/// Full record for one transaction, reduced to what matching needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDetail {
    pub txid: String,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
}

impl TransactionDetail {
    pub fn input_addresses(&self) -> impl Iterator<Item = &str> + '_ {
        self.inputs
            .iter()
            .filter_map(|input| input.funding_address.as_deref())
    }

    pub fn output_addresses(&self) -> impl Iterator<Item = &str> + '_ {
        self.outputs
            .iter()
            .filter_map(|output| output.address.as_deref())
    }

    /// `true` when `sender` funded at least one input and `receiver` owns at
    /// least one output. Comparison is exact; absent addresses never match.
    pub fn is_interaction(&self, sender: &str, receiver: &str) -> bool {
        self.input_addresses().any(|address| address == sender)
            && self.output_addresses().any(|address| address == receiver)
    }
}

/// Outcome of one check. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionResult {
    interaction_found: bool,
    interaction_txid: Option<String>,
}

impl InteractionResult {
    pub fn found(txid: impl Into<String>) -> Self {
        Self {
            interaction_found: true,
            interaction_txid: Some(txid.into()),
        }
    }

    pub fn not_found() -> Self {
        Self {
            interaction_found: false,
            interaction_txid: None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.interaction_found
    }

    pub fn matched_transaction_id(&self) -> Option<&str> {
        self.interaction_txid.as_deref()
    }
}

/// Request-scoped state handed to a check and returned from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckContext {
    pub address: String,
    pub result: Option<InteractionResult>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CheckContext {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// Clears the previous outcome and marks the check as running.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.result = None;
    }

    pub fn finish(&mut self) {
        self.loading = false;
    }
}
