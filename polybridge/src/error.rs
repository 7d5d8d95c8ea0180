use alloy::primitives::Address;
use thiserror::Error;

/// Failures surfaced by a bridge client or one of its token handles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// Providers unreachable, or the network/version pair is not known.
    #[error("bridge client initialization failed: {0}")]
    Initialization(String),

    /// A read against the chain failed. Never means "balance is zero".
    #[error("token query failed: {0}")]
    Query(String),

    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    #[error("invalid recipient {0}")]
    InvalidRecipient(Address),

    #[error("transfer submission failed: {0}")]
    Submission(String),
}

impl BridgeError {
    pub(crate) fn init(e: impl std::fmt::Display) -> Self {
        Self::Initialization(e.to_string())
    }

    pub(crate) fn query(e: impl std::fmt::Display) -> Self {
        Self::Query(e.to_string())
    }
}
