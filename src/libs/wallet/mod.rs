//! The browser-wallet contract the orchestrator consumes, and a JSON-RPC
//! implementation of it in [`client`].

pub mod client;

use alloy::primitives::Address;
use async_trait::async_trait;
use thiserror::Error;

pub use client::RpcWallet;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("wallet not available: {0}")]
    NotAvailable(String),

    #[error("request rejected by the user")]
    UserRejected,

    #[error("wallet rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
}

#[async_trait]
pub trait WalletGateway: Send + Sync {
    /// Accounts already authorized for this app. Never prompts; empty when
    /// nothing has been authorized yet.
    async fn list_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Ask the user to authorize accounts.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    async fn current_chain_id(&self) -> Result<u64, WalletError>;
}
