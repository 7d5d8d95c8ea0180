use std::fmt::Debug;
use std::sync::Arc;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use url::Url;

use crate::error::BridgeError;
use crate::network::{NetworkParams, Variant};
use crate::polygon::PolygonClient;

/// Everything `init` needs. `default_sender` is the connected account and
/// becomes the `from` of every transaction the client sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitConfig {
    pub network: String,
    pub version: String,
    pub parent_rpc: Url,
    pub child_rpc: Url,
    pub default_sender: Address,
}

/// Confirmation record of a mined transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub status: bool,
}

/// Builds a ready [`BridgeClient`]. Calling `init` again with the same
/// config yields an equivalent, independent client.
#[async_trait]
pub trait Bridge: Send + Sync {
    async fn init(&self, config: &InitConfig) -> Result<Arc<dyn BridgeClient>, BridgeError>;
}

/// An initialized client bound to one sender account.
pub trait BridgeClient: Send + Sync + Debug {
    fn network(&self) -> &NetworkParams;

    fn sender(&self) -> Address;

    /// Handle for `token` on the parent (`true`) or child chain. No network
    /// call happens until an operation is invoked on the handle.
    fn erc20(&self, token: Address, is_parent: bool) -> Box<dyn TokenHandle>;
}

#[async_trait]
pub trait TokenHandle: Send + Sync {
    fn address(&self) -> Address;

    /// Balance of `account` in raw units.
    async fn get_balance(&self, account: Address) -> Result<U256, BridgeError>;

    /// Submit a transfer of `raw_amount` from the client's sender.
    async fn transfer(
        &self,
        raw_amount: U256,
        recipient: Address,
    ) -> Result<Box<dyn PendingTransfer>, BridgeError>;
}

/// A submitted transfer. The hash is known once the node accepted the
/// transaction; the receipt arrives when it is mined.
#[async_trait]
pub trait PendingTransfer: Send + Sync {
    async fn transaction_hash(&self) -> Result<TxHash, BridgeError>;

    async fn receipt(self: Box<Self>) -> Result<TransferReceipt, BridgeError>;
}

#[async_trait]
impl Bridge for Variant {
    async fn init(&self, config: &InitConfig) -> Result<Arc<dyn BridgeClient>, BridgeError> {
        Ok(Arc::new(PolygonClient::init(*self, config).await?))
    }
}
