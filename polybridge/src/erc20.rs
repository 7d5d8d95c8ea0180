use alloy::network::{Ethereum, ReceiptResponse};
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder};
use async_trait::async_trait;

use crate::abi::IERC20;
use crate::client::{PendingTransfer, TokenHandle, TransferReceipt};
use crate::error::BridgeError;
use crate::log;
use crate::writing::cc;

/// ERC-20 token on one side of the bridge, acting for a fixed sender.
pub struct Erc20Handle {
    contract: IERC20::IERC20Instance<DynProvider>,
    sender: Address,
    chain: &'static str,
    guarded: &'static [Address],
}

impl Erc20Handle {
    pub(crate) fn new(
        token: Address,
        provider: DynProvider,
        sender: Address,
        chain: &'static str,
        guarded: &'static [Address],
    ) -> Self {
        Self {
            contract: IERC20::new(token, provider),
            sender,
            chain,
            guarded,
        }
    }

    fn check_recipient(&self, recipient: Address) -> Result<(), BridgeError> {
        if recipient == Address::ZERO
            || recipient == self.address()
            || self.guarded.contains(&recipient)
        {
            return Err(BridgeError::InvalidRecipient(recipient));
        }
        Ok(())
    }
}

#[async_trait]
impl TokenHandle for Erc20Handle {
    fn address(&self) -> Address {
        *self.contract.address()
    }

    async fn get_balance(&self, account: Address) -> Result<U256, BridgeError> {
        self.contract
            .balanceOf(account)
            .call()
            .await
            .map_err(BridgeError::query)
    }

    async fn transfer(
        &self,
        raw_amount: U256,
        recipient: Address,
    ) -> Result<Box<dyn PendingTransfer>, BridgeError> {
        self.check_recipient(recipient)?;

        let available = self
            .contract
            .balanceOf(self.sender)
            .call()
            .await
            .map_err(|e| BridgeError::Submission(format!("balance pre-check failed: {e}")))?;
        if available < raw_amount {
            return Err(BridgeError::InsufficientFunds(format!(
                "need {raw_amount}, have {available}"
            )));
        }

        log!(
            cc::YELLOW,
            "[{}] transfer {} of {} from {} to {}",
            self.chain,
            raw_amount,
            self.address(),
            self.sender,
            recipient
        );
        let pending = self
            .contract
            .transfer(recipient, raw_amount)
            .from(self.sender)
            .send()
            .await
            .map_err(|e| classify_send_error(e.to_string()))?;

        let hash = *pending.tx_hash();
        log!(cc::LIGHT_GREEN, "[{}] submitted {}", self.chain, hash);
        Ok(Box::new(Erc20Transfer { hash, pending }))
    }
}

fn classify_send_error(msg: String) -> BridgeError {
    if msg.to_ascii_lowercase().contains("insufficient funds") {
        BridgeError::InsufficientFunds(msg)
    } else {
        BridgeError::Submission(msg)
    }
}

/// Transaction accepted by the node, not yet mined.
pub struct Erc20Transfer {
    hash: TxHash,
    pending: PendingTransactionBuilder<Ethereum>,
}

#[async_trait]
impl PendingTransfer for Erc20Transfer {
    async fn transaction_hash(&self) -> Result<TxHash, BridgeError> {
        Ok(self.hash)
    }

    async fn receipt(self: Box<Self>) -> Result<TransferReceipt, BridgeError> {
        let Erc20Transfer { hash, pending } = *self;
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| BridgeError::Submission(format!("waiting for receipt of {hash}: {e}")))?;

        if !receipt.status() {
            return Err(BridgeError::Submission(format!("transaction {hash} reverted")));
        }
        Ok(TransferReceipt {
            transaction_hash: receipt.transaction_hash(),
            block_number: receipt.block_number(),
            gas_used: receipt.gas_used(),
            status: true,
        })
    }
}
