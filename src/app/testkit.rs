//! Scripted wallet and bridge doubles for the orchestrator tests.

use {
    crate::libs::wallet::{WalletError, WalletGateway},
    alloy::primitives::{Address, TxHash, U256},
    async_trait::async_trait,
    polybridge::{
        Bridge, BridgeClient, BridgeError, InitConfig, NetworkParams, PendingTransfer, TokenHandle,
        TransferReceipt, Variant,
    },
    std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc, Mutex,
        },
    },
    tokio::sync::Notify,
};

pub fn acct(n: u8) -> Address {
    Address::repeat_byte(n)
}

pub fn token() -> Address {
    Address::repeat_byte(0xee)
}

pub fn recipient() -> Address {
    Address::repeat_byte(0xcc)
}

pub fn pos_mumbai() -> &'static NetworkParams {
    Variant::Pos
        .resolve("testnet", "mumbai")
        .expect("table entry")
}

#[derive(Default)]
pub struct FakeWallet {
    pub accounts: Mutex<Vec<Address>>,
    pub on_request: Mutex<Option<Result<Vec<Address>, WalletError>>>,
    pub chain_id: u64,
}

impl FakeWallet {
    pub fn with_accounts(accounts: Vec<Address>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
            on_request: Mutex::new(None),
            chain_id: 80001,
        }
    }
}

#[async_trait]
impl WalletGateway for FakeWallet {
    async fn list_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        match self.on_request.lock().unwrap().clone() {
            Some(res) => res,
            None => Ok(self.accounts.lock().unwrap().clone()),
        }
    }

    async fn current_chain_id(&self) -> Result<u64, WalletError> {
        Ok(self.chain_id)
    }
}

/// Shared chain state behind every client the fake bridge hands out.
#[derive(Default)]
pub struct Ledger {
    pub balances: Mutex<HashMap<Address, Result<U256, BridgeError>>>,
    /// Balance reads for these accounts wait until notified.
    pub gates: Mutex<HashMap<Address, Arc<Notify>>>,
    pub transfer_error: Mutex<Option<BridgeError>>,
    pub receipt_gate: Mutex<Option<Arc<Notify>>>,
    pub sent: Mutex<Vec<(Address, U256)>>,
}

impl Ledger {
    pub fn set_balance(&self, account: Address, raw: u128) {
        self.balances
            .lock()
            .unwrap()
            .insert(account, Ok(U256::from(raw)));
    }

    pub fn fail_balance(&self, account: Address) {
        self.balances
            .lock()
            .unwrap()
            .insert(account, Err(BridgeError::Query("rpc timeout".into())));
    }

    pub fn gate(&self, account: Address) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(account, gate.clone());
        gate
    }
}

#[derive(Default)]
pub struct FakeBridge {
    pub ledger: Arc<Ledger>,
    pub fail_init: Mutex<Option<BridgeError>>,
    pub init_calls: AtomicUsize,
}

impl FakeBridge {
    pub fn inits(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Bridge for FakeBridge {
    async fn init(&self, config: &InitConfig) -> Result<Arc<dyn BridgeClient>, BridgeError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = self.fail_init.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(Arc::new(FakeClient::new(config.default_sender, self.ledger.clone())))
    }
}

#[derive(Debug)]
pub struct FakeClient {
    sender: Address,
    ledger: Arc<Ledger>,
}

impl FakeClient {
    pub fn new(sender: Address, ledger: Arc<Ledger>) -> Self {
        Self { sender, ledger }
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Ledger")
    }
}

impl BridgeClient for FakeClient {
    fn network(&self) -> &NetworkParams {
        pos_mumbai()
    }

    fn sender(&self) -> Address {
        self.sender
    }

    fn erc20(&self, token: Address, _is_parent: bool) -> Box<dyn TokenHandle> {
        Box::new(FakeToken {
            token,
            sender: self.sender,
            ledger: self.ledger.clone(),
        })
    }
}

struct FakeToken {
    token: Address,
    sender: Address,
    ledger: Arc<Ledger>,
}

#[async_trait]
impl TokenHandle for FakeToken {
    fn address(&self) -> Address {
        self.token
    }

    async fn get_balance(&self, account: Address) -> Result<U256, BridgeError> {
        let gate = self.ledger.gates.lock().unwrap().get(&account).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.ledger
            .balances
            .lock()
            .unwrap()
            .get(&account)
            .cloned()
            .unwrap_or(Ok(U256::ZERO))
    }

    async fn transfer(
        &self,
        raw_amount: U256,
        recipient: Address,
    ) -> Result<Box<dyn PendingTransfer>, BridgeError> {
        if let Some(e) = self.ledger.transfer_error.lock().unwrap().clone() {
            return Err(e);
        }
        self.ledger.sent.lock().unwrap().push((recipient, raw_amount));
        let hash = TxHash::repeat_byte(self.sender.0[0]);
        Ok(Box::new(FakePending {
            hash,
            gate: self.ledger.receipt_gate.lock().unwrap().clone(),
        }))
    }
}

struct FakePending {
    hash: TxHash,
    gate: Option<Arc<Notify>>,
}

#[async_trait]
impl PendingTransfer for FakePending {
    async fn transaction_hash(&self) -> Result<TxHash, BridgeError> {
        Ok(self.hash)
    }

    async fn receipt(self: Box<Self>) -> Result<TransferReceipt, BridgeError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(TransferReceipt {
            transaction_hash: self.hash,
            block_number: Some(42),
            gas_used: 34_567,
            status: true,
        })
    }
}
