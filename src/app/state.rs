use {
    crate::libs::wallet::WalletError,
    alloy::primitives::{Address, TxHash, U256},
    polybridge::{units, BridgeError, TransferReceipt},
    std::fmt,
};

/// Where the orchestrator is in the connect → init → transfer sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Connecting,
    /// An account is known but no bridge client exists for it yet.
    Connected,
    ClientInitializing,
    Ready,
    TransferPending,
    TransferConfirmed,
    /// Client initialization failed. `recoverable` means a new connect is
    /// allowed.
    Error { recoverable: bool },
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Disconnected => "disconnected",
            Phase::Connecting => "connecting",
            Phase::Connected => "connected (no client)",
            Phase::ClientInitializing => "initializing client",
            Phase::Ready => "ready",
            Phase::TransferPending => "transfer pending",
            Phase::TransferConfirmed => "transfer confirmed",
            Phase::Error { .. } => "error",
        }
    }
}

/// One connected wallet account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub account: Option<Address>,
    pub chain_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenQuery {
    pub token: Address,
    pub decimals: u8,
    pub raw_balance: Option<U256>,
}

impl TokenQuery {
    pub fn new(token: Address, decimals: u8) -> Self {
        Self {
            token,
            decimals,
            raw_balance: None,
        }
    }

    pub fn display_balance(&self) -> Option<String> {
        self.raw_balance
            .map(|raw| units::to_display(raw, self.decimals))
    }
}

/// A transfer as configured: human amount plus its exact raw equivalent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub amount: String,
    pub token: Address,
    pub recipient: Address,
    pub decimals: u8,
    raw_amount: U256,
}

impl TransferRequest {
    pub fn new(
        amount: &str,
        token: Address,
        recipient: Address,
        decimals: u8,
    ) -> Result<Self, units::AmountError> {
        let raw_amount = units::to_raw(amount, decimals)?;
        Ok(Self {
            amount: amount.trim().to_string(),
            token,
            recipient,
            decimals,
            raw_amount,
        })
    }

    pub fn raw_amount(&self) -> U256 {
        self.raw_amount
    }
}

/// Filled in two steps: the hash when the node accepts the transaction,
/// the receipt when it is mined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferResult {
    pub transaction_hash: Option<TxHash>,
    pub receipt: Option<TransferReceipt>,
}

impl TransferResult {
    pub fn is_empty(&self) -> bool {
        self.transaction_hash.is_none() && self.receipt.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    WalletUnavailable,
    UserRejected,
    InitializationError,
    QueryError,
    InsufficientFunds,
    InvalidRecipient,
    SubmissionError,
}

/// An error shown to the user, with the kind it was classified as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub kind: ErrorKind,
    pub message: String,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl From<WalletError> for Fault {
    fn from(e: WalletError) -> Self {
        let kind = match e {
            WalletError::UserRejected => ErrorKind::UserRejected,
            WalletError::NotAvailable(_) | WalletError::Rpc { .. } => ErrorKind::WalletUnavailable,
        };
        Self {
            kind,
            message: e.to_string(),
        }
    }
}

impl From<BridgeError> for Fault {
    fn from(e: BridgeError) -> Self {
        let kind = match e {
            BridgeError::Initialization(_) => ErrorKind::InitializationError,
            BridgeError::Query(_) => ErrorKind::QueryError,
            BridgeError::InsufficientFunds(_) => ErrorKind::InsufficientFunds,
            BridgeError::InvalidRecipient(_) => ErrorKind::InvalidRecipient,
            BridgeError::Submission(_) => ErrorKind::SubmissionError,
        };
        Self {
            kind,
            message: e.to_string(),
        }
    }
}
