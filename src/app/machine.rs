//! The connect → init → balance → transfer state machine.
//!
//! [`Machine::handle`] is the only way state changes. It performs no I/O:
//! every external call comes back out as a [`Command`], and its outcome
//! goes back in as an [`Event`] stamped with the epoch it was issued under.
//! The epoch moves whenever the bound account changes, so a late answer
//! for a previous account is dropped instead of applied.

use {
    super::state::{Fault, Phase, Session, TokenQuery, TransferRequest, TransferResult},
    crate::constants::PHASE_HISTORY,
    crate::libs::wallet::WalletError,
    crate::libs::writing::cc,
    crate::{log, warn},
    alloy::primitives::{Address, TxHash, U256},
    polybridge::{BridgeClient, BridgeError, TransferReceipt},
    std::{collections::VecDeque, sync::Arc},
};

/// Accounts (first one wins) plus the wallet's chain id if it was readable.
pub type AccountList = Result<(Vec<Address>, Option<u64>), WalletError>;

#[derive(Debug)]
pub enum Event {
    /// Startup: look for already-authorized accounts without prompting.
    Mount,
    /// User asked to connect.
    Connect,
    /// User asked to send the configured transfer.
    Transfer,
    AccountsListed(AccountList),
    ConnectResolved(AccountList),
    /// The wallet now reports these accounts.
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
    ClientReady {
        epoch: u64,
        client: Arc<dyn BridgeClient>,
    },
    ClientFailed {
        epoch: u64,
        error: BridgeError,
    },
    BalanceFetched {
        epoch: u64,
        account: Address,
        result: Result<U256, BridgeError>,
    },
    TransferSubmitted {
        epoch: u64,
        result: Result<TxHash, BridgeError>,
    },
    TransferSettled {
        epoch: u64,
        result: Result<TransferReceipt, BridgeError>,
    },
}

#[derive(Debug)]
pub enum Command {
    ListAccounts,
    RequestAccounts,
    InitClient {
        epoch: u64,
        account: Address,
    },
    FetchBalance {
        epoch: u64,
        account: Address,
        client: Arc<dyn BridgeClient>,
        token: Address,
        on_parent: bool,
    },
    SubmitTransfer {
        epoch: u64,
        client: Arc<dyn BridgeClient>,
        request: TransferRequest,
        on_parent: bool,
    },
}

pub struct Machine {
    phase: Phase,
    session: Session,
    epoch: u64,
    client: Option<Arc<dyn BridgeClient>>,
    token: TokenQuery,
    request: TransferRequest,
    on_parent: bool,
    transfer: TransferResult,
    fault: Option<Fault>,
    history: VecDeque<Phase>,
}

impl Machine {
    pub fn new(request: TransferRequest, on_parent: bool) -> Self {
        let mut history = VecDeque::with_capacity(PHASE_HISTORY);
        history.push_back(Phase::Disconnected);
        Self {
            phase: Phase::Disconnected,
            session: Session::default(),
            epoch: 0,
            client: None,
            token: TokenQuery::new(request.token, request.decimals),
            request,
            on_parent,
            transfer: TransferResult::default(),
            fault: None,
            history,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn client(&self) -> Option<&Arc<dyn BridgeClient>> {
        self.client.as_ref()
    }

    pub fn token(&self) -> &TokenQuery {
        &self.token
    }

    pub fn request(&self) -> &TransferRequest {
        &self.request
    }

    pub fn transfer(&self) -> &TransferResult {
        &self.transfer
    }

    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    /// Phases entered so far, oldest first, bounded.
    pub fn history(&self) -> impl Iterator<Item = &Phase> {
        self.history.iter()
    }

    pub fn can_transfer(&self) -> bool {
        self.client.is_some() && matches!(self.phase, Phase::Ready | Phase::TransferConfirmed)
    }

    pub fn handle(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::Mount => self.on_mount(),
            Event::Connect => self.on_connect(),
            Event::Transfer => self.on_transfer(),
            Event::AccountsListed(res) => self.on_accounts_listed(res),
            Event::ConnectResolved(res) => self.on_connect_resolved(res),
            Event::AccountsChanged(accounts) => self.on_accounts_changed(accounts),
            Event::ChainChanged(id) => {
                if self.session.account.is_some() {
                    self.session.chain_id = Some(id);
                }
                vec![]
            }
            Event::ClientReady { epoch, client } => self.on_client_ready(epoch, client),
            Event::ClientFailed { epoch, error } => self.on_client_failed(epoch, error),
            Event::BalanceFetched {
                epoch,
                account,
                result,
            } => self.on_balance(epoch, account, result),
            Event::TransferSubmitted { epoch, result } => self.on_submitted(epoch, result),
            Event::TransferSettled { epoch, result } => self.on_settled(epoch, result),
        }
    }

    fn on_mount(&mut self) -> Vec<Command> {
        if self.phase != Phase::Disconnected || self.session.account.is_some() {
            return vec![];
        }
        vec![Command::ListAccounts]
    }

    fn on_connect(&mut self) -> Vec<Command> {
        match self.phase {
            Phase::Disconnected | Phase::Error { recoverable: true } => {
                self.fault = None;
                self.set_phase(Phase::Connecting);
                vec![Command::RequestAccounts]
            }
            other => {
                log!(cc::YELLOW, "connect ignored while {}", other.label());
                vec![]
            }
        }
    }

    fn on_accounts_listed(&mut self, res: AccountList) -> Vec<Command> {
        // a connect started meanwhile owns the outcome
        if self.phase != Phase::Disconnected {
            return vec![];
        }
        match res {
            Ok((accounts, chain_id)) => match accounts.first() {
                Some(&account) => {
                    self.session.chain_id = chain_id;
                    self.bind_account(account)
                }
                None => {
                    log!(cc::LIGHT_GRAY, "no authorized account found");
                    vec![]
                }
            },
            Err(e) => {
                warn!("wallet check failed: {e}");
                self.fault = Some(e.into());
                vec![]
            }
        }
    }

    fn on_connect_resolved(&mut self, res: AccountList) -> Vec<Command> {
        if self.phase != Phase::Connecting {
            return vec![];
        }
        match res {
            Ok((accounts, chain_id)) => match accounts.first() {
                Some(&account) => {
                    log!(cc::LIGHT_GREEN, "connected to account {}", account);
                    self.session.chain_id = chain_id;
                    self.bind_account(account)
                }
                None => {
                    warn!("wallet authorized no accounts");
                    self.clear_session();
                    vec![]
                }
            },
            Err(e) => {
                warn!("connect failed: {e}");
                self.clear_session();
                self.fault = Some(e.into());
                vec![]
            }
        }
    }

    fn on_accounts_changed(&mut self, accounts: Vec<Address>) -> Vec<Command> {
        if matches!(self.phase, Phase::Disconnected | Phase::Connecting) {
            return vec![];
        }
        let next = accounts.first().copied();
        if next == self.session.account {
            return vec![];
        }
        match next {
            Some(account) => {
                log!(cc::CYAN, "account changed to {}", account);
                self.fault = None;
                self.bind_account(account)
            }
            None => {
                log!(cc::YELLOW, "wallet reports no accounts; session cleared");
                self.clear_session();
                vec![]
            }
        }
    }

    /// Start a fresh epoch for `account` and ask for a client. Anything
    /// derived from a previous account is dropped here.
    fn bind_account(&mut self, account: Address) -> Vec<Command> {
        self.epoch += 1;
        self.session.account = Some(account);
        self.reset_session_data();
        self.set_phase(Phase::Connected);
        self.set_phase(Phase::ClientInitializing);
        vec![Command::InitClient {
            epoch: self.epoch,
            account,
        }]
    }

    /// Drop the bound account and everything derived from it. Work still in
    /// flight for it becomes stale.
    fn clear_session(&mut self) {
        self.epoch += 1;
        self.session = Session::default();
        self.reset_session_data();
        self.set_phase(Phase::Disconnected);
    }

    fn reset_session_data(&mut self) {
        self.client = None;
        self.token.raw_balance = None;
        self.transfer = TransferResult::default();
    }

    fn on_client_ready(&mut self, epoch: u64, client: Arc<dyn BridgeClient>) -> Vec<Command> {
        if self.is_stale(epoch, "client") || self.phase != Phase::ClientInitializing {
            return vec![];
        }
        let Some(account) = self.session.account else {
            return vec![];
        };
        if client.sender() != account {
            warn!("client bound to {} but session is {}; dropped", client.sender(), account);
            return vec![];
        }
        self.client = Some(client.clone());
        self.set_phase(Phase::Ready);
        vec![Command::FetchBalance {
            epoch,
            account,
            client,
            token: self.token.token,
            on_parent: self.on_parent,
        }]
    }

    fn on_client_failed(&mut self, epoch: u64, error: BridgeError) -> Vec<Command> {
        if self.is_stale(epoch, "client failure") || self.phase != Phase::ClientInitializing {
            return vec![];
        }
        warn!("client init failed: {error}");
        self.client = None;
        self.fault = Some(error.into());
        self.set_phase(Phase::Error { recoverable: true });
        vec![]
    }

    fn on_balance(
        &mut self,
        epoch: u64,
        account: Address,
        result: Result<U256, BridgeError>,
    ) -> Vec<Command> {
        if self.is_stale(epoch, "balance") || self.session.account != Some(account) {
            return vec![];
        }
        match result {
            Ok(raw) => {
                self.token.raw_balance = Some(raw);
                log!(
                    cc::LIGHT_GREEN,
                    "balance of {}: {}",
                    account,
                    self.token.display_balance().unwrap_or_default()
                );
            }
            // the displayed balance stays as it was
            Err(e) => warn!("balance query failed: {e}"),
        }
        vec![]
    }

    fn on_transfer(&mut self) -> Vec<Command> {
        if !self.can_transfer() {
            log!(cc::YELLOW, "transfer ignored while {}", self.phase.label());
            return vec![];
        }
        let Some(client) = self.client.clone() else {
            return vec![];
        };
        self.fault = None;
        self.transfer = TransferResult::default();
        self.set_phase(Phase::TransferPending);
        vec![Command::SubmitTransfer {
            epoch: self.epoch,
            client,
            request: self.request.clone(),
            on_parent: self.on_parent,
        }]
    }

    fn on_submitted(&mut self, epoch: u64, result: Result<TxHash, BridgeError>) -> Vec<Command> {
        if self.is_stale(epoch, "transfer hash") || self.phase != Phase::TransferPending {
            return vec![];
        }
        match result {
            Ok(hash) => {
                log!(cc::LIGHT_GREEN, "transfer submitted: {}", hash);
                self.transfer.transaction_hash = Some(hash);
            }
            Err(e) => {
                warn!("transfer rejected: {e}");
                self.transfer = TransferResult::default();
                self.fault = Some(e.into());
                self.set_phase(Phase::Ready);
            }
        }
        vec![]
    }

    fn on_settled(
        &mut self,
        epoch: u64,
        result: Result<TransferReceipt, BridgeError>,
    ) -> Vec<Command> {
        if self.is_stale(epoch, "receipt") || self.phase != Phase::TransferPending {
            return vec![];
        }
        match result {
            Ok(receipt) => {
                log!(
                    cc::LIGHT_GREEN,
                    "transfer confirmed in block {:?}",
                    receipt.block_number
                );
                if self.transfer.transaction_hash.is_none() {
                    self.transfer.transaction_hash = Some(receipt.transaction_hash);
                }
                self.transfer.receipt = Some(receipt);
                self.set_phase(Phase::TransferConfirmed);
            }
            // keep the hash so the transaction can still be looked up
            Err(e) => {
                warn!("transfer not confirmed: {e}");
                self.fault = Some(e.into());
                self.set_phase(Phase::Ready);
            }
        }
        vec![]
    }

    fn is_stale(&self, epoch: u64, what: &str) -> bool {
        if epoch != self.epoch {
            log!(
                cc::LIGHT_GRAY,
                "discarding {} from epoch {} (current {})",
                what,
                epoch,
                self.epoch
            );
            return true;
        }
        false
    }

    fn set_phase(&mut self, next: Phase) {
        if next == self.phase {
            return;
        }
        log!(cc::PURPLE, "{} -> {}", self.phase.label(), next.label());
        self.phase = next;
        if self.history.len() == PHASE_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(next);
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::app::{
            state::ErrorKind,
            testkit::{acct, recipient, token, FakeClient, Ledger},
        },
    };

    fn machine() -> Machine {
        let request = TransferRequest::new("0.1", token(), recipient(), 18).unwrap();
        Machine::new(request, false)
    }

    fn client_for(account: Address) -> Arc<dyn BridgeClient> {
        Arc::new(FakeClient::new(account, Arc::new(Ledger::default())))
    }

    /// Mount with `account` authorized and answer the init command.
    fn ready(account: Address) -> Machine {
        let mut m = machine();
        m.handle(Event::Mount);
        m.handle(Event::AccountsListed(Ok((vec![account], Some(80001)))));
        let cmds = m.handle(Event::ClientReady {
            epoch: m.epoch(),
            client: client_for(account),
        });
        assert!(matches!(cmds.as_slice(), [Command::FetchBalance { .. }]));
        m
    }

    #[test]
    fn mount_lists_without_prompting() {
        let mut m = machine();
        let cmds = m.handle(Event::Mount);
        assert!(matches!(cmds.as_slice(), [Command::ListAccounts]));

        let cmds = m.handle(Event::AccountsListed(Ok((vec![], None))));
        assert!(cmds.is_empty());
        assert_eq!(m.phase(), Phase::Disconnected);
        assert!(m.session().account.is_none());
    }

    #[test]
    fn first_account_is_bound_and_client_requested() {
        let mut m = machine();
        m.handle(Event::Mount);
        let cmds = m.handle(Event::AccountsListed(Ok((vec![acct(1), acct(2)], Some(80001)))));

        assert_eq!(m.phase(), Phase::ClientInitializing);
        assert_eq!(m.session().account, Some(acct(1)));
        match cmds.as_slice() {
            [Command::InitClient { epoch, account }] => {
                assert_eq!(*epoch, m.epoch());
                assert_eq!(*account, acct(1));
            }
            other => panic!("unexpected commands: {other:?}"),
        }
        let seen: Vec<Phase> = m.history().copied().collect();
        assert_eq!(
            seen,
            vec![Phase::Disconnected, Phase::Connected, Phase::ClientInitializing]
        );
    }

    #[test]
    fn ready_fetches_balance_for_bound_account() {
        let m = ready(acct(1));
        assert_eq!(m.phase(), Phase::Ready);
        assert!(m.client().is_some());
        assert!(m.can_transfer());
        assert_eq!(m.token().raw_balance, None);
    }

    #[test]
    fn balance_failure_keeps_previous_value() {
        let mut m = ready(acct(1));
        let epoch = m.epoch();
        m.handle(Event::BalanceFetched {
            epoch,
            account: acct(1),
            result: Ok(U256::from(5)),
        });
        m.handle(Event::BalanceFetched {
            epoch,
            account: acct(1),
            result: Err(BridgeError::Query("timeout".into())),
        });
        assert_eq!(m.phase(), Phase::Ready);
        assert_eq!(m.token().raw_balance, Some(U256::from(5)));
        assert!(m.fault().is_none());
    }

    #[test]
    fn account_change_discards_stale_results() {
        let mut m = ready(acct(1));
        let old_epoch = m.epoch();

        let cmds = m.handle(Event::AccountsChanged(vec![acct(2)]));
        assert!(matches!(cmds.as_slice(), [Command::InitClient { .. }]));
        assert!(m.epoch() > old_epoch);
        assert!(m.client().is_none());
        assert_eq!(m.phase(), Phase::ClientInitializing);

        m.handle(Event::BalanceFetched {
            epoch: old_epoch,
            account: acct(1),
            result: Ok(U256::from(99)),
        });
        assert_eq!(m.token().raw_balance, None);

        // an init answer for the old account is no use either
        let cmds = m.handle(Event::ClientReady {
            epoch: old_epoch,
            client: client_for(acct(1)),
        });
        assert!(cmds.is_empty());
        assert_eq!(m.phase(), Phase::ClientInitializing);
    }

    #[test]
    fn same_account_reported_again_is_ignored() {
        let mut m = ready(acct(1));
        let epoch = m.epoch();
        assert!(m.handle(Event::AccountsChanged(vec![acct(1)])).is_empty());
        assert_eq!(m.epoch(), epoch);
        assert_eq!(m.phase(), Phase::Ready);
    }

    #[test]
    fn empty_accounts_clear_the_session() {
        let mut m = ready(acct(1));
        m.handle(Event::AccountsChanged(vec![]));
        assert_eq!(m.phase(), Phase::Disconnected);
        assert_eq!(m.session(), &Session::default());
        assert!(m.client().is_none());
    }

    #[test]
    fn transfer_refused_until_ready() {
        let mut m = machine();
        assert!(m.handle(Event::Transfer).is_empty());
        m.handle(Event::Connect);
        assert!(m.handle(Event::Transfer).is_empty());
        m.handle(Event::ConnectResolved(Ok((vec![acct(1)], None))));
        assert_eq!(m.phase(), Phase::ClientInitializing);
        assert!(m.handle(Event::Transfer).is_empty());
    }

    #[test]
    fn connect_ignored_while_busy() {
        let mut m = ready(acct(1));
        assert!(m.handle(Event::Connect).is_empty());
        assert_eq!(m.phase(), Phase::Ready);
    }

    #[test]
    fn rejected_submission_returns_to_ready_with_empty_result() {
        let mut m = ready(acct(1));
        let cmds = m.handle(Event::Transfer);
        assert!(matches!(cmds.as_slice(), [Command::SubmitTransfer { .. }]));
        assert_eq!(m.phase(), Phase::TransferPending);

        m.handle(Event::TransferSubmitted {
            epoch: m.epoch(),
            result: Err(BridgeError::InsufficientFunds("need 0.1, have 0".into())),
        });
        assert_eq!(m.phase(), Phase::Ready);
        assert!(m.transfer().is_empty());
        assert_eq!(m.fault().map(|f| f.kind), Some(ErrorKind::InsufficientFunds));
    }

    #[test]
    fn hash_then_receipt_confirms() {
        let mut m = ready(acct(1));
        m.handle(Event::Transfer);
        let hash = TxHash::repeat_byte(7);
        m.handle(Event::TransferSubmitted {
            epoch: m.epoch(),
            result: Ok(hash),
        });
        assert_eq!(m.phase(), Phase::TransferPending);
        assert_eq!(m.transfer().transaction_hash, Some(hash));
        assert!(m.transfer().receipt.is_none());

        m.handle(Event::TransferSettled {
            epoch: m.epoch(),
            result: Ok(TransferReceipt {
                transaction_hash: hash,
                block_number: Some(10),
                gas_used: 21_000,
                status: true,
            }),
        });
        assert_eq!(m.phase(), Phase::TransferConfirmed);
        assert!(m.can_transfer());
        assert_eq!(m.transfer().receipt.as_ref().map(|r| r.block_number), Some(Some(10)));
    }

    #[test]
    fn failed_receipt_keeps_hash() {
        let mut m = ready(acct(1));
        m.handle(Event::Transfer);
        let hash = TxHash::repeat_byte(9);
        m.handle(Event::TransferSubmitted {
            epoch: m.epoch(),
            result: Ok(hash),
        });
        m.handle(Event::TransferSettled {
            epoch: m.epoch(),
            result: Err(BridgeError::Submission("transaction reverted".into())),
        });
        assert_eq!(m.phase(), Phase::Ready);
        assert_eq!(m.transfer().transaction_hash, Some(hash));
        assert_eq!(m.fault().map(|f| f.kind), Some(ErrorKind::SubmissionError));
    }

    #[test]
    fn init_failure_is_recoverable_by_connecting() {
        let mut m = machine();
        m.handle(Event::Mount);
        m.handle(Event::AccountsListed(Ok((vec![acct(1)], None))));
        m.handle(Event::ClientFailed {
            epoch: m.epoch(),
            error: BridgeError::Initialization("unsupported".into()),
        });
        assert_eq!(m.phase(), Phase::Error { recoverable: true });
        assert_eq!(m.fault().map(|f| f.kind), Some(ErrorKind::InitializationError));
        assert!(!m.can_transfer());

        let cmds = m.handle(Event::Connect);
        assert!(matches!(cmds.as_slice(), [Command::RequestAccounts]));
        assert!(m.fault().is_none());
    }

    #[test]
    fn client_for_other_sender_is_refused() {
        let mut m = machine();
        m.handle(Event::Mount);
        m.handle(Event::AccountsListed(Ok((vec![acct(1)], None))));
        let cmds = m.handle(Event::ClientReady {
            epoch: m.epoch(),
            client: client_for(acct(2)),
        });
        assert!(cmds.is_empty());
        assert!(m.client().is_none());
    }

    #[test]
    fn wallet_error_on_mount_is_reported() {
        let mut m = machine();
        m.handle(Event::Mount);
        m.handle(Event::AccountsListed(Err(WalletError::NotAvailable(
            "connection refused".into(),
        ))));
        assert_eq!(m.phase(), Phase::Disconnected);
        assert_eq!(m.fault().map(|f| f.kind), Some(ErrorKind::WalletUnavailable));
    }

    /// Init failed for acct(1); the user presses connect again.
    fn reconnecting_after_init_failure() -> Machine {
        let mut m = machine();
        m.handle(Event::Mount);
        m.handle(Event::AccountsListed(Ok((vec![acct(1)], Some(80001)))));
        m.handle(Event::ClientFailed {
            epoch: m.epoch(),
            error: BridgeError::Initialization("unreachable".into()),
        });
        m.handle(Event::Connect);
        assert_eq!(m.phase(), Phase::Connecting);
        m
    }

    #[test]
    fn rejected_reconnect_clears_the_old_session() {
        let mut m = reconnecting_after_init_failure();
        let epoch = m.epoch();
        m.handle(Event::ConnectResolved(Err(WalletError::UserRejected)));

        assert_eq!(m.phase(), Phase::Disconnected);
        assert_eq!(m.session(), &Session::default());
        assert!(m.epoch() > epoch);
        assert_eq!(m.fault().map(|f| f.kind), Some(ErrorKind::UserRejected));
        assert!(matches!(
            m.handle(Event::Connect).as_slice(),
            [Command::RequestAccounts]
        ));
    }

    #[test]
    fn empty_reconnect_clears_the_old_session() {
        let mut m = reconnecting_after_init_failure();
        m.handle(Event::ConnectResolved(Ok((vec![], None))));

        assert_eq!(m.phase(), Phase::Disconnected);
        assert_eq!(m.session(), &Session::default());
        assert!(m.client().is_none());
        assert_eq!(m.token().raw_balance, None);
    }
}
