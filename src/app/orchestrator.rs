use {
    super::machine::{AccountList, Command, Event, Machine},
    super::state::TransferRequest,
    crate::libs::config::Config,
    crate::libs::wallet::WalletGateway,
    crate::libs::writing::cc,
    crate::log,
    alloy::primitives::Address,
    polybridge::{Bridge, InitConfig},
    std::{sync::Arc, time::Duration},
    tokio::{
        sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
        task::JoinHandle,
    },
    url::Url,
};

/// What travels back from spawned work.
#[derive(Debug)]
pub enum Msg {
    Event(Event),
    /// A spawned command finished and will send nothing more.
    Done,
}

/// Network half of [`InitConfig`]; the sender is filled per account.
#[derive(Debug, Clone)]
pub struct BridgeSettings {
    pub network: String,
    pub version: String,
    pub parent_rpc: Url,
    pub child_rpc: Url,
}

impl BridgeSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            network: cfg.network.clone(),
            version: cfg.version.clone(),
            parent_rpc: cfg.parent_rpc.clone(),
            child_rpc: cfg.child_rpc.clone(),
        }
    }

    pub fn init_config(&self, account: Address) -> InitConfig {
        InitConfig {
            network: self.network.clone(),
            version: self.version.clone(),
            parent_rpc: self.parent_rpc.clone(),
            child_rpc: self.child_rpc.clone(),
            default_sender: account,
        }
    }
}

/// Runs the [`Machine`]'s commands on tokio tasks and feeds their
/// outcomes back in, one event at a time.
pub struct Orchestrator<W, B> {
    machine: Machine,
    wallet: Arc<W>,
    bridge: Arc<B>,
    settings: BridgeSettings,
    tx: UnboundedSender<Msg>,
    rx: UnboundedReceiver<Msg>,
    in_flight: usize,
}

impl<W, B> Orchestrator<W, B>
where
    W: WalletGateway + 'static,
    B: Bridge + 'static,
{
    pub fn new(
        wallet: W,
        bridge: B,
        settings: BridgeSettings,
        request: TransferRequest,
        on_parent: bool,
    ) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            machine: Machine::new(request, on_parent),
            wallet: Arc::new(wallet),
            bridge: Arc::new(bridge),
            settings,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Apply an event and start whatever it asks for.
    pub fn dispatch(&mut self, event: Event) {
        for cmd in self.machine.handle(event) {
            self.spawn(cmd);
        }
    }

    /// Wait for the next message from spawned work and apply it. Returns
    /// `false` once the channel is closed.
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(msg) => {
                self.apply(msg);
                true
            }
            None => false,
        }
    }

    /// Drive until no spawned command is outstanding.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            if !self.step().await {
                break;
            }
        }
    }

    pub fn apply(&mut self, msg: Msg) {
        match msg {
            Msg::Event(event) => self.dispatch(event),
            Msg::Done => self.in_flight = self.in_flight.saturating_sub(1),
        }
    }

    /// Poll the wallet and report account or chain changes. Results go
    /// through the same queue as everything else.
    pub fn watch_wallet(&self, every: Duration) -> JoinHandle<()> {
        let wallet = self.wallet.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            let mut last_accounts: Option<Vec<Address>> = None;
            let mut last_chain: Option<u64> = None;
            loop {
                ticker.tick().await;
                if let Ok(accounts) = wallet.list_accounts().await {
                    if last_accounts.as_ref() != Some(&accounts) {
                        last_accounts = Some(accounts.clone());
                        if tx.send(Msg::Event(Event::AccountsChanged(accounts))).is_err() {
                            return;
                        }
                    }
                }
                if let Ok(chain) = wallet.current_chain_id().await {
                    if last_chain != Some(chain) {
                        last_chain = Some(chain);
                        if tx.send(Msg::Event(Event::ChainChanged(chain))).is_err() {
                            return;
                        }
                    }
                }
            }
        })
    }

    fn spawn(&mut self, cmd: Command) {
        let tx = self.tx.clone();
        self.in_flight += 1;
        match cmd {
            Command::ListAccounts => {
                let wallet = self.wallet.clone();
                tokio::spawn(async move {
                    let listed = wallet.list_accounts().await;
                    let res = with_chain(wallet.as_ref(), listed).await;
                    emit(&tx, Event::AccountsListed(res));
                    let _ = tx.send(Msg::Done);
                });
            }
            Command::RequestAccounts => {
                let wallet = self.wallet.clone();
                tokio::spawn(async move {
                    let requested = wallet.request_accounts().await;
                    let res = with_chain(wallet.as_ref(), requested).await;
                    emit(&tx, Event::ConnectResolved(res));
                    let _ = tx.send(Msg::Done);
                });
            }
            Command::InitClient { epoch, account } => {
                let bridge = self.bridge.clone();
                let config = self.settings.init_config(account);
                log!(
                    cc::CYAN,
                    "init client {}/{} for {} (epoch {})",
                    config.network,
                    config.version,
                    account,
                    epoch
                );
                tokio::spawn(async move {
                    let event = match bridge.init(&config).await {
                        Ok(client) => Event::ClientReady { epoch, client },
                        Err(error) => Event::ClientFailed { epoch, error },
                    };
                    emit(&tx, event);
                    let _ = tx.send(Msg::Done);
                });
            }
            Command::FetchBalance {
                epoch,
                account,
                client,
                token,
                on_parent,
            } => {
                tokio::spawn(async move {
                    let handle = client.erc20(token, on_parent);
                    let result = handle.get_balance(account).await;
                    emit(
                        &tx,
                        Event::BalanceFetched {
                            epoch,
                            account,
                            result,
                        },
                    );
                    let _ = tx.send(Msg::Done);
                });
            }
            Command::SubmitTransfer {
                epoch,
                client,
                request,
                on_parent,
            } => {
                tokio::spawn(async move {
                    let handle = client.erc20(request.token, on_parent);
                    match handle
                        .transfer(request.raw_amount(), request.recipient)
                        .await
                    {
                        Err(e) => emit(&tx, Event::TransferSubmitted { epoch, result: Err(e) }),
                        Ok(pending) => match pending.transaction_hash().await {
                            Err(e) => {
                                emit(&tx, Event::TransferSubmitted { epoch, result: Err(e) })
                            }
                            Ok(hash) => {
                                // hash is queued before the receipt is even awaited
                                emit(&tx, Event::TransferSubmitted { epoch, result: Ok(hash) });
                                let result = pending.receipt().await;
                                emit(&tx, Event::TransferSettled { epoch, result });
                            }
                        },
                    }
                    let _ = tx.send(Msg::Done);
                });
            }
        }
    }
}

fn emit(tx: &UnboundedSender<Msg>, event: Event) {
    let _ = tx.send(Msg::Event(event));
}

async fn with_chain<W: WalletGateway + ?Sized>(
    wallet: &W,
    accounts: Result<Vec<Address>, crate::libs::wallet::WalletError>,
) -> AccountList {
    let accounts = accounts?;
    if accounts.is_empty() {
        return Ok((accounts, None));
    }
    let chain_id = wallet.current_chain_id().await.ok();
    Ok((accounts, chain_id))
}
