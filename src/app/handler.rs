use {
    crate::app::{
        machine::Event as AppEvent,
        orchestrator::{BridgeSettings, Orchestrator},
        state::TransferRequest,
        view::{PrimaryAction, View},
    },
    crate::constants::{ACCOUNT_POLL_MS, MIN_TERMINAL_HEIGHT},
    crate::libs::config::Config,
    crate::libs::tui::{
        box_height, centered_rect, draw_box, draw_button, draw_main_window, draw_modal,
        draw_status, draw_title_bar, BoxProps,
    },
    crate::libs::wallet::RpcWallet,
    crate::libs::writing::cc,
    crate::log,
    anyhow::{Context, Result},
    crossterm::{
        event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    futures_util::StreamExt,
    polybridge::{NetworkParams, Variant},
    ratatui::prelude::*,
    std::time::Duration,
};

pub async fn init() -> Result<()> {
    let cfg = Config::from_env()?;
    let network = cfg
        .bridge
        .resolve(&cfg.network, &cfg.version)
        .context("bridge network")?;
    let request = TransferRequest::new(
        &cfg.amount,
        cfg.token_address,
        cfg.recipient,
        cfg.token_decimals,
    )
    .context("TRANSFER_AMOUNT")?;
    let wallet = RpcWallet::new(cfg.wallet_rpc.clone());
    log!(
        cc::LIGHT_GREEN,
        "starting: {} {}/{} wallet {}",
        cfg.bridge,
        cfg.network,
        cfg.version,
        wallet.url()
    );

    let orchestrator = Orchestrator::new(
        wallet,
        cfg.bridge,
        BridgeSettings::from_config(&cfg),
        request,
        cfg.token_on_parent,
    );
    let mut app = DappTUI::new(orchestrator, network);
    app.run_tui().await
}

pub struct DappTUI {
    orchestrator: Orchestrator<RpcWallet, Variant>,
    network: &'static NetworkParams,
}

impl DappTUI {
    pub fn new(
        orchestrator: Orchestrator<RpcWallet, Variant>,
        network: &'static NetworkParams,
    ) -> Self {
        Self {
            orchestrator,
            network,
        }
    }

    async fn run_tui(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;

        let res = self.event_loop(&mut terminal).await;

        let mut stdout = std::io::stdout();
        execute!(stdout, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        res
    }

    async fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(Duration::from_millis(250));
        let watch = self
            .orchestrator
            .watch_wallet(Duration::from_millis(*ACCOUNT_POLL_MS));

        self.orchestrator.dispatch(AppEvent::Mount);

        let mut should_quit = false;
        while !should_quit {
            let view = View::of(self.orchestrator.machine(), self.network);
            terminal.draw(|f| draw(f, &view))?;

            tokio::select! {
                maybe_ev = events.next() => {
                    match maybe_ev {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            match key.code {
                                KeyCode::Char('q') | KeyCode::Esc => should_quit = true,
                                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                                    should_quit = true;
                                }
                                KeyCode::Char('c') => self.orchestrator.dispatch(AppEvent::Connect),
                                KeyCode::Char('t') => self.orchestrator.dispatch(AppEvent::Transfer),
                                KeyCode::Enter => {
                                    let event = match view.action {
                                        PrimaryAction::Connect => AppEvent::Connect,
                                        PrimaryAction::Transfer { .. } => AppEvent::Transfer,
                                    };
                                    self.orchestrator.dispatch(event);
                                }
                                _ => {}
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => log!(cc::RED, "terminal event error: {}", e),
                        None => should_quit = true,
                    }
                }
                alive = self.orchestrator.step() => {
                    if !alive {
                        should_quit = true;
                    }
                }
                _ = tokio::signal::ctrl_c() => should_quit = true,
                _ = ticker.tick() => {}
            }
        }

        watch.abort();
        log!(cc::LIGHT_GRAY, "shutting down");
        Ok(())
    }
}

fn draw(f: &mut Frame, view: &View) {
    let size = f.area();
    draw_main_window(f, size);
    if size.height < *MIN_TERMINAL_HEIGHT {
        let area = centered_rect(70, 40, size);
        let lines = [
            "Terminal too small to render UI.".to_string(),
            format!("Minimum height required: {} rows.", *MIN_TERMINAL_HEIGHT),
            "Please resize your terminal window.".to_string(),
        ];
        draw_modal(f, area, "Resize Needed", &lines);
        return;
    }

    let inner = Rect {
        x: size.x + 1,
        y: size.y + 1,
        width: size.width.saturating_sub(2),
        height: size.height.saturating_sub(2),
    };
    draw_title_bar(f, inner, "polydapp", &view.headline(), "c: connect  t: transfer  q: quit");

    let account_rows = [
        ("chain id", view.chain_id.clone()),
        ("account", view.account.clone()),
    ];
    let token_rows = [
        ("token", view.token.clone()),
        ("balance", view.balance.clone()),
    ];
    let mut tx_rows = vec![
        ("recipient", view.recipient.clone()),
        ("amount", view.amount.clone()),
        ("tx hash", view.tx_hash.clone()),
    ];
    for (i, line) in view.receipt.iter().enumerate() {
        tx_rows.push((if i == 0 { "receipt" } else { "" }, line.clone()));
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(box_height(account_rows.len())),
            Constraint::Length(box_height(token_rows.len())),
            Constraint::Length(box_height(tx_rows.len())),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(Rect {
            y: inner.y + 3,
            height: inner.height.saturating_sub(3),
            ..inner
        });

    let button_area = centered_rect(40, 100, rows[0]);
    draw_button(
        f,
        button_area,
        view.action.label(),
        view.action.key(),
        view.action.enabled(),
    );
    f.render_widget(
        ratatui::widgets::Paragraph::new(Span::styled(
            view.network.as_str(),
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center),
        rows[1],
    );
    draw_box(f, rows[2], &account_rows, &BoxProps::titled("Account Details"));
    draw_box(f, rows[3], &token_rows, &BoxProps::titled("Token Details"));
    draw_box(f, rows[4], &tx_rows, &BoxProps::titled("Transaction Details"));
    draw_status(f, rows[6], &view.phase, view.error.as_deref(), view.healthy);
}
