//! Render-ready snapshot of the [`Machine`]. Everything the terminal shows
//! comes from here, so it can be checked without a terminal.

use {
    super::{machine::Machine, state::Phase},
    polybridge::NetworkParams,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    Connect,
    Transfer { enabled: bool },
}

impl PrimaryAction {
    pub fn label(&self) -> &'static str {
        match self {
            PrimaryAction::Connect => "Connect Wallet",
            PrimaryAction::Transfer { .. } => "Transfer Token",
        }
    }

    pub fn key(&self) -> char {
        match self {
            PrimaryAction::Connect => 'c',
            PrimaryAction::Transfer { .. } => 't',
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            PrimaryAction::Connect => true,
            PrimaryAction::Transfer { enabled } => *enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub network: String,
    pub action: PrimaryAction,
    pub chain_id: String,
    pub account: String,
    pub token: String,
    pub balance: String,
    pub recipient: String,
    pub amount: String,
    pub tx_hash: String,
    pub receipt: Vec<String>,
    pub phase: String,
    pub healthy: bool,
    pub error: Option<String>,
}

const BLANK: &str = "-";

impl View {
    pub fn of(m: &Machine, network: &NetworkParams) -> Self {
        let session = m.session();
        let action = match session.account {
            None => PrimaryAction::Connect,
            Some(_) if matches!(m.phase(), Phase::Error { recoverable: true }) => {
                PrimaryAction::Connect
            }
            Some(_) => PrimaryAction::Transfer {
                enabled: m.can_transfer(),
            },
        };

        let receipt = match &m.transfer().receipt {
            Some(r) => vec![
                format!(
                    "block  {}",
                    r.block_number.map(|b| b.to_string()).unwrap_or_else(|| BLANK.into())
                ),
                format!("gas    {}", r.gas_used),
                format!("status {}", if r.status { "success" } else { "reverted" }),
            ],
            None if m.phase() == Phase::TransferPending
                && m.transfer().transaction_hash.is_some() =>
            {
                vec!["waiting for receipt…".into()]
            }
            None => vec![],
        };

        Self {
            network: network_note(network),
            action,
            chain_id: session
                .chain_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| BLANK.into()),
            account: session
                .account
                .map(|a| a.to_string())
                .unwrap_or_else(|| BLANK.into()),
            token: m.token().token.to_string(),
            balance: m.token().display_balance().unwrap_or_else(|| BLANK.into()),
            recipient: m.request().recipient.to_string(),
            amount: m.request().amount.clone(),
            tx_hash: m
                .transfer()
                .transaction_hash
                .map(|h| h.to_string())
                .unwrap_or_else(|| BLANK.into()),
            receipt,
            phase: m.phase().label().to_string(),
            healthy: m.fault().is_none() && !matches!(m.phase(), Phase::Error { .. }),
            error: m.fault().map(|f| f.to_string()),
        }
    }

    /// One line for the title bar.
    pub fn headline(&self) -> String {
        format!(
            "{}  •  {}  •  {}",
            self.network,
            short_addr(&self.account),
            self.balance
        )
    }
}

fn network_note(p: &NetworkParams) -> String {
    format!(
        "{} {}/{}: {} ({}) ↔ {} ({})",
        p.variant,
        p.name,
        p.version,
        p.parent_label,
        p.parent_chain_id,
        p.child_label,
        p.child_chain_id
    )
}

pub fn short_addr(addr: &str) -> String {
    if addr.len() > 12 {
        let (a, b) = addr.split_at(6);
        let tail = &b[b.len().saturating_sub(4)..];
        format!("{}…{}", a, tail)
    } else {
        addr.to_string()
    }
}
