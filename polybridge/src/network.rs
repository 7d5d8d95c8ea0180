use std::fmt;
use std::str::FromStr;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;
use crate::{pos, zkevm};

/// Which bridge the client talks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Pos,
    ZkEvm,
}

impl Variant {
    pub fn networks(self) -> &'static [NetworkParams] {
        match self {
            Variant::Pos => pos::networks::NETWORKS,
            Variant::ZkEvm => zkevm::networks::NETWORKS,
        }
    }

    /// Look up the static parameters for a `network`/`version` pair.
    /// Matching ignores ASCII case.
    pub fn resolve(self, network: &str, version: &str) -> Result<&'static NetworkParams, BridgeError> {
        self.networks()
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(network) && p.version.eq_ignore_ascii_case(version))
            .ok_or_else(|| {
                BridgeError::Initialization(format!(
                    "unsupported {self} network `{network}/{version}`"
                ))
            })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Pos => f.write_str("pos"),
            Variant::ZkEvm => f.write_str("zkevm"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pos" | "proof-of-stake" => Ok(Variant::Pos),
            "zkevm" | "zk-evm" => Ok(Variant::ZkEvm),
            other => Err(format!("unknown bridge variant `{other}` (expected pos or zkevm)")),
        }
    }
}

/// Static description of one parent/child chain pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkParams {
    pub variant: Variant,
    pub name: &'static str,
    pub version: &'static str,
    pub parent_chain_id: u64,
    pub child_chain_id: u64,
    pub parent_label: &'static str,
    pub child_label: &'static str,
    /// Bridge contracts on either side. Plain token transfers to these
    /// are never credited, so handles refuse them as recipients.
    pub bridge_contracts: &'static [Address],
}

impl NetworkParams {
    pub fn chain_id(&self, is_parent: bool) -> u64 {
        if is_parent {
            self.parent_chain_id
        } else {
            self.child_chain_id
        }
    }

    pub fn label(&self, is_parent: bool) -> &'static str {
        if is_parent {
            self.parent_label
        } else {
            self.child_label
        }
    }
}
