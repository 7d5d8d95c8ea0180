//! The [`BridgeClient`] behind both bridge variants. Proof-of-stake and
//! zk-EVM only differ in their network tables ([`crate::pos::networks`],
//! [`crate::zkevm::networks`]).

use std::fmt;

use alloy::primitives::Address;

use crate::client::{BridgeClient, InitConfig, TokenHandle};
use crate::endpoints::Endpoints;
use crate::erc20::Erc20Handle;
use crate::error::BridgeError;
use crate::log;
use crate::network::{NetworkParams, Variant};
use crate::writing::cc;

#[derive(Clone)]
pub struct PolygonClient {
    params: &'static NetworkParams,
    sender: Address,
    endpoints: Endpoints,
}

impl PolygonClient {
    pub async fn init(variant: Variant, config: &InitConfig) -> Result<Self, BridgeError> {
        let params = variant.resolve(&config.network, &config.version)?;
        let endpoints = Endpoints::connect(params, config).await?;
        log!(
            cc::LIGHT_GREEN,
            "[{}] client ready on {}/{} for {}",
            variant,
            params.name,
            params.version,
            config.default_sender
        );
        Ok(Self {
            params,
            sender: config.default_sender,
            endpoints,
        })
    }
}

impl fmt::Debug for PolygonClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolygonClient")
            .field("variant", &self.params.variant)
            .field("network", &self.params.name)
            .field("version", &self.params.version)
            .field("sender", &self.sender)
            .finish()
    }
}

impl BridgeClient for PolygonClient {
    fn network(&self) -> &NetworkParams {
        self.params
    }

    fn sender(&self) -> Address {
        self.sender
    }

    fn erc20(&self, token: Address, is_parent: bool) -> Box<dyn TokenHandle> {
        Box::new(Erc20Handle::new(
            token,
            self.endpoints.side(is_parent).clone(),
            self.sender,
            self.params.label(is_parent),
            self.params.bridge_contracts,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Bridge;
    use crate::testnode::{SENT_HASH, Script, ScriptedNode};
    use alloy::primitives::{U256, address};
    use alloy::providers::{Provider, ProviderBuilder};
    use std::sync::Arc;

    const SENDER: Address = address!("2254e4d1b41f2dd3969a79b994e6ee8c3c6f2c71");
    const TOKEN: Address = address!("fe4f5145f6e09952a5ba9e956ed0c25e3fa4c7f1");
    const RECIPIENT: Address = address!("2222222222222222222222222222222222222222");

    // Nothing listens on the discard port, so connects fail fast.
    const DEAD: &str = "http://127.0.0.1:9";

    fn config(network: &str, version: &str, rpc: &str) -> InitConfig {
        InitConfig {
            network: network.into(),
            version: version.into(),
            parent_rpc: rpc.parse().unwrap(),
            child_rpc: rpc.parse().unwrap(),
            default_sender: SENDER,
        }
    }

    async fn client_on(script: Script) -> (ScriptedNode, Arc<dyn BridgeClient>) {
        let node = ScriptedNode::start(script).await;
        let client = Variant::Pos
            .init(&config("testnet", "mumbai", node.url.as_str()))
            .await
            .unwrap();
        (node, client)
    }

    #[tokio::test]
    async fn unreachable_providers_fail_initialization() {
        let err = PolygonClient::init(Variant::Pos, &config("testnet", "mumbai", DEAD))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Initialization(ref m) if m.contains("Goerli")));
    }

    #[tokio::test]
    async fn unsupported_version_fails_before_any_network_call() {
        let err = PolygonClient::init(Variant::Pos, &config("testnet", "cherry", DEAD))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Initialization(ref m) if m.contains("unsupported")));
    }

    #[tokio::test]
    async fn variant_dispatch_reaches_the_zkevm_table() {
        let err = Variant::ZkEvm
            .init(&config("testnet", "mumbai", DEAD))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Initialization(ref m) if m.contains("zkevm")));

        let err = Variant::ZkEvm
            .init(&config("testnet", "cardona", DEAD))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Initialization(ref m) if m.contains("Sepolia")));
    }

    #[tokio::test]
    async fn repeated_init_yields_equivalent_clients() {
        let node = ScriptedNode::start(Script {
            balance: 7,
            ..Script::default()
        })
        .await;
        let cfg = config("testnet", "mumbai", node.url.as_str());

        let a = Variant::Pos.init(&cfg).await.unwrap();
        let b = Variant::Pos.init(&cfg).await.unwrap();

        assert_eq!(a.network(), b.network());
        assert_eq!(a.sender(), b.sender());
        let (ha, hb) = (a.erc20(TOKEN, false), b.erc20(TOKEN, false));
        assert_eq!(ha.address(), hb.address());
        assert_eq!(
            ha.get_balance(SENDER).await.unwrap(),
            hb.get_balance(SENDER).await.unwrap()
        );
        // both sides checked on each init
        assert!(node.calls_to("eth_chainId").len() >= 4);
    }

    #[tokio::test]
    async fn balance_comes_from_balance_of_call() {
        let (node, client) = client_on(Script {
            balance: 1_500_000_000_000_000_000,
            ..Script::default()
        })
        .await;
        let raw = client.erc20(TOKEN, false).get_balance(SENDER).await.unwrap();
        assert_eq!(raw, U256::from(1_500_000_000_000_000_000u128));

        let calls = node.calls_to("eth_call");
        let to: Address = calls[0][0]["to"].as_str().unwrap().parse().unwrap();
        assert_eq!(to, TOKEN);
    }

    #[tokio::test]
    async fn transfer_sends_from_sender_then_confirms() {
        let (node, client) = client_on(Script {
            balance: 1_000,
            ..Script::default()
        })
        .await;
        let pending = client
            .erc20(TOKEN, false)
            .transfer(U256::from(400u64), RECIPIENT)
            .await
            .unwrap();
        assert_eq!(pending.transaction_hash().await.unwrap(), SENT_HASH);

        let sent = node.calls_to("eth_sendTransaction");
        assert_eq!(sent.len(), 1);
        let from: Address = sent[0][0]["from"].as_str().unwrap().parse().unwrap();
        let to: Address = sent[0][0]["to"].as_str().unwrap().parse().unwrap();
        assert_eq!((from, to), (SENDER, TOKEN));

        let receipt = pending.receipt().await.unwrap();
        assert_eq!(receipt.transaction_hash, SENT_HASH);
        assert_eq!(receipt.block_number, Some(42));
        assert_eq!(receipt.gas_used, 0x8707);
        assert!(receipt.status);
    }

    #[tokio::test]
    async fn reverted_receipt_is_a_submission_error() {
        let (_node, client) = client_on(Script {
            balance: 1_000,
            receipt_status: false,
            ..Script::default()
        })
        .await;
        let pending = client
            .erc20(TOKEN, false)
            .transfer(U256::from(1u64), RECIPIENT)
            .await
            .unwrap();
        let err = pending.receipt().await.unwrap_err();
        assert!(matches!(err, BridgeError::Submission(ref m) if m.contains("reverted")));
    }

    #[tokio::test]
    async fn short_balance_is_refused_before_sending() {
        let (node, client) = client_on(Script {
            balance: 5,
            ..Script::default()
        })
        .await;
        let err = client
            .erc20(TOKEN, false)
            .transfer(U256::from(6u64), RECIPIENT)
            .await
            .err();
        assert!(matches!(err, Some(BridgeError::InsufficientFunds(_))));
        assert!(node.calls_to("eth_sendTransaction").is_empty());
    }

    #[tokio::test]
    async fn node_rejection_for_gas_funds_is_insufficient_funds() {
        let (_node, client) = client_on(Script {
            balance: 1_000,
            send_error: Some("insufficient funds for gas * price + value"),
            ..Script::default()
        })
        .await;
        let err = client
            .erc20(TOKEN, false)
            .transfer(U256::from(1u64), RECIPIENT)
            .await
            .err();
        assert!(matches!(err, Some(BridgeError::InsufficientFunds(_))));
    }

    #[tokio::test]
    async fn handles_refuse_bridge_contracts_as_recipients() {
        let params = Variant::Pos.resolve("mainnet", "v1").unwrap();
        let provider = ProviderBuilder::new()
            .connect_http(DEAD.parse().unwrap())
            .erased();
        let handle = Erc20Handle::new(
            TOKEN,
            provider,
            Address::repeat_byte(0x11),
            params.parent_label,
            params.bridge_contracts,
        );

        for bad in [Address::ZERO, TOKEN, params.bridge_contracts[0]] {
            let err = handle.transfer(U256::from(1u64), bad).await.err();
            assert_eq!(
                err.map(|e| e.to_string()),
                Some(BridgeError::InvalidRecipient(bad).to_string())
            );
        }

        // A valid recipient gets past the checks and fails on the dead node.
        let err = handle.transfer(U256::from(1u64), RECIPIENT).await.err();
        assert!(matches!(err, Some(BridgeError::Submission(_))));
    }
}
