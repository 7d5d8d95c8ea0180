use {
    alloy::primitives::{Address, U256},
    anyhow::{Context, Result},
    dotenv::dotenv,
    polybridge::{units, Variant},
    serde::{Deserialize, Serialize},
    std::{fmt::Debug, str::FromStr},
    url::Url,
};

use crate::constants::{DEFAULT_RECIPIENT, DEFAULT_TOKEN, DEFAULT_WALLET_RPC};

pub fn load_env() {
    dotenv().ok();
}

/// Runtime configuration, read from the environment (and `.env`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON-RPC endpoint of the wallet (account list, signing).
    pub wallet_rpc: Url,
    pub bridge: Variant,
    pub network: String,
    pub version: String,
    pub parent_rpc: Url,
    pub child_rpc: Url,
    pub token_address: Address,
    pub token_decimals: u8,
    pub token_on_parent: bool,
    pub recipient: Address,
    /// Transfer amount in human units, e.g. `0.1`.
    pub amount: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        load_env();
        let wallet_rpc = parse_var::<Url>("WALLET_RPC", DEFAULT_WALLET_RPC)?;
        let parent_rpc = match std::env::var("PARENT_RPC") {
            Ok(s) => Url::parse(&s).with_context(|| format!("Failed to parse PARENT_RPC: {s}"))?,
            Err(_) => wallet_rpc.clone(),
        };
        let child_rpc = match std::env::var("CHILD_RPC") {
            Ok(s) => Url::parse(&s).with_context(|| format!("Failed to parse CHILD_RPC: {s}"))?,
            Err(_) => wallet_rpc.clone(),
        };
        let bridge = std::env::var("BRIDGE_VARIANT")
            .unwrap_or_else(|_| "pos".to_string())
            .parse::<Variant>()
            .map_err(anyhow::Error::msg)
            .context("BRIDGE_VARIANT")?;

        let cfg = Self {
            wallet_rpc,
            bridge,
            network: std::env::var("NETWORK").unwrap_or_else(|_| "testnet".to_string()),
            version: std::env::var("NETWORK_VERSION").unwrap_or_else(|_| "mumbai".to_string()),
            parent_rpc,
            child_rpc,
            token_address: parse_var::<Address>("TOKEN_ADDRESS", DEFAULT_TOKEN)?,
            token_decimals: Self::get_var_t("TOKEN_DECIMALS", 18u8),
            token_on_parent: Self::get_var_t("TOKEN_ON_PARENT", false),
            recipient: parse_var::<Address>("RECIPIENT", DEFAULT_RECIPIENT)?,
            amount: std::env::var("TRANSFER_AMOUNT").unwrap_or_else(|_| "0.1".to_string()),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings that would only fail later, at transfer time.
    pub fn validate(&self) -> Result<()> {
        self.bridge
            .resolve(&self.network, &self.version)
            .context("NETWORK / NETWORK_VERSION")?;
        let raw = self.raw_amount()?;
        if raw.is_zero() {
            anyhow::bail!("TRANSFER_AMOUNT must be > 0");
        }
        Ok(())
    }

    pub fn raw_amount(&self) -> Result<U256> {
        units::to_raw(&self.amount, self.token_decimals)
            .with_context(|| format!("TRANSFER_AMOUNT `{}`", self.amount))
    }

    /// Parse env var to T; fall back to typed default.
    pub fn get_var_t<T>(key: &str, default: T) -> T
    where
        T: FromStr,
        <T as FromStr>::Err: Debug,
    {
        std::env::var(key)
            .ok()
            .and_then(|s| s.parse::<T>().ok())
            .unwrap_or(default)
    }
}

/// Like [`Config::get_var_t`] but a present, malformed value is an error
/// instead of silently falling back.
fn parse_var<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Failed to parse {key}: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            wallet_rpc: DEFAULT_WALLET_RPC.parse().unwrap(),
            bridge: Variant::Pos,
            network: "testnet".into(),
            version: "mumbai".into(),
            parent_rpc: DEFAULT_WALLET_RPC.parse().unwrap(),
            child_rpc: DEFAULT_WALLET_RPC.parse().unwrap(),
            token_address: DEFAULT_TOKEN.parse().unwrap(),
            token_decimals: 18,
            token_on_parent: false,
            recipient: DEFAULT_RECIPIENT.parse().unwrap(),
            amount: "0.1".into(),
        }
    }

    #[test]
    fn defaults_describe_a_valid_deployment() {
        let cfg = sample();
        cfg.validate().unwrap();
        assert_eq!(cfg.raw_amount().unwrap(), U256::from(100_000_000_000_000_000u128));
    }

    #[test]
    fn rejects_zero_and_unsupported_settings() {
        let zero = Config {
            amount: "0.0".into(),
            ..sample()
        };
        assert!(zero.validate().is_err());

        let cross = Config {
            bridge: Variant::ZkEvm,
            ..sample()
        };
        assert!(cross.validate().is_err());

        let precise = Config {
            token_decimals: 2,
            amount: "0.001".into(),
            ..sample()
        };
        assert!(precise.validate().is_err());
    }

    #[test]
    fn typed_fallback_on_missing_var() {
        assert_eq!(Config::get_var_t("POLYDAPP_TEST_UNSET_KEY", 7u64), 7);
    }
}
