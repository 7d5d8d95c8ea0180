use {
    super::{WalletError, WalletGateway},
    alloy::primitives::Address,
    async_trait::async_trait,
    reqwest::Client as HttpClient,
    serde_json::Value,
    url::Url,
};

/// EIP-1193 "user rejected request".
pub const USER_REJECTED: i64 = 4001;
/// JSON-RPC "method not found".
pub const METHOD_NOT_FOUND: i64 = -32601;

/// A wallet reached over HTTP JSON-RPC, such as a desktop signer
/// (Frame) or a dev node with unlocked accounts. Signing happens on the
/// wallet side; this type only enumerates accounts and reads the chain.
#[derive(Clone, Debug)]
pub struct RpcWallet {
    rpc_url: Url,
    http: HttpClient,
}

impl RpcWallet {
    pub fn new(rpc_url: Url) -> Self {
        Self {
            rpc_url,
            http: HttpClient::new(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.rpc_url
    }

    async fn rpc(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let res = self
            .http
            .post(self.rpc_url.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::NotAvailable(format!("{}: {e}", self.rpc_url)))?;
        let status = res.status();
        let bytes = res
            .bytes()
            .await
            .map_err(|e| WalletError::NotAvailable(format!("{}: {e}", self.rpc_url)))?;

        let v: Value = match serde_json::from_slice(&bytes) {
            Ok(json) => json,
            Err(e) => {
                let sample = String::from_utf8_lossy(&bytes);
                let hint = if sample.trim_start().starts_with('<') {
                    "response looks like HTML; WALLET_RPC should be a JSON-RPC endpoint"
                } else if sample.trim().is_empty() {
                    "empty body; is the wallet running?"
                } else {
                    "non-JSON response"
                };
                return Err(WalletError::NotAvailable(format!(
                    "{} ({status}): {e}; {hint}",
                    self.rpc_url
                )));
            }
        };
        if let Some(err) = v.get("error") {
            return Err(classify_rpc_error(err));
        }
        Ok(v.get("result").cloned().unwrap_or(Value::Null))
    }
}

#[async_trait]
impl WalletGateway for RpcWallet {
    async fn list_accounts(&self) -> Result<Vec<Address>, WalletError> {
        parse_accounts(self.rpc("eth_accounts", serde_json::json!([])).await?)
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        match self.rpc("eth_requestAccounts", serde_json::json!([])).await {
            // dev nodes have no interactive flow; their accounts are pre-authorized
            Err(WalletError::Rpc { code, .. }) if code == METHOD_NOT_FOUND => {
                self.list_accounts().await
            }
            other => parse_accounts(other?),
        }
    }

    async fn current_chain_id(&self) -> Result<u64, WalletError> {
        let res = self.rpc("eth_chainId", serde_json::json!([])).await?;
        parse_chain_id(&res)
    }
}

fn classify_rpc_error(err: &Value) -> WalletError {
    let code = err.get("code").and_then(Value::as_i64).unwrap_or(0);
    if code == USER_REJECTED {
        return WalletError::UserRejected;
    }
    let message = err
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    WalletError::Rpc { code, message }
}

fn parse_accounts(v: Value) -> Result<Vec<Address>, WalletError> {
    let Value::Array(items) = v else {
        return Err(malformed(format!("accounts not an array: {v}")));
    };
    items
        .iter()
        .map(|item| {
            item.as_str()
                .and_then(|s| s.parse::<Address>().ok())
                .ok_or_else(|| malformed(format!("bad account entry: {item}")))
        })
        .collect()
}

fn parse_chain_id(v: &Value) -> Result<u64, WalletError> {
    let raw = v
        .as_str()
        .ok_or_else(|| malformed(format!("chainId not a string: {v}")))?;
    let digits = raw.trim_start_matches("0x");
    let padded = if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits.to_string()
    };
    let bytes =
        hex::decode(&padded).map_err(|e| malformed(format!("bad chainId `{raw}`: {e}")))?;
    if bytes.is_empty() || bytes.len() > 8 {
        return Err(malformed(format!("bad chainId `{raw}`")));
    }
    let mut be = [0u8; 8];
    be[8 - bytes.len()..].copy_from_slice(&bytes);
    Ok(u64::from_be_bytes(be))
}

fn malformed(message: String) -> WalletError {
    WalletError::Rpc { code: 0, message }
}
