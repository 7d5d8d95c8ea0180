//! In-process JSON-RPC node answering the calls a client makes for init,
//! balance reads, transfers and receipts.

use std::sync::{Arc, Mutex};

use alloy::primitives::TxHash;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

pub const SENT_HASH: TxHash = TxHash::repeat_byte(0xab);

#[derive(Debug, Clone)]
pub struct Script {
    pub chain_id: u64,
    /// Returned for every `balanceOf`.
    pub balance: u128,
    pub receipt_status: bool,
    /// JSON-RPC error message for `eth_sendTransaction`.
    pub send_error: Option<&'static str>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            chain_id: 80001,
            balance: 0,
            receipt_status: true,
            send_error: None,
        }
    }
}

pub struct ScriptedNode {
    pub url: Url,
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl ScriptedNode {
    pub async fn start(script: Script) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap())
            .parse()
            .unwrap();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = calls.clone();
        tokio::spawn(async move {
            loop {
                let Ok((sock, _)) = listener.accept().await else {
                    return;
                };
                tokio::spawn(serve(sock, script.clone(), seen.clone()));
            }
        });
        Self { url, calls }
    }

    /// Params of every call to `method`, in arrival order.
    pub fn calls_to(&self, method: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

async fn serve(mut sock: TcpStream, script: Script, calls: Arc<Mutex<Vec<(String, Value)>>>) {
    let Some(body) = read_body(&mut sock).await else {
        return;
    };
    let Ok(request) = serde_json::from_slice::<Value>(&body) else {
        return;
    };
    let reply = match &request {
        Value::Array(batch) => Value::Array(batch.iter().map(|r| answer(&script, &calls, r)).collect()),
        single => answer(&script, &calls, single),
    };
    let body = reply.to_string();
    let http = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let _ = sock.write_all(http.as_bytes()).await;
    let _ = sock.shutdown().await;
}

async fn read_body(sock: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = sock.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let len = text[..end]
                .lines()
                .find_map(|l| {
                    let (k, v) = l.split_once(':')?;
                    k.eq_ignore_ascii_case("content-length")
                        .then(|| v.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + len {
                return Some(buf[end + 4..end + 4 + len].to_vec());
            }
        }
    }
}

fn answer(script: &Script, calls: &Mutex<Vec<(String, Value)>>, req: &Value) -> Value {
    let id = req.get("id").cloned().unwrap_or(Value::Null);
    let method = req.get("method").and_then(Value::as_str).unwrap_or_default();
    let params = req.get("params").cloned().unwrap_or(Value::Null);
    calls.lock().unwrap().push((method.to_string(), params));

    let result = match method {
        "eth_chainId" => json!(format!("0x{:x}", script.chain_id)),
        "eth_call" => json!(format!("0x{:064x}", script.balance)),
        "eth_blockNumber" => json!("0x2a"),
        "eth_getTransactionCount" => json!("0x0"),
        "eth_estimateGas" => json!("0x8707"),
        "eth_gasPrice" | "eth_maxPriorityFeePerGas" => json!("0x3b9aca00"),
        "eth_feeHistory" => json!({
            "oldestBlock": "0x20",
            "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00"],
            "gasUsedRatio": [0.5],
            "reward": [["0x3b9aca00"]],
        }),
        "eth_sendTransaction" => match script.send_error {
            Some(message) => return error(id, -32000, message),
            None => json!(SENT_HASH),
        },
        "eth_getTransactionReceipt" => receipt(script.receipt_status),
        _ => return error(id, -32601, "method not found"),
    };
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

fn error(id: Value, code: i64, message: &str) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
}

fn receipt(ok: bool) -> Value {
    json!({
        "transactionHash": SENT_HASH,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "11".repeat(32)),
        "blockNumber": "0x2a",
        "from": format!("0x{}", "22".repeat(20)),
        "to": format!("0x{}", "33".repeat(20)),
        "cumulativeGasUsed": "0x8707",
        "gasUsed": "0x8707",
        "effectiveGasPrice": "0x3b9aca00",
        "contractAddress": null,
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "status": if ok { "0x1" } else { "0x0" },
        "type": "0x2",
    })
}
