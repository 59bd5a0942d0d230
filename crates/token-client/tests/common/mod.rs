//! In-process mock of a Solana JSON-RPC node.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chain_sol::transaction::decode_compact_u16;
use keystore::Keypair;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use token_client::{Config, TokenInteractor};

/// What the node answers to one JSON-RPC call.
pub enum Reply {
    Result(Value),
    Error { code: i64, message: String, data: Value },
    /// A bare HTTP status with a non-JSON body.
    Status(u16),
}

type Handler = dyn Fn(&str, &Value) -> Reply + Send + Sync;

pub struct MockNode {
    pub url: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockNode {
    /// Serve JSON-RPC on an ephemeral port, answering through `handler`.
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handler: Arc<Handler> = Arc::new(handler);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = requests.clone();
        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((socket, _)) => {
                        let handler = handler.clone();
                        let log = log.clone();
                        tokio::spawn(async move {
                            let _ = serve(socket, handler, log).await;
                        });
                    }
                    Err(_) => break,
                }
            }
        });

        Self {
            url: format!("http://{addr}"),
            requests,
        }
    }

    /// Every request body received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    /// The params of every call to `method`, in arrival order.
    pub fn calls(&self, method: &str) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|r| r["method"] == method)
            .map(|r| r["params"].clone())
            .collect()
    }

    /// A config pointing at this node with short polling intervals.
    pub fn config(&self) -> Config {
        Config {
            rpc_url: Some(self.url.clone()),
            rpc_timeout_secs: 5,
            confirm_timeout_secs: 1,
            confirm_poll_interval_ms: 20,
            demo_step_delay_ms: 0,
            ..Config::default()
        }
    }

    pub fn interactor(&self, wallet: Keypair) -> TokenInteractor {
        TokenInteractor::with_wallet(self.config(), wallet).unwrap()
    }
}

async fn serve(
    mut socket: TcpStream,
    handler: Arc<Handler>,
    log: Arc<Mutex<Vec<Value>>>,
) -> std::io::Result<()> {
    let body = read_request_body(&mut socket).await?;
    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    log.lock().unwrap().push(request.clone());

    let method = request["method"].as_str().unwrap_or_default();
    let id = request["id"].clone();

    let (status_line, body) = match handler(method, &request["params"]) {
        Reply::Result(result) => (
            "200 OK".to_string(),
            json!({ "jsonrpc": "2.0", "id": id, "result": result }).to_string(),
        ),
        Reply::Error {
            code,
            message,
            data,
        } => (
            "200 OK".to_string(),
            json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": code, "message": message, "data": data }
            })
            .to_string(),
        ),
        Reply::Status(code) => (format!("{code} Error"), "upstream unavailable".to_string()),
    };

    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await?;
    tokio::time::sleep(Duration::from_millis(10)).await;
    Ok(())
}

async fn read_request_body(socket: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(Vec::new());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Ok(buf[header_end..].to_vec())
}

// ---------------------------------------------------------------------------
// Canned results
// ---------------------------------------------------------------------------

pub const BLOCKHASH: [u8; 32] = [7u8; 32];

pub fn with_context(value: Value) -> Value {
    json!({ "context": { "slot": 42 }, "value": value })
}

pub fn latest_blockhash() -> Reply {
    Reply::Result(with_context(json!({
        "blockhash": chain_sol::bytes_to_address(&BLOCKHASH),
        "lastValidBlockHeight": 150,
    })))
}

pub fn status(level: &str) -> Reply {
    Reply::Result(with_context(json!([{
        "slot": 43,
        "confirmations": 0,
        "err": null,
        "confirmationStatus": level,
    }])))
}

pub fn token_amount(amount: u64, decimals: u8) -> Reply {
    Reply::Result(with_context(json!({
        "amount": amount.to_string(),
        "decimals": decimals,
        "uiAmount": amount as f64 / 10f64.powi(decimals as i32),
        "uiAmountString": amount.to_string(),
    })))
}

pub fn account_not_found() -> Reply {
    Reply::Error {
        code: -32602,
        message: "Invalid param: could not find account".into(),
        data: Value::Null,
    }
}

/// The base58 signature a node would report for a `sendTransaction` call.
pub fn signature_of(params: &Value) -> String {
    let wire = wire_of(params);
    chain_sol::signature_to_string(&chain_sol::transaction_signature(&wire).unwrap())
}

pub fn wire_of(params: &Value) -> Vec<u8> {
    bs58::decode(params[0].as_str().unwrap()).into_vec().unwrap()
}

// ---------------------------------------------------------------------------
// Wire decoding
// ---------------------------------------------------------------------------

/// A decoded single-instruction legacy transaction.
pub struct DecodedTx {
    pub signatures: Vec<[u8; 64]>,
    pub num_required_signatures: u8,
    pub account_keys: Vec<[u8; 32]>,
    pub recent_blockhash: [u8; 32],
    pub program_id: [u8; 32],
    /// Instruction accounts resolved to their keys.
    pub accounts: Vec<[u8; 32]>,
    pub data: Vec<u8>,
    pub message: Vec<u8>,
}

pub fn decode_tx(wire: &[u8]) -> DecodedTx {
    let (sig_count, mut pos) = decode_compact_u16(wire).unwrap();
    let mut signatures: Vec<[u8; 64]> = Vec::new();
    for _ in 0..sig_count {
        signatures.push(wire[pos..pos + 64].try_into().unwrap());
        pos += 64;
    }
    let message = wire[pos..].to_vec();

    let num_required_signatures = wire[pos];
    pos += 3;

    let (key_count, n) = decode_compact_u16(&wire[pos..]).unwrap();
    pos += n;
    let mut account_keys: Vec<[u8; 32]> = Vec::new();
    for _ in 0..key_count {
        account_keys.push(wire[pos..pos + 32].try_into().unwrap());
        pos += 32;
    }

    let recent_blockhash: [u8; 32] = wire[pos..pos + 32].try_into().unwrap();
    pos += 32;

    let (ix_count, n) = decode_compact_u16(&wire[pos..]).unwrap();
    assert_eq!(ix_count, 1, "expected a single instruction");
    pos += n;

    let program_id = account_keys[wire[pos] as usize];
    pos += 1;

    let (acc_count, n) = decode_compact_u16(&wire[pos..]).unwrap();
    pos += n;
    let accounts = wire[pos..pos + acc_count as usize]
        .iter()
        .map(|&i| account_keys[i as usize])
        .collect();
    pos += acc_count as usize;

    let (data_len, n) = decode_compact_u16(&wire[pos..]).unwrap();
    pos += n;
    let data = wire[pos..pos + data_len as usize].to_vec();

    DecodedTx {
        signatures,
        num_required_signatures,
        account_keys,
        recent_blockhash,
        program_id,
        accounts,
        data,
        message,
    }
}

impl DecodedTx {
    /// Every signature verifies against its signer slot.
    pub fn verify_signatures(&self) -> bool {
        use ed25519_dalek::{Signature, Verifier, VerifyingKey};

        self.signatures.iter().enumerate().all(|(i, sig)| {
            let key = VerifyingKey::from_bytes(&self.account_keys[i]).unwrap();
            key.verify(&self.message, &Signature::from_bytes(sig)).is_ok()
        })
    }

    pub fn amount(&self) -> u64 {
        u64::from_le_bytes(self.data[8..16].try_into().unwrap())
    }
}
