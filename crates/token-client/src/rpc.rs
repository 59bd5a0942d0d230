//! JSON-RPC client for a Solana node.
//!
//! # Responsibilities
//! - Fetch a recent blockhash and submit signed transactions
//! - Wait for a submitted transaction to reach the configured commitment
//! - Query native and token account balances
//!
//! A failed request is returned to the caller as is. Polling a signature's
//! status is the only repeated call, and it stops at the first transport
//! error.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::time::{sleep, Instant};

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::types::{Commitment, TokenBalance};

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

/// Most read methods wrap their value as `{ context: { slot }, value }`.
#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestBlockhash {
    blockhash: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    pub slot: u64,
    /// `None` once the transaction is rooted.
    pub confirmations: Option<u64>,
    pub err: Option<Value>,
    pub confirmation_status: Option<Commitment>,
}

impl SignatureStatus {
    /// The commitment level this status has reached.
    pub fn reached(&self) -> Commitment {
        match (self.confirmation_status, self.confirmations) {
            (Some(level), _) => level,
            (None, None) => Commitment::Finalized,
            (None, Some(_)) => Commitment::Processed,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UiTokenAmount {
    amount: String,
    decimals: u8,
}

/// Thin JSON-RPC client bound to one endpoint and commitment level.
#[derive(Debug)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    commitment: Commitment,
    confirm_timeout: Duration,
    poll_interval: Duration,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(config: &Config) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.rpc_timeout())
            .build()?;

        Ok(Self {
            http,
            url: config.rpc_url().to_string(),
            commitment: config.commitment,
            confirm_timeout: config.confirm_timeout(),
            poll_interval: config.confirm_poll_interval(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn commitment(&self) -> Commitment {
        self.commitment
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> ClientResult<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        tracing::debug!(method, id = request.id, "rpc request");

        let response = self.http.post(&self.url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let parsed: RpcResponse<T> = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                ClientError::InvalidResponse {
                    method: method.to_string(),
                    reason: e.to_string(),
                }
            } else {
                ClientError::HttpStatus {
                    method: method.to_string(),
                    status: status.as_u16(),
                }
            }
        })?;

        if let Some(error) = parsed.error {
            log_program_logs(method, error.data.as_ref());
            return Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        parsed.result.ok_or_else(|| ClientError::InvalidResponse {
            method: method.to_string(),
            reason: "response has neither result nor error".into(),
        })
    }

    fn commitment_param(&self) -> Value {
        json!({ "commitment": self.commitment.as_str() })
    }

    pub async fn get_latest_blockhash(&self) -> ClientResult<[u8; 32]> {
        let response: WithContext<LatestBlockhash> = self
            .call("getLatestBlockhash", json!([self.commitment_param()]))
            .await?;

        chain_sol::address_to_bytes(&response.value.blockhash).map_err(|e| {
            ClientError::InvalidResponse {
                method: "getLatestBlockhash".into(),
                reason: e.to_string(),
            }
        })
    }

    /// Submit a signed transaction; returns the signature the node reports.
    pub async fn send_transaction(&self, wire: &[u8]) -> ClientResult<String> {
        let encoded = bs58::encode(wire).into_string();
        self.call(
            "sendTransaction",
            json!([
                encoded,
                {
                    "encoding": "base58",
                    "preflightCommitment": self.commitment.as_str(),
                }
            ]),
        )
        .await
    }

    pub async fn get_signature_status(&self, signature: &str) -> ClientResult<Option<SignatureStatus>> {
        let response: WithContext<Vec<Option<SignatureStatus>>> = self
            .call("getSignatureStatuses", json!([[signature]]))
            .await?;
        Ok(response.value.into_iter().next().flatten())
    }

    /// Poll until `signature` reaches the configured commitment.
    pub async fn confirm_transaction(&self, signature: &str) -> ClientResult<()> {
        let deadline = Instant::now() + self.confirm_timeout;

        loop {
            if let Some(status) = self.get_signature_status(signature).await? {
                if let Some(err) = &status.err {
                    return Err(ClientError::TransactionFailed {
                        signature: signature.to_string(),
                        reason: err.to_string(),
                    });
                }
                if status.reached() >= self.commitment {
                    tracing::debug!(signature, slot = status.slot, "transaction confirmed");
                    return Ok(());
                }
            }

            if Instant::now() + self.poll_interval > deadline {
                return Err(ClientError::ConfirmationTimeout {
                    signature: signature.to_string(),
                    timeout_secs: self.confirm_timeout.as_secs(),
                });
            }
            sleep(self.poll_interval).await;
        }
    }

    /// Submit `wire` and wait for confirmation.
    pub async fn send_and_confirm_transaction(&self, wire: &[u8]) -> ClientResult<String> {
        let expected = chain_sol::signature_to_string(&chain_sol::transaction_signature(wire)?);
        let signature = self.send_transaction(wire).await?;
        if signature != expected {
            tracing::warn!(%expected, reported = %signature, "node reported an unexpected signature");
        }
        tracing::info!(%signature, "transaction submitted");

        self.confirm_transaction(&signature).await?;
        Ok(signature)
    }

    /// Native balance in lamports.
    pub async fn get_balance(&self, address: &[u8; 32]) -> ClientResult<u64> {
        let response: WithContext<u64> = self
            .call(
                "getBalance",
                json!([chain_sol::bytes_to_address(address), self.commitment_param()]),
            )
            .await?;
        Ok(response.value)
    }

    pub async fn get_token_account_balance(&self, account: &[u8; 32]) -> ClientResult<TokenBalance> {
        let response: WithContext<UiTokenAmount> = self
            .call(
                "getTokenAccountBalance",
                json!([chain_sol::bytes_to_address(account), self.commitment_param()]),
            )
            .await?;

        let amount = response.value.amount.parse().map_err(|e| ClientError::InvalidResponse {
            method: "getTokenAccountBalance".into(),
            reason: format!("amount '{}': {e}", response.value.amount),
        })?;

        Ok(TokenBalance {
            amount,
            decimals: response.value.decimals,
        })
    }
}

/// Preflight failures carry the program's log lines in `error.data.logs`.
fn log_program_logs(method: &str, data: Option<&Value>) {
    let Some(logs) = data.and_then(|d| d.get("logs")).and_then(Value::as_array) else {
        return;
    };
    for line in logs.iter().filter_map(Value::as_str) {
        tracing::warn!(method, "program log: {line}");
    }
}
