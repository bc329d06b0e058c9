//! JSON-RPC transport - the seam between the typed client and an endpoint

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::constants::USER_REJECTED_CODE;
use crate::error::ChainError;

/// Something that answers JSON-RPC calls: a node or a wallet provider
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Issue `method` with positional `params`, returning the `result` member
    async fn request(&self, method: &str, params: Value) -> Result<Value, ChainError>;

    /// Endpoint label for logs
    fn endpoint(&self) -> &str;
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

/// Map a JSON-RPC error object onto the error taxonomy
pub fn map_rpc_error(code: i64, message: String) -> ChainError {
    if code == USER_REJECTED_CODE {
        ChainError::UserRejected
    } else {
        ChainError::Rpc { code, message }
    }
}

/// Split a raw JSON-RPC response body into result or error
pub fn parse_envelope(body: Value) -> Result<Value, ChainError> {
    let envelope: RpcEnvelope = serde_json::from_value(body)?;
    match (envelope.result, envelope.error) {
        (_, Some(err)) => Err(map_rpc_error(err.code, err.message)),
        (Some(result), None) => Ok(result),
        (None, None) => Ok(Value::Null),
    }
}

/// JSON-RPC over HTTP POST
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        HttpTransport {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!(id, method, url = %self.url, "JSON-RPC request");
        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            ChainError::Transport(format!("HTTP {} with unreadable body: {}", status.as_u16(), e))
        })?;

        let result = parse_envelope(body);
        if let Err(e) = &result {
            tracing::warn!(id, method, error = %e, "JSON-RPC call failed");
        }
        result
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

/// Create an HTTP client with default configuration
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Create the HTTP client for the wallet endpoint.
///
/// `eth_sendTransaction` only answers once the user signs or rejects, so the
/// request budget is `timeout` while connecting stays bounded by `connect_timeout`.
pub fn create_wallet_client(connect_timeout: Duration, timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
