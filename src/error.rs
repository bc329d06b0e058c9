//! Error types for chain reads, wallet requests and transactions.

use thiserror::Error;

use crate::models::{ParseError, TxHash};

/// How a failure is surfaced to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wallet or RPC node unreachable, wrong network, receipt never arrived
    Connectivity,
    /// The wallet declined to sign
    UserRejected,
    /// The transaction was mined and reverted
    Reverted,
}

/// Errors raised by the chain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// HTTP-level failure talking to an endpoint.
    #[error("connection failed: {0}")]
    Transport(String),
    /// JSON-RPC error object returned by the endpoint.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    /// The wallet declined the request.
    #[error("request rejected in wallet")]
    UserRejected,
    /// The transaction was mined with status 0.
    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: TxHash },
    /// No receipt within the configured timeout.
    #[error("no receipt for {tx_hash} yet, check the explorer")]
    ReceiptTimeout { tx_hash: TxHash },
    /// Response payload could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
    /// Wallet is on a different chain than the store.
    #[error("wallet is on chain {actual}, expected {expected}")]
    WrongChain { expected: u64, actual: u64 },
    /// Wallet returned no accounts.
    #[error("wallet has no accounts")]
    NoAccounts,
}

impl ChainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChainError::UserRejected => ErrorKind::UserRejected,
            ChainError::Reverted { .. } => ErrorKind::Reverted,
            ChainError::Transport(_)
            | ChainError::Rpc { .. }
            | ChainError::ReceiptTimeout { .. }
            | ChainError::Decode(_)
            | ChainError::WrongChain { .. }
            | ChainError::NoAccounts => ErrorKind::Connectivity,
        }
    }
}

impl From<ParseError> for ChainError {
    fn from(err: ParseError) -> Self {
        ChainError::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for ChainError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChainError::Transport("request timed out".to_string())
        } else if err.is_connect() {
            ChainError::Transport(format!("cannot reach endpoint: {}", err))
        } else {
            ChainError::Transport(err.to_string())
        }
    }
}
