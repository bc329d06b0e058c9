//! Typed app store client - contract reads, wallet writes and receipt waiting

use std::sync::Arc;
use std::time::Duration;

use futures_util::{stream, StreamExt, TryStreamExt};
use primitive_types::U256;
use serde_json::{json, Value};
use tokio::time::Instant;

use crate::catalog::CatalogStats;
use crate::constants::CATALOG_FETCH_PARALLELISM;
use crate::error::ChainError;
use crate::models::{Address, AppId, AppListing, ListingPrices, ListingStatus, SubmissionDraft, TxHash};
use crate::network::abi;
use crate::network::rpc::RpcTransport;

/// Deployed contract addresses the client talks to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contracts {
    pub app_store: Address,
    pub token: Address,
}

/// Account and chain reported by the wallet on connect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalletAccount {
    pub address: Address,
    pub chain_id: u64,
}

/// Client for the app store and its fee token.
///
/// Reads and receipts go to `node`; account access and transaction signing go
/// to `wallet`, which prompts the user.
#[derive(Clone)]
pub struct StoreClient {
    node: Arc<dyn RpcTransport>,
    wallet: Arc<dyn RpcTransport>,
    contracts: Contracts,
    chain_id: u64,
    receipt_poll: Duration,
    receipt_timeout: Duration,
}

impl StoreClient {
    pub fn new(
        node: Arc<dyn RpcTransport>,
        wallet: Arc<dyn RpcTransport>,
        contracts: Contracts,
        chain_id: u64,
    ) -> Self {
        StoreClient {
            node,
            wallet,
            contracts,
            chain_id,
            receipt_poll: Duration::from_secs(2),
            receipt_timeout: Duration::from_secs(180),
        }
    }

    pub fn with_receipt_timing(mut self, poll: Duration, timeout: Duration) -> Self {
        self.receipt_poll = poll;
        self.receipt_timeout = timeout;
        self
    }

    pub fn contracts(&self) -> Contracts {
        self.contracts
    }

    // ========================
    // Reads
    // ========================

    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, ChainError> {
        let params = json!([
            { "to": to.to_string(), "data": abi::to_hex_data(&data) },
            "latest"
        ]);
        let result = self.node.request("eth_call", params).await?;
        let hex = result
            .as_str()
            .ok_or_else(|| ChainError::Decode(format!("eth_call returned {}", result)))?;
        abi::from_hex_data(hex)
    }

    pub async fn listing_prices(&self) -> Result<ListingPrices, ChainError> {
        let data = abi::encode_call(abi::selectors::GET_LISTING_PRICES, &[]);
        let ret = self.call(self.contracts.app_store, data).await?;
        abi::decode_listing_prices(&ret)
    }

    pub async fn allowance(&self, owner: Address) -> Result<U256, ChainError> {
        let data = abi::allowance_call(owner, self.contracts.app_store);
        let ret = self.call(self.contracts.token, data).await?;
        abi::decode_uint(&ret)
    }

    pub async fn balance_of(&self, account: Address) -> Result<U256, ChainError> {
        let ret = self.call(self.contracts.token, abi::balance_of_call(account)).await?;
        abi::decode_uint(&ret)
    }

    pub async fn total_apps(&self) -> Result<U256, ChainError> {
        let data = abi::encode_call(abi::selectors::TOTAL_APPS, &[]);
        abi::decode_uint(&self.call(self.contracts.app_store, data).await?)
    }

    pub async fn total_burned(&self) -> Result<U256, ChainError> {
        let data = abi::encode_call(abi::selectors::TOTAL_BURNED, &[]);
        abi::decode_uint(&self.call(self.contracts.app_store, data).await?)
    }

    pub async fn stats(&self) -> Result<CatalogStats, ChainError> {
        let (total_apps, total_burned) = tokio::try_join!(self.total_apps(), self.total_burned())?;
        Ok(CatalogStats { total_apps, total_burned })
    }

    pub async fn get_app(&self, id: AppId) -> Result<AppListing, ChainError> {
        let ret = self.call(self.contracts.app_store, abi::get_app_call(id)).await?;
        abi::decode_app(id, &ret)
    }

    pub async fn apps_by_status(
        &self,
        status: ListingStatus,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<AppId>, ChainError> {
        let data = abi::get_apps_by_status_call(status, offset, limit);
        let ret = self.call(self.contracts.app_store, data).await?;
        abi::decode_bytes32_array(&ret)
    }

    /// One catalog page: ids by status, then each listing, in id order
    pub async fn fetch_listings(
        &self,
        status: ListingStatus,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<AppListing>, ChainError> {
        let ids = self.apps_by_status(status, offset, limit).await?;
        tracing::debug!(count = ids.len(), offset, "Fetching listing details");
        stream::iter(ids.into_iter().map(|id| self.get_app(id)))
            .buffered(CATALOG_FETCH_PARALLELISM)
            .try_collect()
            .await
    }

    // ========================
    // Wallet
    // ========================

    /// Ask the wallet for its account and check it is on the store's chain
    pub async fn connect(&self) -> Result<WalletAccount, ChainError> {
        let accounts = self.wallet.request("eth_requestAccounts", json!([])).await?;
        let first = accounts
            .as_array()
            .and_then(|a| a.first())
            .and_then(Value::as_str)
            .ok_or(ChainError::NoAccounts)?;
        let address: Address = first.parse()?;

        let chain = self.wallet.request("eth_chainId", json!([])).await?;
        let chain_id = abi::parse_quantity(
            chain
                .as_str()
                .ok_or_else(|| ChainError::Decode(format!("eth_chainId returned {}", chain)))?,
        )?;
        if chain_id != self.chain_id {
            return Err(ChainError::WrongChain { expected: self.chain_id, actual: chain_id });
        }

        tracing::info!(account = %address, chain_id, wallet = self.wallet.endpoint(), "Wallet connected");
        Ok(WalletAccount { address, chain_id })
    }

    async fn send_transaction(
        &self,
        from: Address,
        to: Address,
        data: Vec<u8>,
    ) -> Result<TxHash, ChainError> {
        let params = json!([{
            "from": from.to_string(),
            "to": to.to_string(),
            "data": abi::to_hex_data(&data),
        }]);
        let result = self.wallet.request("eth_sendTransaction", params).await?;
        let hash = result
            .as_str()
            .ok_or_else(|| ChainError::Decode(format!("eth_sendTransaction returned {}", result)))?;
        Ok(hash.parse()?)
    }

    /// `approve(store, amount)` on the fee token
    pub async fn approve(&self, from: Address, amount: U256) -> Result<TxHash, ChainError> {
        let data = abi::approve_call(self.contracts.app_store, amount);
        self.send_transaction(from, self.contracts.token, data).await
    }

    /// `submitApp(...)` on the store
    pub async fn submit_app(&self, from: Address, draft: &SubmissionDraft) -> Result<TxHash, ChainError> {
        let data = abi::submit_app_call(draft);
        self.send_transaction(from, self.contracts.app_store, data).await
    }

    /// Poll until the transaction is mined; a status of 0 is a revert.
    ///
    /// The transaction is already broadcast, so node errors while polling are
    /// logged and retried until the deadline instead of failing the write.
    pub async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<(), ChainError> {
        let deadline = Instant::now() + self.receipt_timeout;
        loop {
            let receipt = match self
                .node
                .request("eth_getTransactionReceipt", json!([tx_hash.to_string()]))
                .await
            {
                Ok(receipt) => receipt,
                Err(e @ (ChainError::Transport(_) | ChainError::Rpc { .. })) => {
                    tracing::warn!(tx_hash = %tx_hash, error = %e, "Receipt poll failed, retrying");
                    Value::Null
                }
                Err(e) => return Err(e),
            };

            if !receipt.is_null() {
                let status = receipt
                    .get("status")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ChainError::Decode("receipt without status".to_string()))?;
                return match abi::parse_quantity(status)? {
                    1 => Ok(()),
                    _ => Err(ChainError::Reverted { tx_hash }),
                };
            }

            if Instant::now() >= deadline {
                return Err(ChainError::ReceiptTimeout { tx_hash });
            }
            tokio::time::sleep(self.receipt_poll).await;
        }
    }
}
