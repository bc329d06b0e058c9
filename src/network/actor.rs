//! Chain actor - runs contract reads and wallet writes in Tokio async runtime

use primitive_types::U256;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::catalog::{sample_listings, CatalogSource, CatalogStats};
use crate::messages::{ChainCommand, ChainResponse};
use crate::models::{ListingStatus, TxHash};
use crate::network::client::StoreClient;

/// Chain actor that executes each command in its own task
pub struct ChainActor {
    client: StoreClient,
    source: CatalogSource,
    response_tx: mpsc::UnboundedSender<ChainResponse>,
    active_requests: JoinSet<()>,
}

impl ChainActor {
    pub fn new(
        client: StoreClient,
        source: CatalogSource,
        response_tx: mpsc::UnboundedSender<ChainResponse>,
    ) -> Self {
        ChainActor {
            client,
            source,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the chain actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<ChainCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(ChainCommand::Shutdown) | None => break,
                        Some(cmd) => self.spawn(cmd),
                    }
                }

                // Clean up completed tasks
                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "Chain task panicked");
                    }
                }
            }
        }

        // In-flight writes are not cancelled on the chain, only abandoned here
        self.active_requests.abort_all();
        tracing::info!("Chain actor stopped");
    }

    fn spawn(&mut self, cmd: ChainCommand) {
        let client = self.client.clone();
        let source = self.source;
        let response_tx = self.response_tx.clone();

        self.active_requests.spawn(async move {
            tracing::info!(id = ?cmd.id(), command = command_name(&cmd), "Executing chain command");
            execute(client, source, cmd, &response_tx).await;
        });
    }
}

fn command_name(cmd: &ChainCommand) -> &'static str {
    match cmd {
        ChainCommand::ConnectWallet { .. } => "connect_wallet",
        ChainCommand::LoadPrices { .. } => "load_prices",
        ChainCommand::LoadAllowance { .. } => "load_allowance",
        ChainCommand::LoadBalance { .. } => "load_balance",
        ChainCommand::LoadCatalog { .. } => "load_catalog",
        ChainCommand::LoadStats { .. } => "load_stats",
        ChainCommand::Approve { .. } => "approve",
        ChainCommand::SubmitApp { .. } => "submit_app",
        ChainCommand::Shutdown => "shutdown",
    }
}

/// Run one command to completion, sending every lifecycle response
pub async fn execute(
    client: StoreClient,
    source: CatalogSource,
    cmd: ChainCommand,
    response_tx: &mpsc::UnboundedSender<ChainResponse>,
) {
    let response = match cmd {
        ChainCommand::ConnectWallet { id } => match client.connect().await {
            Ok(account) => ChainResponse::WalletConnected {
                id,
                account: account.address,
                chain_id: account.chain_id,
            },
            Err(error) => ChainResponse::Failed { id, error },
        },

        ChainCommand::LoadPrices { id } => match client.listing_prices().await {
            Ok(prices) => ChainResponse::Prices { id, prices },
            Err(error) => ChainResponse::Failed { id, error },
        },

        ChainCommand::LoadAllowance { id, owner } => match client.allowance(owner).await {
            Ok(amount) => ChainResponse::Allowance { id, amount },
            Err(error) => ChainResponse::Failed { id, error },
        },

        ChainCommand::LoadBalance { id, owner } => match client.balance_of(owner).await {
            Ok(amount) => ChainResponse::Balance { id, amount },
            Err(error) => ChainResponse::Failed { id, error },
        },

        ChainCommand::LoadCatalog { id, offset, limit } => {
            let result = match source {
                CatalogSource::Sample => Ok(sample_page(offset, limit)),
                CatalogSource::Contract => {
                    client.fetch_listings(ListingStatus::Approved, offset, limit).await
                }
            };
            match result {
                Ok(listings) => {
                    tracing::info!(id, offset, count = listings.len(), "Catalog page loaded");
                    ChainResponse::Catalog { id, offset, listings }
                }
                Err(error) => ChainResponse::Failed { id, error },
            }
        }

        ChainCommand::LoadStats { id } => {
            let result = match source {
                CatalogSource::Sample => Ok(CatalogStats {
                    total_apps: U256::from(sample_listings().len()),
                    total_burned: U256::zero(),
                }),
                CatalogSource::Contract => client.stats().await,
            };
            match result {
                Ok(stats) => ChainResponse::Stats { id, stats },
                Err(error) => ChainResponse::Failed { id, error },
            }
        }

        ChainCommand::Approve { id, from, amount } => {
            let sent = client.approve(from, amount).await;
            match confirm(&client, id, sent, response_tx).await {
                Some(response) => response,
                None => return,
            }
        }

        ChainCommand::SubmitApp { id, from, draft } => {
            let sent = client.submit_app(from, &draft).await;
            match confirm(&client, id, sent, response_tx).await {
                Some(response) => response,
                None => return,
            }
        }

        ChainCommand::Shutdown => return,
    };

    if let ChainResponse::Failed { id, error } = &response {
        tracing::warn!(id, error = %error, kind = ?error.kind(), "Chain command failed");
    }
    let _ = response_tx.send(response);
}

/// Report the sent hash, then wait for the receipt and build the final response
async fn confirm(
    client: &StoreClient,
    id: u64,
    sent: Result<TxHash, crate::error::ChainError>,
    response_tx: &mpsc::UnboundedSender<ChainResponse>,
) -> Option<ChainResponse> {
    let tx_hash = match sent {
        Ok(tx_hash) => tx_hash,
        Err(error) => return Some(ChainResponse::Failed { id, error }),
    };

    tracing::info!(id, tx_hash = %tx_hash, "Transaction sent, waiting for receipt");
    if response_tx.send(ChainResponse::TxSent { id, tx_hash }).is_err() {
        return None;
    }

    Some(match client.wait_for_receipt(tx_hash).await {
        Ok(()) => {
            tracing::info!(id, tx_hash = %tx_hash, "Transaction confirmed");
            ChainResponse::TxConfirmed { id, tx_hash }
        }
        Err(error) => ChainResponse::Failed { id, error },
    })
}

fn sample_page(offset: u64, limit: u64) -> Vec<crate::models::AppListing> {
    sample_listings()
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::{json, Value};

    use crate::error::ChainError;
    use crate::models::Address;
    use crate::network::client::tests::{contracts, MockTransport};

    fn owner() -> Address {
        "0x00000000000000000000000000000000000000aa".parse().unwrap()
    }

    fn client(node: Arc<MockTransport>, wallet: Arc<MockTransport>) -> StoreClient {
        StoreClient::new(node, wallet, contracts(), 84532)
            .with_receipt_timing(Duration::from_millis(1), Duration::from_millis(50))
    }

    async fn run(client: StoreClient, cmd: ChainCommand) -> Vec<ChainResponse> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        execute(client, CatalogSource::Contract, cmd, &tx).await;
        drop(tx);
        let mut out = Vec::new();
        while let Some(r) = rx.recv().await {
            out.push(r);
        }
        out
    }

    #[tokio::test]
    async fn test_write_reports_sent_then_confirmed() {
        let hash = format!("0x{}", "cd".repeat(32));
        let reply = hash.clone();
        let wallet = MockTransport::new(move |_, _| Ok(Value::String(reply.clone())));
        let node = MockTransport::new(|_, _| Ok(json!({"status": "0x1"})));

        let responses = run(
            client(node, wallet),
            ChainCommand::Approve { id: 7, from: owner(), amount: U256::from(10u64) },
        )
        .await;

        assert_eq!(responses.len(), 2);
        assert!(matches!(&responses[0], ChainResponse::TxSent { id: 7, tx_hash } if tx_hash.to_string() == hash));
        assert!(matches!(responses[1], ChainResponse::TxConfirmed { id: 7, .. }));
        assert!(!responses[0].is_terminal());
        assert!(responses[1].is_terminal());
    }

    #[tokio::test]
    async fn test_rejected_write_fails_without_sent() {
        let wallet = MockTransport::new(|_, _| Err(ChainError::UserRejected));
        let node = MockTransport::new(|_, _| Ok(Value::Null));

        let responses = run(
            client(node.clone(), wallet),
            ChainCommand::Approve { id: 3, from: owner(), amount: U256::one() },
        )
        .await;

        assert_eq!(responses.len(), 1);
        assert!(matches!(
            responses[0],
            ChainResponse::Failed { id: 3, error: ChainError::UserRejected }
        ));
        assert!(node.methods().is_empty());
    }

    #[tokio::test]
    async fn test_sample_catalog_skips_the_chain() {
        let unused = MockTransport::new(|method, _| panic!("unexpected call {}", method));
        let c = client(unused.clone(), unused);
        let (tx, mut rx) = mpsc::unbounded_channel();

        execute(c.clone(), CatalogSource::Sample, ChainCommand::LoadCatalog { id: 1, offset: 0, limit: 20 }, &tx).await;
        execute(c, CatalogSource::Sample, ChainCommand::LoadStats { id: 2 }, &tx).await;

        match rx.recv().await {
            Some(ChainResponse::Catalog { id: 1, offset: 0, listings }) => {
                assert_eq!(listings, sample_listings());
            }
            other => panic!("unexpected {:?}", other),
        }
        match rx.recv().await {
            Some(ChainResponse::Stats { id: 2, stats }) => {
                assert_eq!(stats.total_apps, U256::one());
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
