//! Chain messages - communication between App and Chain layers

use primitive_types::U256;

use crate::catalog::CatalogStats;
use crate::error::ChainError;
use crate::models::{Address, AppListing, ListingPrices, SubmissionDraft, TxHash};

/// Commands sent from App layer to Chain layer
#[derive(Debug, Clone, PartialEq)]
pub enum ChainCommand {
    /// Ask the wallet for an account and verify its chain
    ConnectWallet { id: u64 },
    /// Read `getListingPrices()`
    LoadPrices { id: u64 },
    /// Read the fee token allowance granted to the store
    LoadAllowance { id: u64, owner: Address },
    /// Read the fee token balance of `owner`
    LoadBalance { id: u64, owner: Address },
    /// Load one catalog page starting at `offset`
    LoadCatalog { id: u64, offset: u64, limit: u64 },
    /// Read `totalApps()` and `totalBurned()`
    LoadStats { id: u64 },

    // Writes
    /// `approve(store, amount)` on the fee token
    Approve { id: u64, from: Address, amount: U256 },
    /// `submitApp(...)` from a draft snapshot
    SubmitApp { id: u64, from: Address, draft: SubmissionDraft },

    /// Shutdown the chain actor
    Shutdown,
}

impl ChainCommand {
    pub fn id(&self) -> Option<u64> {
        match self {
            ChainCommand::ConnectWallet { id }
            | ChainCommand::LoadPrices { id }
            | ChainCommand::LoadAllowance { id, .. }
            | ChainCommand::LoadBalance { id, .. }
            | ChainCommand::LoadCatalog { id, .. }
            | ChainCommand::LoadStats { id }
            | ChainCommand::Approve { id, .. }
            | ChainCommand::SubmitApp { id, .. } => Some(*id),
            ChainCommand::Shutdown => None,
        }
    }
}

/// Responses sent from Chain layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum ChainResponse {
    WalletConnected { id: u64, account: Address, chain_id: u64 },
    Prices { id: u64, prices: ListingPrices },
    Allowance { id: u64, amount: U256 },
    Balance { id: u64, amount: U256 },
    Catalog { id: u64, offset: u64, listings: Vec<AppListing> },
    Stats { id: u64, stats: CatalogStats },

    // Write lifecycle
    /// The wallet accepted and broadcast the transaction
    TxSent { id: u64, tx_hash: TxHash },
    /// The receipt arrived with status 1
    TxConfirmed { id: u64, tx_hash: TxHash },

    /// Any failure, for reads and writes alike
    Failed { id: u64, error: ChainError },
}

impl ChainResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            ChainResponse::WalletConnected { id, .. } => *id,
            ChainResponse::Prices { id, .. } => *id,
            ChainResponse::Allowance { id, .. } => *id,
            ChainResponse::Balance { id, .. } => *id,
            ChainResponse::Catalog { id, .. } => *id,
            ChainResponse::Stats { id, .. } => *id,
            ChainResponse::TxSent { id, .. } => *id,
            ChainResponse::TxConfirmed { id, .. } => *id,
            ChainResponse::Failed { id, .. } => *id,
        }
    }

    /// Check if this is a terminal response (no more messages expected for this id)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ChainResponse::TxSent { .. })
    }
}
