//! Application constants
//!
//! Centralized location for chain ids, deployed contract addresses and
//! configuration defaults.

/// Application name
pub const APP_NAME: &str = "Agent App Store";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Chain id of Base mainnet
pub const BASE_CHAIN_ID: u64 = 8453;

/// Chain id of Base Sepolia
pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;

/// Public RPC node for Base mainnet
pub const BASE_RPC_URL: &str = "https://mainnet.base.org";

/// Public RPC node for Base Sepolia
pub const BASE_SEPOLIA_RPC_URL: &str = "https://sepolia.base.org";

/// Local wallet provider endpoint (Frame exposes an injected-style provider here)
pub const DEFAULT_WALLET_URL: &str = "http://127.0.0.1:1248";

/// App store contract on Base mainnet. Not deployed yet.
pub const APP_STORE_BASE: &str = "0x0000000000000000000000000000000000000000";

/// App store contract on Base Sepolia
pub const APP_STORE_BASE_SEPOLIA: &str = "0xaf5894aBDeeFA800a0D1c01502d3D6691263DeBa";

/// EMBER token, same address on both networks
pub const EMBER_TOKEN: &str = "0x1b6A569DD61EdCe3C383f30E32b7A489E8441B09";

/// Token amounts use an 18-decimal fixed-point scale
pub const TOKEN_DECIMALS: usize = 18;

/// Token symbol shown next to amounts
pub const TOKEN_SYMBOL: &str = "EMBER";

/// Listings fetched per catalog page
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Interval between receipt polls
pub const DEFAULT_RECEIPT_POLL_MS: u64 = 2_000;

/// Give up waiting for a receipt after this long
pub const DEFAULT_RECEIPT_TIMEOUT_SECS: u64 = 180;

/// HTTP timeout for a single JSON-RPC request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Wallet requests wait on the user signing, so they get a much longer budget
pub const DEFAULT_WALLET_TIMEOUT_SECS: u64 = 900;

/// Concurrent `getApp` reads while loading a catalog page
pub const CATALOG_FETCH_PARALLELISM: usize = 4;

/// JSON-RPC error code wallets return when the user declines a request (EIP-1193)
pub const USER_REJECTED_CODE: i64 = 4001;

/// Directory under $HOME holding the config file
pub const CONFIG_DIR_NAME: &str = ".ember-storefront";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Log file written next to the working directory
pub const LOG_FILE_NAME: &str = "storefront.log";
