use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogSource;
use crate::constants::{
    APP_STORE_BASE, APP_STORE_BASE_SEPOLIA, BASE_CHAIN_ID, BASE_RPC_URL, BASE_SEPOLIA_CHAIN_ID,
    BASE_SEPOLIA_RPC_URL, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_PAGE_SIZE,
    DEFAULT_RECEIPT_POLL_MS, DEFAULT_RECEIPT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_WALLET_TIMEOUT_SECS, DEFAULT_WALLET_URL, EMBER_TOKEN,
};
use crate::models::Address;
use crate::network::Contracts;

/// Supported deployments
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    Base,
    #[default]
    BaseSepolia,
}

impl Network {
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Base => BASE_CHAIN_ID,
            Network::BaseSepolia => BASE_SEPOLIA_CHAIN_ID,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Network::Base => "Base",
            Network::BaseSepolia => "Base Sepolia",
        }
    }

    fn rpc_url(&self) -> &str {
        match self {
            Network::Base => BASE_RPC_URL,
            Network::BaseSepolia => BASE_SEPOLIA_RPC_URL,
        }
    }

    fn app_store(&self) -> &str {
        match self {
            Network::Base => APP_STORE_BASE,
            Network::BaseSepolia => APP_STORE_BASE_SEPOLIA,
        }
    }
}

impl FromStr for Network {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "base" | "mainnet" => Ok(Network::Base),
            "base-sepolia" | "sepolia" => Ok(Network::BaseSepolia),
            other => bail!("unknown network '{}' (expected base or base-sepolia)", other),
        }
    }
}

/// User configuration, read from `~/.ember-storefront/config.yaml`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: Network,
    /// RPC node; defaults to the network's public endpoint
    pub rpc_url: Option<String>,
    pub wallet_url: String,
    /// Store contract; defaults to the network's deployment
    pub app_store: Option<Address>,
    pub token: Option<Address>,
    pub page_size: u64,
    pub receipt_poll_ms: u64,
    pub receipt_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Wallet requests block until the user signs
    pub wallet_timeout_secs: u64,
    pub catalog_source: CatalogSource,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            network: Network::default(),
            rpc_url: None,
            wallet_url: String::from(DEFAULT_WALLET_URL),
            app_store: None,
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            receipt_poll_ms: DEFAULT_RECEIPT_POLL_MS,
            receipt_timeout_secs: DEFAULT_RECEIPT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            wallet_timeout_secs: DEFAULT_WALLET_TIMEOUT_SECS,
            catalog_source: CatalogSource::default(),
        }
    }
}

impl Config {
    /// Default config file location
    pub fn path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Load, apply environment overrides and validate
    pub fn load() -> Result<Config> {
        let mut config = Config::load_from(&Config::path())?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Apply `STOREFRONT_*` overrides looked up through `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(network) = lookup("STOREFRONT_NETWORK") {
            self.network = network.parse()?;
        }
        if let Some(url) = lookup("STOREFRONT_RPC_URL") {
            self.rpc_url = Some(url);
        }
        if let Some(url) = lookup("STOREFRONT_WALLET_URL") {
            self.wallet_url = url;
        }
        if let Some(source) = lookup("STOREFRONT_CATALOG") {
            self.catalog_source = match source.to_ascii_lowercase().as_str() {
                "sample" => CatalogSource::Sample,
                "contract" => CatalogSource::Contract,
                other => bail!("unknown catalog source '{}' (expected sample or contract)", other),
            };
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let store = self.contracts()?.app_store;
        if store.is_zero() {
            bail!(
                "the app store is not deployed on {} yet; set app_store or use base-sepolia",
                self.network.label()
            );
        }
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if self.receipt_poll_ms == 0 {
            bail!("receipt_poll_ms must be at least 1");
        }
        if self.wallet_timeout_secs < self.request_timeout_secs {
            bail!("wallet_timeout_secs must not be shorter than request_timeout_secs");
        }
        Ok(())
    }

    pub fn rpc_url(&self) -> &str {
        self.rpc_url.as_deref().unwrap_or(self.network.rpc_url())
    }

    pub fn contracts(&self) -> Result<Contracts> {
        let app_store = match self.app_store {
            Some(address) => address,
            None => self.network.app_store().parse()?,
        };
        let token = match self.token {
            Some(address) => address,
            None => EMBER_TOKEN.parse()?,
        };
        Ok(Contracts { app_store, token })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn wallet_timeout(&self) -> Duration {
        Duration::from_secs(self.wallet_timeout_secs)
    }

    pub fn receipt_poll(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_ms)
    }

    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.network.chain_id(), 84532);
        assert_eq!(config.rpc_url(), "https://sepolia.base.org");
        assert_eq!(config.page_size, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "rpc_url: http://localhost:8545\npage_size: 5\ncatalog_source: sample\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.rpc_url(), "http://localhost:8545");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.catalog_source, CatalogSource::Sample);
        assert_eq!(config.wallet_url, DEFAULT_WALLET_URL);
        assert_eq!(config.receipt_timeout(), Duration::from_secs(180));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "app_store: not-an-address\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("STOREFRONT_WALLET_URL", "http://127.0.0.1:9999"),
            ("STOREFRONT_CATALOG", "sample"),
        ]);
        let mut config = Config::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.wallet_url, "http://127.0.0.1:9999");
        assert_eq!(config.catalog_source, CatalogSource::Sample);
        assert_eq!(config.network, Network::BaseSepolia);

        let bad = |key: &str| (key == "STOREFRONT_NETWORK").then(|| String::from("goerli"));
        assert!(Config::default().apply_overrides(bad).is_err());
    }

    #[test]
    fn test_mainnet_store_is_rejected_until_configured() {
        let mut config = Config {
            network: Network::Base,
            ..Config::default()
        };
        assert_eq!(config.rpc_url(), "https://mainnet.base.org");
        assert!(config.validate().is_err());

        config.app_store = Some("0x00000000000000000000000000000000000000aa".parse().unwrap());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_wallet_waits_longer_than_node_requests() {
        let config = Config::default();
        assert!(config.wallet_timeout() > config.request_timeout());

        let short = Config {
            wallet_timeout_secs: 5,
            ..Config::default()
        };
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let config = Config {
            page_size: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
