//! Wallet session - the connect pre-state shared by every view

use crate::models::Address;

/// Connected account, if any, plus the in-flight connect request
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalletSession {
    account: Option<Address>,
    chain_id: Option<u64>,
    connect_id: Option<u64>,
}

impl WalletSession {
    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn is_connecting(&self) -> bool {
        self.connect_id.is_some()
    }

    /// Record a connect request; false when already connected or connecting
    pub fn begin_connect(&mut self, id: u64) -> bool {
        if self.is_connected() || self.is_connecting() {
            return false;
        }
        self.connect_id = Some(id);
        true
    }

    /// Whether `id` is the connect request this session is waiting on
    pub fn awaits(&self, id: u64) -> bool {
        self.connect_id == Some(id)
    }

    pub fn connected(&mut self, account: Address, chain_id: u64) {
        self.account = Some(account);
        self.chain_id = Some(chain_id);
        self.connect_id = None;
    }

    pub fn connect_failed(&mut self) {
        self.connect_id = None;
    }

    pub fn disconnect(&mut self) {
        *self = WalletSession::default();
    }

    /// Header indicator text
    pub fn label(&self) -> String {
        match (self.account, self.connect_id) {
            (Some(account), _) => account.short(),
            (None, Some(_)) => String::from("Connecting…"),
            (None, None) => String::from("Not connected"),
        }
    }

    #[cfg(test)]
    pub fn with_account(account: Address) -> Self {
        WalletSession {
            account: Some(account),
            chain_id: Some(crate::constants::BASE_SEPOLIA_CHAIN_ID),
            connect_id: None,
        }
    }
}
