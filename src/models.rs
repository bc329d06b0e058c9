use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::TOKEN_DECIMALS;

/// Errors raised while parsing identifiers and enum discriminants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("invalid 32-byte hash: {0}")]
    InvalidHash(String),
    #[error("unknown {kind} discriminant {value}")]
    UnknownVariant { kind: &'static str, value: u8 },
}

/// App category, bit-exact with the contract's `uint8`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Tools,
    Games,
    DeFi,
    Social,
    Utils,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Tools,
        Category::Games,
        Category::DeFi,
        Category::Social,
        Category::Utils,
        Category::Other,
    ];

    pub fn as_u8(&self) -> u8 {
        match self {
            Category::Tools => 0,
            Category::Games => 1,
            Category::DeFi => 2,
            Category::Social => 3,
            Category::Utils => 4,
            Category::Other => 5,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Tools => "Tools",
            Category::Games => "Games",
            Category::DeFi => "DeFi",
            Category::Social => "Social",
            Category::Utils => "Utils",
            Category::Other => "Other",
        }
    }

    pub fn emoji(&self) -> &str {
        match self {
            Category::Tools => "🛠️",
            Category::Games => "🎮",
            Category::DeFi => "💰",
            Category::Social => "💬",
            Category::Utils => "⚙️",
            Category::Other => "📦",
        }
    }

    pub fn next(&self) -> Category {
        match self {
            Category::Tools => Category::Games,
            Category::Games => Category::DeFi,
            Category::DeFi => Category::Social,
            Category::Social => Category::Utils,
            Category::Utils => Category::Other,
            Category::Other => Category::Tools,
        }
    }

    pub fn prev(&self) -> Category {
        match self {
            Category::Tools => Category::Other,
            Category::Games => Category::Tools,
            Category::DeFi => Category::Games,
            Category::Social => Category::DeFi,
            Category::Utils => Category::Social,
            Category::Other => Category::Utils,
        }
    }
}

impl TryFrom<u8> for Category {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_u8() == value)
            .ok_or(ParseError::UnknownVariant { kind: "category", value })
    }
}

/// Target audience, bit-exact with the contract's `uint8`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Audience {
    #[default]
    Both,
    Humans,
    AIs,
}

impl Audience {
    pub const ALL: [Audience; 3] = [Audience::Both, Audience::Humans, Audience::AIs];

    pub fn as_u8(&self) -> u8 {
        match self {
            Audience::Both => 0,
            Audience::Humans => 1,
            Audience::AIs => 2,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Audience::Both => "Both",
            Audience::Humans => "Humans",
            Audience::AIs => "AIs",
        }
    }

    pub fn emoji(&self) -> &str {
        match self {
            Audience::Both => "🌐",
            Audience::Humans => "👤",
            Audience::AIs => "🤖",
        }
    }

    pub fn next(&self) -> Audience {
        match self {
            Audience::Both => Audience::Humans,
            Audience::Humans => Audience::AIs,
            Audience::AIs => Audience::Both,
        }
    }

    pub fn prev(&self) -> Audience {
        match self {
            Audience::Both => Audience::AIs,
            Audience::Humans => Audience::Both,
            Audience::AIs => Audience::Humans,
        }
    }
}

impl TryFrom<u8> for Audience {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Audience::ALL
            .iter()
            .copied()
            .find(|a| a.as_u8() == value)
            .ok_or(ParseError::UnknownVariant { kind: "audience", value })
    }
}

/// Review status of a listing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingStatus {
    Pending,
    Approved,
    Rejected,
}

impl ListingStatus {
    pub fn as_u8(&self) -> u8 {
        match self {
            ListingStatus::Pending => 0,
            ListingStatus::Approved => 1,
            ListingStatus::Rejected => 2,
        }
    }
}

impl TryFrom<u8> for ListingStatus {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ListingStatus::Pending),
            1 => Ok(ListingStatus::Approved),
            2 => Ok(ListingStatus::Rejected),
            _ => Err(ParseError::UnknownVariant { kind: "status", value }),
        }
    }
}

/// Paid listing tier
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingTier {
    Basic,
    Featured,
    Premium,
}

impl ListingTier {
    pub fn as_u8(&self) -> u8 {
        match self {
            ListingTier::Basic => 0,
            ListingTier::Featured => 1,
            ListingTier::Premium => 2,
        }
    }

    /// Featured and Premium listings get the highlighted section
    pub fn is_featured(&self) -> bool {
        matches!(self, ListingTier::Featured | ListingTier::Premium)
    }
}

impl TryFrom<u8> for ListingTier {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ListingTier::Basic),
            1 => Ok(ListingTier::Featured),
            2 => Ok(ListingTier::Premium),
            _ => Err(ParseError::UnknownVariant { kind: "tier", value }),
        }
    }
}

/// 20-byte account or contract address
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Wallet indicator form: `0x1234…abcd`
    pub fn short(&self) -> String {
        let full = self.to_string();
        format!("{}…{}", &full[..6], &full[full.len() - 4..])
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| ParseError::InvalidAddress(s.to_string()))?;
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| ParseError::InvalidAddress(s.to_string()))?;
        Ok(Address(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// 32-byte word: listing ids and transaction hashes
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct B256(pub [u8; 32]);

/// Content-addressed listing key assigned by the contract
pub type AppId = B256;

/// Hash of a transaction sent through the wallet
pub type TxHash = B256;

impl FromStr for B256 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| ParseError::InvalidHash(s.to_string()))?;
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| ParseError::InvalidHash(s.to_string()))?;
        Ok(B256(bytes))
    }
}

impl fmt::Display for B256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for B256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// A listing as stored by the app store contract
#[derive(Clone, Debug, PartialEq)]
pub struct AppListing {
    pub id: AppId,
    pub owner: Address,
    pub name: String,
    pub description: String,
    pub url: String,
    pub icon_url: String,
    pub category: Category,
    pub audience: Audience,
    pub status: ListingStatus,
    pub tier: ListingTier,
    pub featured_until: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl AppListing {
    pub fn is_featured(&self) -> bool {
        self.tier.is_featured()
    }

    /// Icon cell: the icon value itself (sample data uses emoji) or a box
    pub fn icon(&self) -> &str {
        if self.icon_url.is_empty() {
            "📦"
        } else {
            &self.icon_url
        }
    }
}

/// Listing fee per tier, in token base units
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ListingPrices {
    pub basic: U256,
    pub featured: U256,
    pub premium: U256,
}

/// Editable fields of the submission form, in focus order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DraftField {
    #[default]
    Name,
    Description,
    Url,
    IconUrl,
    Category,
    Audience,
}

impl DraftField {
    pub fn next(&self) -> DraftField {
        match self {
            DraftField::Name => DraftField::Description,
            DraftField::Description => DraftField::Url,
            DraftField::Url => DraftField::IconUrl,
            DraftField::IconUrl => DraftField::Category,
            DraftField::Category => DraftField::Audience,
            DraftField::Audience => DraftField::Name,
        }
    }

    pub fn prev(&self) -> DraftField {
        match self {
            DraftField::Name => DraftField::Audience,
            DraftField::Description => DraftField::Name,
            DraftField::Url => DraftField::Description,
            DraftField::IconUrl => DraftField::Url,
            DraftField::Category => DraftField::IconUrl,
            DraftField::Audience => DraftField::Category,
        }
    }

    /// Free-text fields (as opposed to enum selectors)
    pub fn is_text(&self) -> bool {
        !matches!(self, DraftField::Category | DraftField::Audience)
    }

    pub fn label(&self) -> &str {
        match self {
            DraftField::Name => "App Name *",
            DraftField::Description => "Description",
            DraftField::Url => "App URL *",
            DraftField::IconUrl => "Icon URL (optional)",
            DraftField::Category => "Category",
            DraftField::Audience => "Target Audience",
        }
    }
}

/// Form contents of a listing submission
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SubmissionDraft {
    pub name: String,
    pub description: String,
    pub url: String,
    pub icon_url: String,
    pub category: Category,
    pub audience: Audience,
}

impl SubmissionDraft {
    /// Name and url are the only fields the submit control requires
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.url.trim().is_empty()
    }

    pub fn text(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Description => &self.description,
            DraftField::Url => &self.url,
            DraftField::IconUrl => &self.icon_url,
            DraftField::Category => self.category.as_str(),
            DraftField::Audience => self.audience.as_str(),
        }
    }

    pub fn text_mut(&mut self, field: DraftField) -> Option<&mut String> {
        match field {
            DraftField::Name => Some(&mut self.name),
            DraftField::Description => Some(&mut self.description),
            DraftField::Url => Some(&mut self.url),
            DraftField::IconUrl => Some(&mut self.icon_url),
            DraftField::Category | DraftField::Audience => None,
        }
    }
}

/// Render a base-unit amount with the token's 18 decimals, trimming trailing zeros
pub fn format_units(amount: U256) -> String {
    let scale = U256::exp10(TOKEN_DECIMALS);
    let whole = amount / scale;
    let frac = amount % scale;
    if frac.is_zero() {
        return whole.to_string();
    }
    let frac = format!("{:0>width$}", frac.to_string(), width = TOKEN_DECIMALS);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Convert a unix-seconds word into a timestamp; zero means unset
pub fn timestamp_from_word(value: U256) -> Option<DateTime<Utc>> {
    if value.is_zero() || value > U256::from(i64::MAX as u64) {
        return None;
    }
    DateTime::from_timestamp(value.low_u64() as i64, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parse_and_display() {
        let addr: Address = "0x1b6A569DD61EdCe3C383f30E32b7A489E8441B09".parse().unwrap();
        assert_eq!(addr.to_string(), "0x1b6a569dd61edce3c383f30e32b7a489e8441b09");
        assert_eq!(addr.short(), "0x1b6a…1b09");
        assert!(!addr.is_zero());

        assert!("1b6A569DD61EdCe3C383f30E32b7A489E8441B09".parse::<Address>().is_err());
        assert!("0x1234".parse::<Address>().is_err());
        assert!("0x0000000000000000000000000000000000000000".parse::<Address>().unwrap().is_zero());
    }

    #[test]
    fn test_enum_discriminants_are_bit_exact() {
        assert_eq!(Category::try_from(2).unwrap(), Category::DeFi);
        assert_eq!(Category::Other.as_u8(), 5);
        assert_eq!(Audience::try_from(2).unwrap(), Audience::AIs);
        assert_eq!(ListingStatus::try_from(1).unwrap(), ListingStatus::Approved);
        assert_eq!(ListingTier::try_from(2).unwrap(), ListingTier::Premium);
        assert_eq!(
            Category::try_from(6),
            Err(ParseError::UnknownVariant { kind: "category", value: 6 })
        );
        assert!(Audience::try_from(3).is_err());
    }

    #[test]
    fn test_format_units() {
        let ten = U256::from(10u64) * U256::exp10(18);
        assert_eq!(format_units(ten), "10");
        assert_eq!(format_units(U256::from(15u64) * U256::exp10(17)), "1.5");
        assert_eq!(format_units(U256::from(1u64)), "0.000000000000000001");
        assert_eq!(format_units(U256::zero()), "0");
    }

    #[test]
    fn test_draft_completeness() {
        let mut draft = SubmissionDraft::default();
        assert!(!draft.is_complete());
        draft.name = "My App".into();
        assert!(!draft.is_complete());
        draft.url = "   ".into();
        assert!(!draft.is_complete());
        draft.url = "https://myapp.com".into();
        assert!(draft.is_complete());
    }

    #[test]
    fn test_timestamp_from_word() {
        assert_eq!(timestamp_from_word(U256::zero()), None);
        let ts = timestamp_from_word(U256::from(1_700_000_000u64)).unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);
    }
}
