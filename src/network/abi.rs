//! Solidity ABI encoding for the app store and ERC-20 calls
//!
//! Only the shapes these two contracts use are supported: 32-byte static
//! words, dynamic strings, `bytes32[]` and the dynamic `getApp` tuple.

use primitive_types::U256;

use crate::error::ChainError;
use crate::models::{
    timestamp_from_word, Address, AppId, AppListing, Audience, B256, Category, ListingPrices,
    ListingStatus, ListingTier, SubmissionDraft,
};

const WORD: usize = 32;

/// Function selectors (first four bytes of keccak-256 of the signature)
pub mod selectors {
    /// `approve(address,uint256)`
    pub const APPROVE: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];
    /// `allowance(address,address)`
    pub const ALLOWANCE: [u8; 4] = [0xdd, 0x62, 0xed, 0x3e];
    /// `balanceOf(address)`
    pub const BALANCE_OF: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];
    /// `submitApp(string,string,string,string,uint8,uint8)`
    pub const SUBMIT_APP: [u8; 4] = [0x23, 0xb8, 0xf1, 0xcc];
    /// `getApp(bytes32)`
    pub const GET_APP: [u8; 4] = [0x42, 0xc7, 0x1f, 0x1d];
    /// `getAppsByStatus(uint8,uint256,uint256)`
    pub const GET_APPS_BY_STATUS: [u8; 4] = [0x11, 0x53, 0x4a, 0xb4];
    /// `getListingPrices()`
    pub const GET_LISTING_PRICES: [u8; 4] = [0x26, 0x8f, 0x01, 0x2d];
    /// `totalApps()`
    pub const TOTAL_APPS: [u8; 4] = [0xc9, 0x7c, 0x46, 0x22];
    /// `totalBurned()`
    pub const TOTAL_BURNED: [u8; 4] = [0xd8, 0x91, 0x35, 0xcd];
}

/// A single ABI argument
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Address(Address),
    Uint(U256),
    FixedBytes(B256),
    String(String),
}

fn uint_word(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    for (i, byte) in word.iter_mut().rev().enumerate() {
        *byte = value.byte(i);
    }
    word
}

fn static_word(token: &Token) -> [u8; WORD] {
    match token {
        Token::Address(addr) => {
            let mut word = [0u8; WORD];
            word[12..].copy_from_slice(&addr.0);
            word
        }
        Token::Uint(value) => uint_word(*value),
        Token::FixedBytes(bytes) => bytes.0,
        Token::String(_) => [0u8; WORD],
    }
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

/// Head/tail encode a list of arguments
pub fn encode_tokens(tokens: &[Token]) -> Vec<u8> {
    let head_len = tokens.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        match token {
            Token::String(s) => {
                head.extend_from_slice(&uint_word(U256::from(head_len + tail.len())));
                let bytes = s.as_bytes();
                tail.extend_from_slice(&uint_word(U256::from(bytes.len())));
                tail.extend_from_slice(bytes);
                tail.resize(tail.len() + padded_len(bytes.len()) - bytes.len(), 0);
            }
            _ => head.extend_from_slice(&static_word(token)),
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// Calldata: selector followed by the encoded arguments
pub fn encode_call(selector: [u8; 4], tokens: &[Token]) -> Vec<u8> {
    let mut data = selector.to_vec();
    data.extend_from_slice(&encode_tokens(tokens));
    data
}

pub fn approve_call(spender: Address, amount: U256) -> Vec<u8> {
    encode_call(selectors::APPROVE, &[Token::Address(spender), Token::Uint(amount)])
}

pub fn allowance_call(owner: Address, spender: Address) -> Vec<u8> {
    encode_call(selectors::ALLOWANCE, &[Token::Address(owner), Token::Address(spender)])
}

pub fn balance_of_call(account: Address) -> Vec<u8> {
    encode_call(selectors::BALANCE_OF, &[Token::Address(account)])
}

pub fn submit_app_call(draft: &SubmissionDraft) -> Vec<u8> {
    encode_call(
        selectors::SUBMIT_APP,
        &[
            Token::String(draft.name.clone()),
            Token::String(draft.description.clone()),
            Token::String(draft.url.clone()),
            Token::String(draft.icon_url.clone()),
            Token::Uint(U256::from(draft.category.as_u8())),
            Token::Uint(U256::from(draft.audience.as_u8())),
        ],
    )
}

pub fn get_app_call(id: AppId) -> Vec<u8> {
    encode_call(selectors::GET_APP, &[Token::FixedBytes(id)])
}

pub fn get_apps_by_status_call(status: ListingStatus, offset: u64, limit: u64) -> Vec<u8> {
    encode_call(
        selectors::GET_APPS_BY_STATUS,
        &[
            Token::Uint(U256::from(status.as_u8())),
            Token::Uint(U256::from(offset)),
            Token::Uint(U256::from(limit)),
        ],
    )
}

/// Bounds-checked reader over ABI-encoded return data
pub struct Decoder<'a> {
    data: &'a [u8],
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Decoder { data }
    }

    fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], ChainError> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| ChainError::Decode("offset overflow".to_string()))?;
        self.data.get(offset..end).ok_or_else(|| {
            ChainError::Decode(format!(
                "need {} bytes at {}, have {}",
                len,
                offset,
                self.data.len()
            ))
        })
    }

    pub fn uint(&self, offset: usize) -> Result<U256, ChainError> {
        Ok(U256::from_big_endian(self.slice(offset, WORD)?))
    }

    pub fn small(&self, offset: usize) -> Result<u8, ChainError> {
        let value = self.uint(offset)?;
        if value > U256::from(u8::MAX) {
            return Err(ChainError::Decode(format!("{} does not fit uint8", value)));
        }
        Ok(value.low_u32() as u8)
    }

    pub fn usize(&self, offset: usize) -> Result<usize, ChainError> {
        let value = self.uint(offset)?;
        if value > U256::from(self.data.len()) {
            return Err(ChainError::Decode(format!("length or offset {} out of range", value)));
        }
        Ok(value.low_u64() as usize)
    }

    pub fn address(&self, offset: usize) -> Result<Address, ChainError> {
        let word = self.slice(offset, WORD)?;
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&word[12..]);
        Ok(Address(bytes))
    }

    pub fn bytes32(&self, offset: usize) -> Result<B256, ChainError> {
        let mut bytes = [0u8; WORD];
        bytes.copy_from_slice(self.slice(offset, WORD)?);
        Ok(B256(bytes))
    }

    /// String whose head word sits at `head`, with the tail offset relative to `base`
    pub fn string(&self, base: usize, head: usize) -> Result<String, ChainError> {
        let start = base + self.usize(head)?;
        let len = self.usize(start)?;
        let bytes = self.slice(start + WORD, len)?;
        String::from_utf8(bytes.to_vec()).map_err(|e| ChainError::Decode(e.to_string()))
    }
}

pub fn decode_uint(data: &[u8]) -> Result<U256, ChainError> {
    Decoder::new(data).uint(0)
}

pub fn decode_listing_prices(data: &[u8]) -> Result<ListingPrices, ChainError> {
    let d = Decoder::new(data);
    Ok(ListingPrices {
        basic: d.uint(0)?,
        featured: d.uint(WORD)?,
        premium: d.uint(2 * WORD)?,
    })
}

pub fn decode_bytes32_array(data: &[u8]) -> Result<Vec<B256>, ChainError> {
    let d = Decoder::new(data);
    let start = d.usize(0)?;
    let len = d.usize(start)?;
    (0..len)
        .map(|i| d.bytes32(start + WORD + i * WORD))
        .collect()
}

/// Decode the `getApp` return tuple
pub fn decode_app(id: AppId, data: &[u8]) -> Result<AppListing, ChainError> {
    let d = Decoder::new(data);
    let base = d.usize(0)?;
    let field = |n: usize| base + n * WORD;

    Ok(AppListing {
        id,
        owner: d.address(field(0))?,
        name: d.string(base, field(1))?,
        description: d.string(base, field(2))?,
        url: d.string(base, field(3))?,
        icon_url: d.string(base, field(4))?,
        category: Category::try_from(d.small(field(5))?)?,
        audience: Audience::try_from(d.small(field(6))?)?,
        status: ListingStatus::try_from(d.small(field(7))?)?,
        tier: ListingTier::try_from(d.small(field(8))?)?,
        featured_until: timestamp_from_word(d.uint(field(9))?),
        submitted_at: timestamp_from_word(d.uint(field(10))?),
        approved_at: timestamp_from_word(d.uint(field(11))?),
    })
}

/// `0x`-prefixed hex of raw bytes, as JSON-RPC expects
pub fn to_hex_data(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn from_hex_data(s: &str) -> Result<Vec<u8>, ChainError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|e| ChainError::Decode(format!("bad hex data: {}", e)))
}

/// Parse a JSON-RPC quantity such as `0x14a34`
pub fn parse_quantity(s: &str) -> Result<u64, ChainError> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| ChainError::Decode(format!("quantity without 0x: {}", s)))?;
    u64::from_str_radix(digits, 16).map_err(|e| ChainError::Decode(format!("bad quantity {}: {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(n: u64) -> [u8; WORD] {
        uint_word(U256::from(n))
    }

    fn store() -> Address {
        "0xaf5894aBDeeFA800a0D1c01502d3D6691263DeBa".parse().unwrap()
    }

    #[test]
    fn test_approve_calldata() {
        let amount = U256::from(10u64) * U256::exp10(18);
        let data = approve_call(store(), amount);
        assert_eq!(
            to_hex_data(&data),
            "0x095ea7b3\
             000000000000000000000000af5894abdeefa800a0d1c01502d3d6691263deba\
             0000000000000000000000000000000000000000000000008ac7230489e80000"
        );
    }

    #[test]
    fn test_submit_app_string_layout() {
        let draft = SubmissionDraft {
            name: "Ab".into(),
            description: String::new(),
            url: "https://x.io".into(),
            icon_url: String::new(),
            category: Category::DeFi,
            audience: Audience::AIs,
        };
        let data = submit_app_call(&draft);
        assert_eq!(&data[..4], &selectors::SUBMIT_APP);

        let args = &data[4..];
        // six head words, then four strings of one length word plus padded bytes
        assert_eq!(args.len(), 6 * WORD + 4 * WORD + WORD + WORD);
        assert_eq!(&args[0..WORD], &word(0xc0));
        assert_eq!(&args[WORD..2 * WORD], &word(0x100));
        assert_eq!(&args[2 * WORD..3 * WORD], &word(0x120));
        assert_eq!(&args[3 * WORD..4 * WORD], &word(0x160));
        assert_eq!(&args[4 * WORD..5 * WORD], &word(2));
        assert_eq!(&args[5 * WORD..6 * WORD], &word(2));

        let d = Decoder::new(args);
        assert_eq!(d.string(0, 0).unwrap(), "Ab");
        assert_eq!(d.string(0, WORD).unwrap(), "");
        assert_eq!(d.string(0, 2 * WORD).unwrap(), "https://x.io");
        assert_eq!(d.string(0, 3 * WORD).unwrap(), "");
    }

    #[test]
    fn test_decode_listing_prices() {
        let mut data = Vec::new();
        data.extend_from_slice(&word(10));
        data.extend_from_slice(&word(50));
        data.extend_from_slice(&word(100));
        let prices = decode_listing_prices(&data).unwrap();
        assert_eq!(prices.basic, U256::from(10u64));
        assert_eq!(prices.premium, U256::from(100u64));

        assert!(decode_listing_prices(&data[..64]).is_err());
    }

    #[test]
    fn test_decode_bytes32_array() {
        let mut data = Vec::new();
        data.extend_from_slice(&word(0x20));
        data.extend_from_slice(&word(2));
        data.extend_from_slice(&[0x11; WORD]);
        data.extend_from_slice(&[0x22; WORD]);
        let ids = decode_bytes32_array(&data).unwrap();
        assert_eq!(ids, vec![B256([0x11; WORD]), B256([0x22; WORD])]);

        let mut empty = Vec::new();
        empty.extend_from_slice(&word(0x20));
        empty.extend_from_slice(&word(0));
        assert!(decode_bytes32_array(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_decode_app_tuple() {
        let owner: Address = "0x1b6A569DD61EdCe3C383f30E32b7A489E8441B09".parse().unwrap();
        let tuple = encode_tokens(&[
            Token::Address(owner),
            Token::String("Ember Staking".into()),
            Token::String("Stake EMBER".into()),
            Token::String("https://ember.engineer/staking".into()),
            Token::String(String::new()),
            Token::Uint(U256::from(2u8)),
            Token::Uint(U256::from(0u8)),
            Token::Uint(U256::from(1u8)),
            Token::Uint(U256::from(1u8)),
            Token::Uint(U256::from(1_800_000_000u64)),
            Token::Uint(U256::from(1_700_000_000u64)),
            Token::Uint(U256::zero()),
        ]);
        let mut data = word(0x20).to_vec();
        data.extend_from_slice(&tuple);

        let id = B256([7; WORD]);
        let app = decode_app(id, &data).unwrap();
        assert_eq!(app.id, id);
        assert_eq!(app.owner, owner);
        assert_eq!(app.name, "Ember Staking");
        assert_eq!(app.url, "https://ember.engineer/staking");
        assert_eq!(app.icon_url, "");
        assert_eq!(app.category, Category::DeFi);
        assert_eq!(app.audience, Audience::Both);
        assert_eq!(app.status, ListingStatus::Approved);
        assert_eq!(app.tier, ListingTier::Featured);
        assert_eq!(app.submitted_at.map(|t| t.timestamp()), Some(1_700_000_000));
        assert_eq!(app.approved_at, None);
    }

    #[test]
    fn test_decode_rejects_unknown_category() {
        let tuple = encode_tokens(&[
            Token::Address(Address::ZERO),
            Token::String("x".into()),
            Token::String(String::new()),
            Token::String(String::new()),
            Token::String(String::new()),
            Token::Uint(U256::from(9u8)),
            Token::Uint(U256::zero()),
            Token::Uint(U256::zero()),
            Token::Uint(U256::zero()),
            Token::Uint(U256::zero()),
            Token::Uint(U256::zero()),
            Token::Uint(U256::zero()),
        ]);
        let mut data = word(0x20).to_vec();
        data.extend_from_slice(&tuple);
        assert!(matches!(decode_app(B256::default(), &data), Err(ChainError::Decode(_))));
    }

    #[test]
    fn test_hex_helpers() {
        assert_eq!(from_hex_data("0x0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(from_hex_data("0x").unwrap(), Vec::<u8>::new());
        assert!(from_hex_data("0xzz").is_err());
        assert_eq!(parse_quantity("0x14a34").unwrap(), 84532);
        assert!(parse_quantity("84532").is_err());
    }
}
