//! The side-chain block header and its JSON representation.
//!
//! JSON field names follow the node RPC (`parentHash`, `sha3Uncles`, `miner`,
//! ...). Every field except `mixHash` and `nonce` is required; a missing or
//! `null` field fails with [`HeaderError::MissingField`] naming it.

use bytes::Bytes;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{ser::Error as _, Deserialize, Serialize, Serializer};

use bridge_relay_core::{Address, BlockNonce, Bloom, Hash, HexBig, HexBytes, HexU64};

use crate::error::{HeaderError, Result};

/// A proof-of-authority block header.
///
/// After sealing, the last 65 bytes of `extra` hold the producer's signature
/// over [`Header::seal_hash`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawHeader")]
pub struct Header {
    pub parent_hash: Hash,
    pub uncle_hash: Hash,
    pub coinbase: Address,
    pub root: Hash,
    pub tx_hash: Hash,
    pub receipt_hash: Hash,
    pub bloom: Bloom,
    pub difficulty: i64,
    pub number: i64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub time: u64,
    pub extra: Bytes,
    pub mix_digest: Hash,
    pub nonce: BlockNonce,
}

impl Header {
    /// Parse the RPC JSON form of a header.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: RawHeader = serde_json::from_str(s).map_err(|e| HeaderError::Json(e.to_string()))?;
        Self::try_from(raw)
    }

    /// Render the RPC JSON form of a header.
    ///
    /// Fails with [`HeaderError::NegativeInteger`] if `difficulty` or
    /// `number` is negative, since the JSON form has no signed quantities.
    pub fn to_json_string(&self) -> Result<String> {
        quantity(self.difficulty, "difficulty")?;
        quantity(self.number, "number")?;
        serde_json::to_string(self).map_err(|e| HeaderError::Json(e.to_string()))
    }
}

/// Wire shape used while decoding; every field is optional so absence can be
/// reported by name.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHeader {
    parent_hash: Option<Hash>,
    sha3_uncles: Option<Hash>,
    miner: Option<Address>,
    state_root: Option<Hash>,
    transactions_root: Option<Hash>,
    receipts_root: Option<Hash>,
    logs_bloom: Option<Bloom>,
    difficulty: Option<HexBig>,
    number: Option<HexBig>,
    gas_limit: Option<HexU64>,
    gas_used: Option<HexU64>,
    timestamp: Option<HexU64>,
    extra_data: Option<HexBytes>,
    mix_hash: Option<Hash>,
    nonce: Option<BlockNonce>,
}

fn required<T>(value: Option<T>, name: &'static str) -> Result<T> {
    value.ok_or(HeaderError::MissingField(name))
}

fn to_i64(value: &BigUint, name: &'static str) -> Result<i64> {
    value.to_i64().ok_or(HeaderError::IntegerOverflow(name))
}

impl TryFrom<RawHeader> for Header {
    type Error = HeaderError;

    fn try_from(raw: RawHeader) -> Result<Self> {
        let difficulty = required(raw.difficulty, "difficulty")?;
        let number = required(raw.number, "number")?;
        Ok(Self {
            parent_hash: required(raw.parent_hash, "parentHash")?,
            uncle_hash: required(raw.sha3_uncles, "sha3Uncles")?,
            coinbase: required(raw.miner, "miner")?,
            root: required(raw.state_root, "stateRoot")?,
            tx_hash: required(raw.transactions_root, "transactionsRoot")?,
            receipt_hash: required(raw.receipts_root, "receiptsRoot")?,
            bloom: required(raw.logs_bloom, "logsBloom")?,
            difficulty: to_i64(&difficulty.0, "difficulty")?,
            number: to_i64(&number.0, "number")?,
            gas_limit: required(raw.gas_limit, "gasLimit")?.0,
            gas_used: required(raw.gas_used, "gasUsed")?.0,
            time: required(raw.timestamp, "timestamp")?.0,
            extra: required(raw.extra_data, "extraData")?.0,
            mix_digest: raw.mix_hash.unwrap_or_default(),
            nonce: raw.nonce.unwrap_or_default(),
        })
    }
}

fn quantity(value: i64, name: &'static str) -> Result<HexBig> {
    u64::try_from(value)
        .map(|v| HexBig(BigUint::from(v)))
        .map_err(|_| HeaderError::NegativeInteger(name))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HeaderView<'a> {
    parent_hash: &'a Hash,
    sha3_uncles: &'a Hash,
    miner: &'a Address,
    state_root: &'a Hash,
    transactions_root: &'a Hash,
    receipts_root: &'a Hash,
    logs_bloom: &'a Bloom,
    difficulty: HexBig,
    number: HexBig,
    gas_limit: HexU64,
    gas_used: HexU64,
    timestamp: HexU64,
    extra_data: HexBytes,
    mix_hash: &'a Hash,
    nonce: &'a BlockNonce,
}

impl Serialize for Header {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        HeaderView {
            parent_hash: &self.parent_hash,
            sha3_uncles: &self.uncle_hash,
            miner: &self.coinbase,
            state_root: &self.root,
            transactions_root: &self.tx_hash,
            receipts_root: &self.receipt_hash,
            logs_bloom: &self.bloom,
            difficulty: quantity(self.difficulty, "difficulty").map_err(S::Error::custom)?,
            number: quantity(self.number, "number").map_err(S::Error::custom)?,
            gas_limit: HexU64(self.gas_limit),
            gas_used: HexU64(self.gas_used),
            timestamp: HexU64(self.time),
            extra_data: HexBytes(self.extra.clone()),
            mix_hash: &self.mix_digest,
            nonce: &self.nonce,
        }
        .serialize(serializer)
    }
}
