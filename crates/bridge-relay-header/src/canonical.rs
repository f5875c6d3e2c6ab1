//! Canonical RLP encoding of a header.
//!
//! The header encodes as a 15-item RLP list in field order: parent hash,
//! uncle hash, coinbase, state root, transactions root, receipts root, bloom,
//! difficulty, number, gas limit, gas used, time, extra-data, mix digest,
//! nonce. Integers are minimal big-endian byte strings; zero is the empty
//! string.
//!
//! Two variants exist:
//! - the seal encoding drops the trailing 65-byte signature from extra-data
//!   and is the input to [`Header::seal_hash`]
//! - the full encoding keeps extra-data intact and is the input to
//!   [`Header::hash`]

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rlp::{Decodable, DecoderError, Rlp, RlpStream};

use bridge_relay_core::codec::{append_big, big_at, decode_exact, expect_fields};
use bridge_relay_core::SIGNATURE_LENGTH;

use crate::error::{HeaderError, Result};
use crate::header::Header;

/// Number of items in an encoded header.
pub const HEADER_FIELDS: usize = 15;

fn non_negative(value: i64, name: &'static str) -> Result<BigUint> {
    u64::try_from(value)
        .map(BigUint::from)
        .map_err(|_| HeaderError::NegativeInteger(name))
}

fn encode_with_extra(header: &Header, extra: &[u8]) -> Result<Vec<u8>> {
    let difficulty = non_negative(header.difficulty, "difficulty")?;
    let number = non_negative(header.number, "number")?;

    let mut s = RlpStream::new_list(HEADER_FIELDS);
    s.append(&header.parent_hash)
        .append(&header.uncle_hash)
        .append(&header.coinbase)
        .append(&header.root)
        .append(&header.tx_hash)
        .append(&header.receipt_hash)
        .append(&header.bloom);
    append_big(&mut s, &difficulty);
    append_big(&mut s, &number);
    s.append(&header.gas_limit)
        .append(&header.gas_used)
        .append(&header.time)
        .append(&extra.to_vec())
        .append(&header.mix_digest)
        .append(&header.nonce);
    Ok(s.out().to_vec())
}

/// Extra-data with the seal signature removed.
///
/// Fails with [`HeaderError::SignatureMissing`] when extra-data is shorter
/// than the signature.
pub fn unsealed_extra(header: &Header) -> Result<&[u8]> {
    let len = header.extra.len();
    if len < SIGNATURE_LENGTH {
        return Err(HeaderError::SignatureMissing { len });
    }
    Ok(&header.extra[..len - SIGNATURE_LENGTH])
}

/// Encoding signed by the block producer.
pub fn seal_encoding(header: &Header) -> Result<Vec<u8>> {
    encode_with_extra(header, unsealed_extra(header)?)
}

/// Encoding of the complete header, signature included.
pub fn full_encoding(header: &Header) -> Result<Vec<u8>> {
    encode_with_extra(header, &header.extra)
}

fn i64_at(rlp: &Rlp, index: usize) -> std::result::Result<i64, DecoderError> {
    big_at(rlp, index)?
        .to_i64()
        .ok_or(DecoderError::Custom("header integer exceeds i64"))
}

impl Decodable for Header {
    fn decode(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
        expect_fields(rlp, HEADER_FIELDS)?;
        Ok(Self {
            parent_hash: rlp.val_at(0)?,
            uncle_hash: rlp.val_at(1)?,
            coinbase: rlp.val_at(2)?,
            root: rlp.val_at(3)?,
            tx_hash: rlp.val_at(4)?,
            receipt_hash: rlp.val_at(5)?,
            bloom: rlp.val_at(6)?,
            difficulty: i64_at(rlp, 7)?,
            number: i64_at(rlp, 8)?,
            gas_limit: rlp.val_at(9)?,
            gas_used: rlp.val_at(10)?,
            time: rlp.val_at(11)?,
            extra: rlp.val_at::<Vec<u8>>(12)?.into(),
            mix_digest: rlp.val_at(13)?,
            nonce: rlp.val_at(14)?,
        })
    }
}

impl Header {
    /// Decode a full header encoding. Trailing bytes are rejected.
    pub fn from_rlp(bytes: &[u8]) -> Result<Self> {
        Ok(decode_exact(bytes)?)
    }

    /// Full canonical encoding, see [`full_encoding`].
    pub fn rlp_bytes(&self) -> Result<Vec<u8>> {
        full_encoding(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_relay_core::{Address, BlockNonce, Bloom, Hash, EMPTY_ROOT_HASH, EMPTY_UNCLE_HASH};

    fn sample(extra: Vec<u8>) -> Header {
        Header {
            parent_hash: Hash::from_bytes([0x11; 32]),
            uncle_hash: EMPTY_UNCLE_HASH,
            coinbase: Address::from_bytes([0x9d; 20]),
            root: Hash::from_bytes([0x22; 32]),
            tx_hash: EMPTY_ROOT_HASH,
            receipt_hash: EMPTY_ROOT_HASH,
            bloom: Bloom::ZERO,
            difficulty: 2,
            number: 1000,
            gas_limit: 30_000_000,
            gas_used: 0,
            time: 1_700_000_000,
            extra: extra.into(),
            mix_digest: Hash::ZERO,
            nonce: BlockNonce::ZERO,
        }
    }

    #[test]
    fn test_seal_encoding_strips_signature() {
        let mut extra = vec![0x61; 32];
        extra.extend_from_slice(&[0xee; 65]);
        let sealed = sample(extra);
        let unsealed = sample(vec![0x61; 32]);

        assert_eq!(
            seal_encoding(&sealed).unwrap(),
            full_encoding(&unsealed).unwrap()
        );
    }

    #[test]
    fn test_integer_layout() {
        let encoded = seal_encoding(&sample(vec![0x61; 97])).unwrap();
        let hex = hex::encode(&encoded);
        // difficulty 2, number 1000, gas limit, gas used 0, time
        assert!(hex.contains("028203e88401c9c38080846553f100a0"));
        assert!(hex.starts_with("f90217a0"));
        assert_eq!(encoded.len(), 3 + 0x217);
    }

    #[test]
    fn test_short_extra_is_rejected() {
        let header = sample(vec![0x61; 64]);
        assert_eq!(
            seal_encoding(&header),
            Err(HeaderError::SignatureMissing { len: 64 })
        );
        // The full encoding has no such precondition.
        assert!(full_encoding(&header).is_ok());
    }

    #[test]
    fn test_negative_integers_are_rejected() {
        let mut header = sample(vec![0; 65]);
        header.difficulty = -1;
        assert_eq!(
            seal_encoding(&header),
            Err(HeaderError::NegativeInteger("difficulty"))
        );
        header.difficulty = 1;
        header.number = -5;
        assert_eq!(
            full_encoding(&header),
            Err(HeaderError::NegativeInteger("number"))
        );
    }

    #[test]
    fn test_rlp_decode_roundtrip() {
        let mut header = sample(vec![0x61; 97]);
        header.nonce = BlockNonce::encode(42);
        header.mix_digest = Hash::from_bytes([0x33; 32]);
        let encoded = header.rlp_bytes().unwrap();
        assert_eq!(Header::from_rlp(&encoded).unwrap(), header);
    }

    #[test]
    fn test_rlp_decode_requires_fifteen_items() {
        let mut s = RlpStream::new_list(14);
        for _ in 0..14 {
            s.append(&0u64);
        }
        assert_eq!(
            Header::from_rlp(&s.out()),
            Err(HeaderError::Rlp(DecoderError::RlpIncorrectListLen))
        );
    }

    #[test]
    fn test_rlp_decode_rejects_trailing_bytes() {
        let mut encoded = sample(vec![]).rlp_bytes().unwrap();
        encoded.push(0x80);
        assert!(matches!(
            Header::from_rlp(&encoded),
            Err(HeaderError::Rlp(_))
        ));
    }
}
