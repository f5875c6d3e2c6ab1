//! Fixed-width chain values: [`Hash`], [`Address`], [`Bloom`], [`BlockNonce`].
//!
//! All four are plain byte arrays with byte-wise equality and ordering. Their
//! text form is `0x`-prefixed hex; parsing is strict about the prefix and the
//! exact byte length. RLP encoding is a byte string of exactly the type's
//! width.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::keccak256;
use crate::error::CoreError;
use crate::hexutil;

/// Length of a [`Hash`] in bytes.
pub const HASH_LENGTH: usize = 32;

/// Length of an [`Address`] in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Length of a [`Bloom`] in bytes.
pub const BLOOM_BYTE_LENGTH: usize = 256;

/// Length of a [`BlockNonce`] in bytes.
pub const NONCE_LENGTH: usize = 8;

macro_rules! fixed_bytes {
    ($(#[$attr:meta])* $name:ident, $len:expr) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Width of the value in bytes.
            pub const LEN: usize = $len;

            /// The all-zero value.
            pub const ZERO: Self = Self([0u8; $len]);

            /// Create from raw bytes.
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Get the raw bytes.
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Copy the bytes into a vector.
            pub fn to_vec(&self) -> Vec<u8> {
                self.0.to_vec()
            }

            /// Lowercase `0x`-prefixed hex.
            ///
            /// For an [`Address`] this is the canonical storage form; the
            /// EIP-55 text is `Address::to_checksum_hex` (also `Display`).
            pub fn to_hex(&self) -> String {
                hexutil::encode_bytes(&self.0)
            }

            /// Parse `0x`-prefixed hex that decodes to exactly the type's width.
            pub fn from_hex(s: &str) -> Result<Self, CoreError> {
                let bytes = hexutil::decode_bytes(s)?;
                if bytes.len() != $len {
                    return Err(CoreError::FixedWidthMismatch {
                        type_name: stringify!($name),
                        expected: $len,
                        got: bytes.len(),
                    });
                }
                let mut out = [0u8; $len];
                out.copy_from_slice(&bytes);
                Ok(Self(out))
            }

            /// Whether every byte is zero.
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(D::Error::custom)
            }
        }

        impl Encodable for $name {
            fn rlp_append(&self, s: &mut RlpStream) {
                s.encoder().encode_value(&self.0);
            }
        }

        impl Decodable for $name {
            fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
                rlp.decoder().decode_value(|bytes| match bytes.len().cmp(&$len) {
                    Ordering::Less => Err(DecoderError::RlpIsTooShort),
                    Ordering::Greater => Err(DecoderError::RlpIsTooBig),
                    Ordering::Equal => {
                        let mut out = [0u8; $len];
                        out.copy_from_slice(bytes);
                        Ok(Self(out))
                    }
                })
            }
        }
    };
}

/// Pad-or-truncate constructors shared by [`Hash`], [`Address`] and
/// [`BlockNonce`]: shorter input is left-padded with zeros, longer input keeps
/// its rightmost bytes.
macro_rules! right_aligned {
    ($name:ident, $len:expr) => {
        impl $name {
            /// Build from a slice of any length, keeping the rightmost bytes.
            pub fn from_slice(b: &[u8]) -> Self {
                let mut out = Self::ZERO;
                out.set_bytes(b);
                out
            }

            /// Overwrite the value from a slice of any length.
            pub fn set_bytes(&mut self, b: &[u8]) {
                let b = if b.len() > $len { &b[b.len() - $len..] } else { b };
                self.0 = [0u8; $len];
                self.0[$len - b.len()..].copy_from_slice(b);
            }
        }
    };
}

fixed_bytes!(
    /// A 32-byte Keccak-256 digest.
    Hash,
    HASH_LENGTH
);
right_aligned!(Hash, HASH_LENGTH);

fixed_bytes!(
    /// A 20-byte account address.
    Address,
    ADDRESS_LENGTH
);
right_aligned!(Address, ADDRESS_LENGTH);

fixed_bytes!(
    /// A 2048-bit log bloom filter.
    Bloom,
    BLOOM_BYTE_LENGTH
);

fixed_bytes!(
    /// An 8-byte block nonce.
    BlockNonce,
    NONCE_LENGTH
);
right_aligned!(BlockNonce, NONCE_LENGTH);

impl Hash {
    /// Big-endian integer view of the digest.
    pub fn to_big(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Address {
    /// Mixed-case checksum encoding (EIP-55).
    ///
    /// The lowercase hex digits are hashed; a letter is uppercased when the
    /// matching nibble of that hash is 8 or more.
    pub fn to_checksum_hex(&self) -> String {
        let lower = hex::encode(self.0);
        let digest = keccak256(lower.as_bytes());
        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let byte = digest.0[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Whether `s` is a 20-byte hex address, with or without `0x`.
    pub fn is_hex_address(s: &str) -> bool {
        let raw = if hexutil::has_hex_prefix(s) { &s[2..] } else { s };
        raw.len() == 2 * ADDRESS_LENGTH && raw.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum_hex())
    }
}

impl Bloom {
    /// Build from a source of at most 256 bytes, copied right-aligned.
    pub fn from_slice(b: &[u8]) -> Result<Self, CoreError> {
        if b.len() > BLOOM_BYTE_LENGTH {
            return Err(CoreError::FixedWidthMismatch {
                type_name: "Bloom",
                expected: BLOOM_BYTE_LENGTH,
                got: b.len(),
            });
        }
        let mut out = Self::ZERO;
        out.0[BLOOM_BYTE_LENGTH - b.len()..].copy_from_slice(b);
        Ok(out)
    }

    /// Big-endian integer view of the filter.
    pub fn to_big(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }

    /// Set the three bits selected by `data`.
    pub fn accrue(&mut self, data: &[u8]) {
        for (index, mask) in bloom_bits(data) {
            self.0[index] |= mask;
        }
    }

    /// Whether all three bits selected by `data` are set.
    pub fn contains(&self, data: &[u8]) -> bool {
        bloom_bits(data)
            .iter()
            .all(|(index, mask)| self.0[*index] & mask == *mask)
    }
}

/// Byte index and mask for each of the three bloom probes of `data`.
fn bloom_bits(data: &[u8]) -> [(usize, u8); 3] {
    let digest = keccak256(data);
    let mut out = [(0usize, 0u8); 3];
    for (k, slot) in out.iter_mut().enumerate() {
        let word = u16::from_be_bytes([digest.0[2 * k], digest.0[2 * k + 1]]) & 0x07ff;
        *slot = (BLOOM_BYTE_LENGTH - 1 - (word as usize >> 3), 1u8 << (word & 0x07));
    }
    out
}

impl fmt::Display for Bloom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl BlockNonce {
    /// Encode a 64-bit nonce big-endian.
    pub const fn encode(value: u64) -> Self {
        Self(value.to_be_bytes())
    }

    /// Interpret the nonce as a big-endian `u64`.
    pub fn to_u64(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }
}

impl fmt::Display for BlockNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hash_from_slice_pads_left() {
        let h = Hash::from_slice(&[0xab, 0xcd]);
        assert_eq!(&h.0[..30], &[0u8; 30]);
        assert_eq!(&h.0[30..], &[0xab, 0xcd]);
    }

    #[test]
    fn test_address_from_slice_truncates_left() {
        let long: Vec<u8> = (0u8..25).collect();
        let a = Address::from_slice(&long);
        assert_eq!(a.as_bytes().as_slice(), &long[5..]);
    }

    #[test]
    fn test_set_bytes_reapplies_padding() {
        let mut h = Hash::from_bytes([0xff; 32]);
        h.set_bytes(&[0x01]);
        assert_eq!(h, Hash::from_slice(&[0x01]));
    }

    #[test]
    fn test_from_hex_requires_exact_width() {
        let err = Hash::from_hex("0x1234").unwrap_err();
        assert_eq!(
            err,
            CoreError::FixedWidthMismatch {
                type_name: "Hash",
                expected: 32,
                got: 2
            }
        );
        assert!(Address::from_hex("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").is_err());
        assert!(Address::from_hex("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").is_ok());
    }

    #[test]
    fn test_checksum_known_vectors() {
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let addr: Address = expected.to_lowercase().parse().unwrap();
            assert_eq!(addr.to_checksum_hex(), expected);
            assert_eq!(addr.to_string(), expected);
            // Input may be any case.
            assert_eq!(expected.parse::<Address>().unwrap(), addr);
        }
    }

    #[test]
    fn test_is_hex_address() {
        assert!(Address::is_hex_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        assert!(Address::is_hex_address("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
        assert!(!Address::is_hex_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1bea"));
        assert!(!Address::is_hex_address("0xzzaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
    }

    #[test]
    fn test_ordering_is_bytewise() {
        let a = Hash::from_slice(&[0x01, 0x00]);
        let b = Hash::from_slice(&[0x00, 0xff]);
        assert!(a > b);
        assert!(Address::ZERO < Address::from_slice(&[1]));
    }

    #[test]
    fn test_bloom_from_slice() {
        let b = Bloom::from_slice(&[0x01, 0x02]).unwrap();
        assert_eq!(b.0[254], 0x01);
        assert_eq!(b.0[255], 0x02);
        assert_eq!(b.to_big(), BigUint::from(0x0102u32));

        let err = Bloom::from_slice(&[0u8; 257]).unwrap_err();
        assert!(matches!(err, CoreError::FixedWidthMismatch { got: 257, .. }));
    }

    #[test]
    fn test_bloom_accrue_known_bits() {
        let mut bloom = Bloom::ZERO;
        bloom.accrue(b"hello");
        assert_eq!(bloom.0[110], 0x04);
        assert_eq!(bloom.0[13], 0x20);
        assert_eq!(bloom.0[47], 0x20);
        assert_eq!(bloom.0.iter().filter(|b| **b != 0).count(), 3);
        assert!(bloom.contains(b"hello"));
        assert!(!Bloom::ZERO.contains(b"hello"));
    }

    #[test]
    fn test_block_nonce_u64() {
        let n = BlockNonce::encode(0x0102030405060708);
        assert_eq!(n.0, [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(n.to_u64(), 0x0102030405060708);
        assert_eq!(n.to_hex(), "0x0102030405060708");
    }

    #[test]
    fn test_json_is_lowercase_hex() {
        let addr: Address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);

        let err = serde_json::from_str::<Hash>("\"0x00\"").unwrap_err();
        assert!(err.to_string().contains("want 32 for Hash"));
    }

    #[test]
    fn test_rlp_requires_exact_width() {
        let encoded = rlp::encode(&Address::from_slice(&[7u8; 20]));
        assert_eq!(encoded[0], 0x80 + 20);
        let decoded: Address = rlp::decode(&encoded).unwrap();
        assert_eq!(decoded, Address::from_slice(&[7u8; 20]));

        let short = rlp::encode(&vec![1u8; 19]);
        assert_eq!(
            rlp::decode::<Address>(&short),
            Err(DecoderError::RlpIsTooShort)
        );
    }

    #[test]
    fn test_fixed_width_inside_list() {
        let mut s = RlpStream::new_list(2);
        s.append(&Address::ZERO).append(&1u8);
        let out = s.out().to_vec();
        let mut expected = vec![0xd6, 0x94];
        expected.extend_from_slice(&[0u8; 20]);
        expected.push(0x01);
        assert_eq!(out, expected);

        let mut s = RlpStream::new_list(4);
        s.append(&Hash::from_bytes([0x11; 32]))
            .append(&Bloom::ZERO)
            .append(&BlockNonce::encode(7))
            .append(&2u8);
        let out = s.out().to_vec();
        let rlp = Rlp::new(&out);
        let info = rlp.payload_info().unwrap();
        assert_eq!(info.header_len + info.value_len, out.len());
        assert_eq!(rlp.item_count().unwrap(), 4);
        assert_eq!(rlp.val_at::<Hash>(0).unwrap(), Hash::from_bytes([0x11; 32]));
        assert_eq!(rlp.val_at::<Bloom>(1).unwrap(), Bloom::ZERO);
        assert_eq!(rlp.val_at::<BlockNonce>(2).unwrap().to_u64(), 7);
        assert_eq!(rlp.val_at::<u8>(3).unwrap(), 2);
    }

    #[test]
    fn test_address_to_hex_is_lowercase() {
        let addr: Address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap();
        assert_eq!(addr.to_hex(), "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed");
        assert_eq!(addr.to_checksum_hex(), "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    }

    proptest! {
        #[test]
        fn test_exact_width_roundtrip(bytes in any::<[u8; 32]>()) {
            prop_assert_eq!(Hash::from_slice(&bytes).0, bytes);
        }

        #[test]
        fn test_short_input_is_suffix(bytes in prop::collection::vec(any::<u8>(), 0..20)) {
            let a = Address::from_slice(&bytes);
            prop_assert_eq!(&a.0[20 - bytes.len()..], bytes.as_slice());
            prop_assert!(a.0[..20 - bytes.len()].iter().all(|b| *b == 0));
        }

        #[test]
        fn test_long_input_keeps_rightmost(bytes in prop::collection::vec(any::<u8>(), 33..80)) {
            let tail = &bytes[bytes.len() - 32..];
            prop_assert_eq!(Hash::from_slice(&bytes), Hash::from_slice(tail));
        }

        #[test]
        fn test_hex_roundtrip(bytes in any::<[u8; 20]>()) {
            let a = Address::from_bytes(bytes);
            prop_assert_eq!(Address::from_hex(&a.to_hex()).unwrap(), a);
            prop_assert_eq!(Address::from_hex(&a.to_checksum_hex()).unwrap(), a);
        }
    }
}
