//! Strict `0x`-prefixed hex codec for byte strings and integers.
//!
//! The decoder accepts only the canonical text form used on the wire:
//! - a `0x` or `0X` prefix is mandatory
//! - integers carry no redundant leading zero digits (`0x0` is the only
//!   form of zero)
//! - byte strings have an even number of digits
//!
//! Every failure maps to one [`HexError`] kind. Encoding is the inverse and
//! always emits lowercase digits.

use std::fmt;

use bytes::Bytes;
use num_bigint::BigUint;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::HexError;

/// Whether `input` starts with `0x` or `0X`.
pub fn has_hex_prefix(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X')
}

fn strip_prefix(input: &str) -> Result<&str, HexError> {
    if input.is_empty() {
        return Err(HexError::EmptyString);
    }
    if !has_hex_prefix(input) {
        return Err(HexError::MissingPrefix);
    }
    Ok(&input[2..])
}

/// Validate the numeric part of a hex integer and return it without prefix.
fn check_number(input: &str) -> Result<&str, HexError> {
    let raw = strip_prefix(input)?;
    if raw.is_empty() {
        return Err(HexError::EmptyNumber);
    }
    if raw.len() > 1 && raw.starts_with('0') {
        return Err(HexError::LeadingZero);
    }
    if !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HexError::Syntax);
    }
    Ok(raw)
}

/// Decode a `0x`-prefixed hex byte string. `"0x"` decodes to no bytes.
pub fn decode_bytes(input: &str) -> Result<Vec<u8>, HexError> {
    let raw = strip_prefix(input)?;
    if !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HexError::Syntax);
    }
    if raw.len() % 2 != 0 {
        return Err(HexError::OddLength);
    }
    hex::decode(raw).map_err(|_| HexError::Syntax)
}

/// Encode bytes as `0x` followed by lowercase hex.
pub fn encode_bytes(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode a hex integer that must fit in 64 bits.
pub fn decode_uint64(input: &str) -> Result<u64, HexError> {
    let raw = check_number(input)?;
    if raw.len() > 16 {
        return Err(HexError::Uint64Range);
    }
    u64::from_str_radix(raw, 16).map_err(|_| HexError::Syntax)
}

/// Encode a 64-bit integer with the minimal number of hex digits.
pub fn encode_uint64(value: u64) -> String {
    format!("0x{:x}", value)
}

/// Decode an arbitrary-precision non-negative hex integer.
pub fn decode_big(input: &str) -> Result<BigUint, HexError> {
    let raw = check_number(input)?;
    BigUint::parse_bytes(raw.as_bytes(), 16).ok_or(HexError::Syntax)
}

/// Encode a big integer with the minimal number of hex digits.
pub fn encode_big(value: &BigUint) -> String {
    format!("0x{:x}", value)
}

/// A `u64` that serializes as a hex quantity (`"0x1a"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HexU64(pub u64);

impl fmt::Display for HexU64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_uint64(self.0))
    }
}

impl From<u64> for HexU64 {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Serialize for HexU64 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_uint64(self.0))
    }
}

impl<'de> Deserialize<'de> for HexU64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode_uint64(&s).map(Self).map_err(D::Error::custom)
    }
}

/// A big integer that serializes as a hex quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HexBig(pub BigUint);

impl fmt::Display for HexBig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_big(&self.0))
    }
}

impl From<BigUint> for HexBig {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl Serialize for HexBig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_big(&self.0))
    }
}

impl<'de> Deserialize<'de> for HexBig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode_big(&s).map(Self).map_err(D::Error::custom)
    }
}

/// A byte string that serializes as `0x`-prefixed hex.
///
/// An empty JSON string is accepted as an empty byte string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HexBytes(pub Bytes);

impl fmt::Display for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_bytes(&self.0))
    }
}

impl From<Bytes> for HexBytes {
    fn from(value: Bytes) -> Self {
        Self(value)
    }
}

impl From<Vec<u8>> for HexBytes {
    fn from(value: Vec<u8>) -> Self {
        Self(Bytes::from(value))
    }
}

impl Serialize for HexBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_bytes(&self.0))
    }
}

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(Self::default());
        }
        decode_bytes(&s).map(Self::from).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_uint64_error_kinds() {
        assert_eq!(decode_uint64(""), Err(HexError::EmptyString));
        assert_eq!(decode_uint64("1234"), Err(HexError::MissingPrefix));
        assert_eq!(decode_uint64("0x"), Err(HexError::EmptyNumber));
        assert_eq!(decode_uint64("0x01"), Err(HexError::LeadingZero));
        assert_eq!(decode_uint64("0xg"), Err(HexError::Syntax));
        assert_eq!(decode_uint64("0x+1"), Err(HexError::Syntax));
        assert_eq!(decode_uint64("0x10000000000000000"), Err(HexError::Uint64Range));
    }

    #[test]
    fn test_decode_uint64_valid() {
        assert_eq!(decode_uint64("0x0"), Ok(0));
        assert_eq!(decode_uint64("0xff"), Ok(255));
        assert_eq!(decode_uint64("0XFF"), Ok(255));
        assert_eq!(decode_uint64("0xffffffffffffffff"), Ok(u64::MAX));
    }

    #[test]
    fn test_encode_uint64() {
        assert_eq!(encode_uint64(0), "0x0");
        assert_eq!(encode_uint64(255), "0xff");
        assert_eq!(encode_uint64(0x1122334455), "0x1122334455");
    }

    #[test]
    fn test_decode_big() {
        let v = decode_big("0x10000000000000000").unwrap();
        assert_eq!(v, BigUint::from(u64::MAX) + 1u32);
        assert_eq!(decode_big("0x0").unwrap(), BigUint::from(0u32));
        assert_eq!(decode_big("0x00"), Err(HexError::LeadingZero));
        assert_eq!(decode_big("0x1_0"), Err(HexError::Syntax));
        assert_eq!(decode_big("10"), Err(HexError::MissingPrefix));
    }

    #[test]
    fn test_encode_big() {
        assert_eq!(encode_big(&BigUint::from(0u32)), "0x0");
        assert_eq!(encode_big(&(BigUint::from(1u32) << 64u32)), "0x10000000000000000");
    }

    #[test]
    fn test_decode_bytes() {
        assert_eq!(decode_bytes("0x"), Ok(vec![]));
        assert_eq!(decode_bytes("0x00ff"), Ok(vec![0x00, 0xff]));
        assert_eq!(decode_bytes("0xABcd"), Ok(vec![0xab, 0xcd]));
        assert_eq!(decode_bytes(""), Err(HexError::EmptyString));
        assert_eq!(decode_bytes("00ff"), Err(HexError::MissingPrefix));
        assert_eq!(decode_bytes("0x0"), Err(HexError::OddLength));
        assert_eq!(decode_bytes("0x0g"), Err(HexError::Syntax));
        // Syntax wins over odd length.
        assert_eq!(decode_bytes("0xzzz"), Err(HexError::Syntax));
    }

    #[test]
    fn test_hex_newtypes_json() {
        let n: HexU64 = serde_json::from_str("\"0x2a\"").unwrap();
        assert_eq!(n, HexU64(42));
        assert_eq!(serde_json::to_string(&n).unwrap(), "\"0x2a\"");

        let err = serde_json::from_str::<HexU64>("\"0x02a\"").unwrap_err();
        assert!(err.to_string().contains("leading zero"));

        let b: HexBytes = serde_json::from_str("\"\"").unwrap();
        assert!(b.0.is_empty());
        let b: HexBytes = serde_json::from_str("\"0xdead\"").unwrap();
        assert_eq!(b.to_string(), "0xdead");

        let big: HexBig = serde_json::from_str("\"0x3b9aca00\"").unwrap();
        assert_eq!(big.0, BigUint::from(1_000_000_000u64));
    }

    proptest! {
        #[test]
        fn test_uint64_roundtrip(v: u64) {
            let text = encode_uint64(v);
            prop_assert!(text.len() == 3 || !text.starts_with("0x0"));
            prop_assert_eq!(decode_uint64(&text), Ok(v));
        }

        #[test]
        fn test_big_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..=64)) {
            let v = BigUint::from_bytes_be(&bytes);
            let text = encode_big(&v);
            prop_assert!(text.len() == 3 || !text.starts_with("0x0"));
            prop_assert_eq!(decode_big(&text), Ok(v));
        }

        #[test]
        fn test_bytes_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..=64)) {
            prop_assert_eq!(decode_bytes(&encode_bytes(&bytes)), Ok(bytes));
        }
    }
}
