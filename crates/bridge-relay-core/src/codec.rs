//! Strict RLP helpers shared by the header and package codecs.
//!
//! The `rlp` crate already rejects non-canonical integers for the primitive
//! unsigned types. These helpers add the same discipline for big integers,
//! exact list arity and trailing input.

use num_bigint::BigUint;
use num_traits::Zero;
use rlp::{Decodable, DecoderError, Rlp, RlpStream};

/// Check that `rlp` is a list with exactly `n` items.
pub fn expect_fields(rlp: &Rlp, n: usize) -> Result<(), DecoderError> {
    if !rlp.is_list() {
        return Err(DecoderError::RlpExpectedToBeList);
    }
    if rlp.item_count()? != n {
        return Err(DecoderError::RlpIncorrectListLen);
    }
    Ok(())
}

/// Decode a big-endian unsigned integer with no leading zero bytes.
pub fn decode_big(rlp: &Rlp) -> Result<BigUint, DecoderError> {
    rlp.decoder().decode_value(|bytes| match bytes.first() {
        Some(0) => Err(DecoderError::RlpInvalidIndirection),
        _ => Ok(BigUint::from_bytes_be(bytes)),
    })
}

/// Decode the big integer at list position `index`.
pub fn big_at(rlp: &Rlp, index: usize) -> Result<BigUint, DecoderError> {
    decode_big(&rlp.at(index)?)
}

/// Decode the list of big integers at list position `index`.
pub fn big_list_at(rlp: &Rlp, index: usize) -> Result<Vec<BigUint>, DecoderError> {
    let list = rlp.at(index)?;
    if !list.is_list() {
        return Err(DecoderError::RlpExpectedToBeList);
    }
    list.iter().map(|item| decode_big(&item)).collect()
}

/// Big integer as minimal big-endian bytes; zero is the empty string.
pub fn big_to_bytes(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

/// Append a big integer in canonical form.
pub fn append_big(s: &mut RlpStream, value: &BigUint) {
    s.append(&big_to_bytes(value));
}

/// Append a list of big integers.
pub fn append_big_list(s: &mut RlpStream, values: &[BigUint]) {
    s.begin_list(values.len());
    for value in values {
        append_big(s, value);
    }
}

/// Decode exactly one item from `bytes`; trailing input is an error.
pub fn decode_exact<T: Decodable>(bytes: &[u8]) -> Result<T, DecoderError> {
    let rlp = Rlp::new(bytes);
    let info = rlp.payload_info()?;
    if info.header_len + info.value_len != bytes.len() {
        return Err(DecoderError::Custom("trailing bytes after rlp item"));
    }
    rlp.as_val()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair(u64, BigUint);

    impl rlp::Encodable for Pair {
        fn rlp_append(&self, s: &mut RlpStream) {
            s.begin_list(2);
            s.append(&self.0);
            append_big(s, &self.1);
        }
    }

    impl Decodable for Pair {
        fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
            expect_fields(rlp, 2)?;
            Ok(Pair(rlp.val_at(0)?, big_at(rlp, 1)?))
        }
    }

    #[test]
    fn test_big_zero_is_empty_string() {
        let mut s = RlpStream::new();
        append_big(&mut s, &BigUint::zero());
        assert_eq!(s.out().to_vec(), vec![0x80]);

        let mut s = RlpStream::new();
        append_big(&mut s, &BigUint::from(1000u32));
        assert_eq!(s.out().to_vec(), vec![0x82, 0x03, 0xe8]);
    }

    #[test]
    fn test_big_rejects_leading_zero() {
        let rlp = Rlp::new(&[0x82, 0x00, 0x01]);
        assert_eq!(decode_big(&rlp), Err(DecoderError::RlpInvalidIndirection));
        let rlp = Rlp::new(&[0x00]);
        assert_eq!(decode_big(&rlp), Err(DecoderError::RlpInvalidIndirection));
    }

    #[test]
    fn test_expect_fields() {
        let encoded = rlp::encode(&Pair(7, BigUint::from(300u32)));
        let pair: Pair = decode_exact(&encoded).unwrap();
        assert_eq!(pair.0, 7);
        assert_eq!(pair.1, BigUint::from(300u32));

        // Three items where two are expected.
        let mut s = RlpStream::new_list(3);
        s.append(&1u64).append(&2u64).append(&3u64);
        assert_eq!(
            decode_exact::<Pair>(&s.out()).err(),
            Some(DecoderError::RlpIncorrectListLen)
        );

        // A string where a list is expected.
        assert_eq!(
            decode_exact::<Pair>(&[0x83, 1, 2, 3]).err(),
            Some(DecoderError::RlpExpectedToBeList)
        );
    }

    #[test]
    fn test_decode_exact_rejects_trailing_bytes() {
        let mut encoded = rlp::encode(&Pair(1, BigUint::from(2u32))).to_vec();
        encoded.push(0x00);
        assert!(decode_exact::<Pair>(&encoded).is_err());
        assert!(decode_exact::<Pair>(&[]).is_err());
    }

    #[test]
    fn test_big_list() {
        let mut s = RlpStream::new_list(1);
        append_big_list(&mut s, &[BigUint::from(100_000_000u32), BigUint::from(5u32)]);
        let out = s.out();
        let rlp = Rlp::new(&out);
        let values = big_list_at(&rlp, 0).unwrap();
        assert_eq!(values, vec![BigUint::from(100_000_000u32), BigUint::from(5u32)]);
    }
}
