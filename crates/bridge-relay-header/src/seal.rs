//! Header authentication: seal hash, embedded signature and signer recovery.

use bridge_relay_core::{keccak256, recover_address, Address, Hash, SIGNATURE_LENGTH};

use crate::canonical::{full_encoding, seal_encoding};
use crate::error::{HeaderError, Result};
use crate::header::Header;

impl Header {
    /// Keccak-256 of the seal encoding: the message the producer signs.
    pub fn seal_hash(&self) -> Result<Hash> {
        Ok(keccak256(seal_encoding(self)?))
    }

    /// Keccak-256 of the full encoding: the block hash.
    pub fn hash(&self) -> Result<Hash> {
        Ok(keccak256(full_encoding(self)?))
    }

    /// The trailing 65-byte seal signature in extra-data.
    pub fn signature(&self) -> Result<[u8; SIGNATURE_LENGTH]> {
        let len = self.extra.len();
        if len < SIGNATURE_LENGTH {
            return Err(HeaderError::SignatureMissing { len });
        }
        let mut sig = [0u8; SIGNATURE_LENGTH];
        sig.copy_from_slice(&self.extra[len - SIGNATURE_LENGTH..]);
        Ok(sig)
    }

    /// Address of the key that sealed this header.
    pub fn recover_signer(&self) -> Result<Address> {
        let sig = self.signature()?;
        let digest = self.seal_hash()?;
        recover_address(&digest, &sig).map_err(HeaderError::SignatureRecoveryFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_relay_core::{BlockNonce, Bloom, EMPTY_ROOT_HASH, EMPTY_UNCLE_HASH};
    use proptest::prelude::*;
    use secp256k1::{Message, SecretKey, SECP256K1};

    const GOLDEN_SIG: &str = "bb50e2d89a4ed70663d080659fe0ad4b9bc3e06c17a227433966cb59ceee020d\
                              30b6fcef0f4e9b7d945aa8079d3d381f9c53c7aeaebb2e77645d539aacbeb06201";

    fn unsigned() -> Header {
        Header {
            parent_hash: Hash::from_bytes([0x11; 32]),
            uncle_hash: EMPTY_UNCLE_HASH,
            coinbase: "0x9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f".parse().unwrap(),
            root: Hash::from_bytes([0x22; 32]),
            tx_hash: EMPTY_ROOT_HASH,
            receipt_hash: EMPTY_ROOT_HASH,
            bloom: Bloom::ZERO,
            difficulty: 2,
            number: 1000,
            gas_limit: 30_000_000,
            gas_used: 0,
            time: 1_700_000_000,
            extra: vec![0x61; 32 + SIGNATURE_LENGTH].into(),
            mix_digest: Hash::ZERO,
            nonce: BlockNonce::ZERO,
        }
    }

    fn golden() -> Header {
        let mut extra = vec![0x61; 32];
        extra.extend_from_slice(&hex::decode(GOLDEN_SIG).unwrap());
        Header {
            extra: extra.into(),
            ..unsigned()
        }
    }

    fn seal(mut header: Header, key: &SecretKey) -> Header {
        let digest = header.seal_hash().unwrap();
        let sig = SECP256K1.sign_ecdsa_recoverable(&Message::from_digest(digest.0), key);
        let (id, compact) = sig.serialize_compact();
        let mut extra = header.extra[..header.extra.len() - SIGNATURE_LENGTH].to_vec();
        extra.extend_from_slice(&compact);
        extra.push(id.to_i32() as u8);
        header.extra = extra.into();
        header
    }

    #[test]
    fn test_golden_seal_hash() {
        assert_eq!(
            golden().seal_hash().unwrap().to_hex(),
            "0x18bd686567c77ef519119d606e6f9dae785ba14a9221ba6cb8684bbb89024a98"
        );
        // The signature does not feed the seal hash.
        assert_eq!(golden().seal_hash().unwrap(), unsigned().seal_hash().unwrap());
    }

    #[test]
    fn test_golden_block_hash() {
        assert_eq!(
            golden().hash().unwrap().to_hex(),
            "0x207013d6db7cd87a777a09a48e34254b4669df29e074f6c82e72a4c1b4c49237"
        );
    }

    #[test]
    fn test_golden_signer() {
        assert_eq!(
            golden().recover_signer().unwrap().to_checksum_hex(),
            "0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F"
        );
    }

    #[test]
    fn test_seal_hash_tracks_number() {
        let mut header = golden();
        header.number = 1001;
        assert_eq!(
            header.seal_hash().unwrap().to_hex(),
            "0xaa14fcbbf09552e91f0512f7471bcf553f95bd08cfa0d096d8e062b83e8428ac"
        );
    }

    #[test]
    fn test_signature_missing() {
        let mut header = golden();
        header.extra = vec![0u8; 64].into();
        assert_eq!(
            header.signature(),
            Err(HeaderError::SignatureMissing { len: 64 })
        );
        assert_eq!(
            header.recover_signer(),
            Err(HeaderError::SignatureMissing { len: 64 })
        );
    }

    #[test]
    fn test_bad_recovery_id() {
        let mut extra = golden().extra.to_vec();
        let last = extra.len() - 1;
        extra[last] = 27;
        let header = Header {
            extra: extra.into(),
            ..golden()
        };
        assert!(matches!(
            header.recover_signer(),
            Err(HeaderError::SignatureRecoveryFailed(_))
        ));
    }

    #[test]
    fn test_sign_then_recover() {
        let key = SecretKey::from_slice(&[0x46; 32]).unwrap();
        let sealed = seal(unsigned(), &key);
        assert_eq!(sealed.recover_signer().unwrap(), unsigned().coinbase);
    }

    proptest! {
        #[test]
        fn test_corrupted_signature_never_recovers_signer(
            index in 0usize..64,
            flip in 1u8..=255,
        ) {
            let header = golden();
            let mut extra = header.extra.to_vec();
            extra[32 + index] ^= flip;
            let corrupted = Header { extra: extra.into(), ..header.clone() };
            match corrupted.recover_signer() {
                Ok(addr) => prop_assert_ne!(addr, header.coinbase),
                Err(err) => prop_assert!(
                    matches!(err, HeaderError::SignatureRecoveryFailed(_)),
                    "unexpected error {:?}",
                    err
                ),
            }
        }

        #[test]
        fn test_seal_hash_is_deterministic(number in 0i64..i64::MAX, time in any::<u64>()) {
            let header = Header { number, time, ..golden() };
            prop_assert_eq!(header.seal_hash().unwrap(), header.clone().seal_hash().unwrap());
            let bumped = Header { number: number ^ 1, ..header.clone() };
            prop_assert_ne!(header.seal_hash().unwrap(), bumped.seal_hash().unwrap());
        }
    }
}
