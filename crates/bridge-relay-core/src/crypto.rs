//! Keccak-256 hashing and secp256k1 public-key recovery.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, SECP256K1};
use sha3::{Digest, Keccak256};

use crate::error::CoreError;
use crate::types::{Address, Hash};

/// Length of a recoverable signature: `R || S || V`.
pub const SIGNATURE_LENGTH: usize = 65;

/// Keccak-256 of RLP([]), the uncle hash of a block without uncles.
pub const EMPTY_UNCLE_HASH: Hash = Hash([
    0x1d, 0xcc, 0x4d, 0xe8, 0xde, 0xc7, 0x5d, 0x7a, 0xab, 0x85, 0xb5, 0x67, 0xb6, 0xcc, 0xd4, 0x1a,
    0xd3, 0x12, 0x45, 0x1b, 0x94, 0x8a, 0x74, 0x13, 0xf0, 0xa1, 0x42, 0xfd, 0x40, 0xd4, 0x93, 0x47,
]);

/// Root of an empty Merkle-Patricia trie.
pub const EMPTY_ROOT_HASH: Hash = Hash([
    0x56, 0xe8, 0x1f, 0x17, 0x1b, 0xcc, 0x55, 0xa6, 0xff, 0x83, 0x45, 0xe6, 0x92, 0xc0, 0xf8, 0x6e,
    0x5b, 0x48, 0xe0, 0x1b, 0x99, 0x6c, 0xad, 0xc0, 0x01, 0x62, 0x2f, 0xb5, 0xe3, 0x63, 0xb4, 0x21,
]);

/// Keccak-256 of `data`.
pub fn keccak256(data: impl AsRef<[u8]>) -> Hash {
    Hash(Keccak256::digest(data.as_ref()).into())
}

/// Recover the uncompressed public key (`0x04 || X || Y`) that produced `sig`
/// over `digest`.
///
/// `sig[64]` is the recovery id and must be in `0..=3`.
pub fn recover_public_key(
    digest: &Hash,
    sig: &[u8; SIGNATURE_LENGTH],
) -> Result<[u8; 65], CoreError> {
    let v = sig[64];
    let recovery_id =
        RecoveryId::from_i32(i32::from(v)).map_err(|_| CoreError::InvalidRecoveryId(v))?;
    let signature = RecoverableSignature::from_compact(&sig[..64], recovery_id)
        .map_err(|_| CoreError::RecoveryFailed)?;
    let message = Message::from_digest(digest.0);
    let public = SECP256K1
        .recover_ecdsa(&message, &signature)
        .map_err(|_| CoreError::RecoveryFailed)?;
    Ok(public.serialize_uncompressed())
}

/// Address of an uncompressed public key: the last 20 bytes of
/// `keccak256(X || Y)`.
pub fn public_key_to_address(public: &[u8; 65]) -> Address {
    Address::from_slice(&keccak256(&public[1..]).0[12..])
}

/// Recover the signing address of `sig` over `digest`.
pub fn recover_address(digest: &Hash, sig: &[u8; SIGNATURE_LENGTH]) -> Result<Address, CoreError> {
    recover_public_key(digest, sig).map(|public| public_key_to_address(&public))
}
