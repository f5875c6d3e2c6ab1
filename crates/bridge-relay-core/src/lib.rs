//! # Bridge Relay Core
//!
//! Pure primitives for relaying and authenticating side-chain data: fixed-width
//! chain values, the strict hex codec, Keccak-256 and secp256k1 public-key
//! recovery.
//!
//! This crate contains no I/O and keeps no state.
//!
//! ## Key Types
//!
//! - [`Hash`] - 32-byte Keccak-256 digest
//! - [`Address`] - 20-byte account address with EIP-55 checksum text
//! - [`Bloom`] - 2048-bit log bloom
//! - [`BlockNonce`] - 8-byte block nonce
//!
//! ## Encoding
//!
//! Text encoding is strict `0x` hex, see [`hexutil`]. Binary encoding is RLP;
//! every fixed-width type implements `rlp::Encodable` and `rlp::Decodable`,
//! and [`codec`] holds the big-integer and arity helpers.

pub mod codec;
pub mod crypto;
pub mod error;
pub mod hexutil;
pub mod types;

pub use crypto::{
    keccak256, public_key_to_address, recover_address, recover_public_key, EMPTY_ROOT_HASH,
    EMPTY_UNCLE_HASH, SIGNATURE_LENGTH,
};
pub use error::{CoreError, HexError};
pub use hexutil::{HexBig, HexBytes, HexU64};
pub use types::{
    Address, BlockNonce, Bloom, Hash, ADDRESS_LENGTH, BLOOM_BYTE_LENGTH, HASH_LENGTH, NONCE_LENGTH,
};
