//! # Bridge Relay Header
//!
//! Proof-of-authority block headers relayed from the side chain.
//!
//! A [`Header`] decodes from the RPC JSON form or from RLP. Its seal hash is
//! Keccak-256 over the canonical encoding with the trailing signature removed
//! from extra-data; the signer is recovered from that signature. See
//! [`canonical`] for the exact byte layout.

pub mod canonical;
pub mod error;
pub mod header;
pub mod seal;

pub use canonical::{full_encoding, seal_encoding, unsealed_extra, HEADER_FIELDS};
pub use error::{HeaderError, Result};
pub use header::Header;
