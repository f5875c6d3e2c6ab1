//! # Bridge Relay
//!
//! The unified API for relaying data from a proof-of-authority side chain:
//! header authentication and cross-chain package decoding.
//!
//! ## Overview
//!
//! - **Headers**: recover the producer of a sealed header from the signature
//!   embedded in its extra-data, and check it against a trusted signer set
//! - **Packages**: route a relayed package by channel and package type to its
//!   payload variant and decode it strictly
//!
//! All operations are pure and synchronous. A [`Relay`] holds only its
//! immutable [`RelayConfig`] and may be shared freely across threads.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bridge_relay::{ChannelId, Relay, RelayConfig};
//!
//! fn example(header_json: &str, raw_package: &[u8]) -> bridge_relay::Result<()> {
//!     let relay = Relay::new(RelayConfig::default());
//!
//!     let (header, signer) = relay.authenticate_header_json(header_json)?;
//!     println!("block {} sealed by {}", header.number, signer);
//!
//!     let package = relay.decode_package(ChannelId::TRANSFER_IN, raw_package)?;
//!     println!("{:?}", package.content);
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `bridge_relay::core` - fixed-width values, hex codec, Keccak and recovery
//! - `bridge_relay::header` - headers, canonical encoding and seal hash
//! - `bridge_relay::packages` - channels, routing table and payload variants

pub mod error;
pub mod relay;

// Re-export component crates
pub use bridge_relay_core as core;
pub use bridge_relay_header as header;
pub use bridge_relay_packages as packages;

// Re-export main types for convenience
pub use error::{RelayError, Result};
pub use relay::{Relay, RelayConfig, DEFAULT_MAX_EXTRA_DATA};

// Re-export commonly used component types
pub use bridge_relay_core::{keccak256, Address, BlockNonce, Bloom, Hash};
pub use bridge_relay_header::Header;
pub use bridge_relay_packages::{
    ChannelId, ContentKind, CrossChainPackage, PackageContent, PackageType,
};
