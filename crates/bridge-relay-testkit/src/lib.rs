//! # Bridge Relay Testkit
//!
//! Testing utilities for the bridge relay.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: known headers and packages with expected hashes, signers and variants
//! - **Generators**: proptest strategies for property-based testing
//! - **Fixtures**: signing keys, sealed headers and framed packages
//!
//! ## Golden Vectors
//!
//! ```rust
//! use bridge_relay_testkit::vectors::{golden_header, GOLDEN_SEAL_HASH};
//!
//! let header = golden_header();
//! assert_eq!(header.seal_hash().unwrap().to_hex(), GOLDEN_SEAL_HASH);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use bridge_relay_testkit::generators::{header_from_params, HeaderParams};
//!
//! proptest! {
//!     #[test]
//!     fn signer_is_recovered(params: HeaderParams) {
//!         let header = header_from_params(&params);
//!         prop_assert_eq!(header.recover_signer().unwrap(), params.signer.address());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use bridge_relay_testkit::fixtures::{signed_header, TestSigner};
//!
//! let signer = TestSigner::from_seed([7; 32]);
//! let header = signed_header(&signer, 42).unwrap();
//! assert_eq!(header.recover_signer().unwrap(), signer.address());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    frame, multi_signer_fixtures, sample_content, signed_header, unsealed_header, TestSigner,
};
pub use generators::{header_from_params, HeaderParams};
pub use vectors::{golden_header, package_vectors, verify_all_vectors, PackageVector};
