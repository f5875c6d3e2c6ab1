//! # Bridge Relay Packages
//!
//! Decoding of cross-chain packages relayed over numbered channels.
//!
//! A package is routed by `(channel, package type)` through a static table
//! ([`registry`]) to one of a closed set of content variants ([`content`]).
//! Combinations outside the table are errors, never defaults.
//!
//! ## Key Types
//!
//! - [`ChannelId`] and [`PackageType`] - the routing key
//! - [`ContentKind`] and [`Route`] - table cells
//! - [`PackageContent`] - a decoded payload
//! - [`CrossChainPackage`] - framing header plus decoded payload

pub mod channel;
pub mod content;
pub mod error;
pub mod package;
pub mod registry;

pub use channel::{ChannelId, PackageType};
pub use content::{
    ApproveBindSyn, BindSyn, CommonAck, CrossParamChange, CrossStakeEventType, CrossStakeRefund,
    CrossStakeSynFromBsc, IbcValidator, IbcValidatorSet, MirrorSyn, MirrorSyncSyn, PackageContent,
    SideDowntimeSlash, TokenSymbol, TransferInSyn, TransferOutRefund, TransferOutSyn,
};
pub use error::{PackageError, Result};
pub use package::{decode_content, CrossChainPackage, PackageHeader, PACKAGE_HEADER_LENGTH};
pub use registry::{
    registered_channels, resolve, route, ContentKind, Route, REGISTRY_VERSION,
};
