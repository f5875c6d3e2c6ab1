//! Error types for package decoding.

use rlp::DecoderError;
use thiserror::Error;

use crate::channel::{ChannelId, PackageType};
use crate::registry::ContentKind;

/// Errors from routing, framing or decoding a cross-chain package.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackageError {
    #[error("unknown channel {0}")]
    UnknownChannel(ChannelId),

    #[error("package type {package_type} is not supported on channel {channel}")]
    UnsupportedPackageType {
        channel: ChannelId,
        package_type: PackageType,
    },

    #[error("malformed {kind} payload: {source}")]
    MalformedPayload {
        kind: ContentKind,
        #[source]
        source: DecoderError,
    },

    #[error("package of {0} bytes is shorter than the 33-byte header")]
    PackageTooShort(usize),

    #[error("unknown package type byte {0:#04x}")]
    UnknownPackageType(u8),

    #[error("relay fee does not fit in 256 bits")]
    RelayFeeOverflow,

    #[error("{got} content cannot be sent as {expected}")]
    ContentMismatch {
        expected: ContentKind,
        got: ContentKind,
    },
}

pub type Result<T> = std::result::Result<T, PackageError>;
