//! Error types for the relay facade.

use bridge_relay_core::{Address, CoreError};
use bridge_relay_header::HeaderError;
use bridge_relay_packages::{ChannelId, PackageError};
use thiserror::Error;

/// Errors that can occur during relay operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Header decoding or authentication failed.
    #[error("header error: {0}")]
    Header(#[from] HeaderError),

    /// Package routing or decoding failed.
    #[error("package error: {0}")]
    Package(#[from] PackageError),

    /// Value decoding failed.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// The header was sealed by a key outside the trusted set.
    #[error("untrusted signer {0}")]
    UntrustedSigner(Address),

    /// Extra-data exceeds the configured bound.
    #[error("extra-data of {len} bytes exceeds limit of {max}")]
    ExtraDataTooLarge { len: usize, max: usize },

    /// The channel is registered but not enabled by configuration.
    #[error("channel {0} is disabled")]
    ChannelDisabled(ChannelId),

    /// The configuration document could not be parsed.
    #[error("invalid config: {0}")]
    Config(String),
}

/// Result type for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
