//! Error types for header decoding and authentication.

use bridge_relay_core::CoreError;
use rlp::DecoderError;
use thiserror::Error;

/// Errors from decoding, encoding or authenticating a [`Header`](crate::Header).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("missing required field '{0}' for Header")]
    MissingField(&'static str),

    #[error("header field '{0}' does not fit in a signed 64-bit integer")]
    IntegerOverflow(&'static str),

    #[error("header field '{0}' is negative")]
    NegativeInteger(&'static str),

    #[error("extra-data missing signature suffix: {len} bytes, need at least 65")]
    SignatureMissing { len: usize },

    #[error("signature recovery failed: {0}")]
    SignatureRecoveryFailed(#[source] CoreError),

    #[error("rlp: {0}")]
    Rlp(#[from] DecoderError),

    #[error("json: {0}")]
    Json(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type Result<T> = std::result::Result<T, HeaderError>;
