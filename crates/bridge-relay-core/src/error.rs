//! Error types for the relay core.

use thiserror::Error;

/// Failures of the strict `0x` hex decoder.
///
/// This is a closed set: every malformed input maps to exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("empty hex string")]
    EmptyString,

    #[error("hex string without 0x prefix")]
    MissingPrefix,

    #[error("hex string \"0x\"")]
    EmptyNumber,

    #[error("hex number with leading zero digits")]
    LeadingZero,

    #[error("hex number > 64 bits")]
    Uint64Range,

    #[error("invalid hex string")]
    Syntax,

    #[error("hex string of odd length")]
    OddLength,
}

/// Core errors for fixed-width values and signature recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(transparent)]
    Hex(#[from] HexError),

    #[error("hex string has length {got}, want {expected} for {type_name}")]
    FixedWidthMismatch {
        type_name: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("public key recovery failed")]
    RecoveryFailed,
}
