//! Channel identifiers and package types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric identifier of a cross-chain channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub u8);

impl ChannelId {
    /// Token bind approvals.
    pub const BIND: Self = Self(1);
    /// Transfers out of the beacon chain.
    pub const TRANSFER_OUT: Self = Self(2);
    /// Transfers into the beacon chain.
    pub const TRANSFER_IN: Self = Self(3);
    /// Token mirroring.
    pub const MIRROR: Self = Self(4);
    /// Mirrored token supply sync.
    pub const MIRROR_SYNC: Self = Self(5);
    /// Validator set updates.
    pub const VALIDATOR_SET: Self = Self(8);
    /// Cross-chain parameter changes.
    pub const CROSS_PARAM: Self = Self(9);
    /// Side-chain downtime slashing.
    pub const SLASH: Self = Self(11);
    /// Cross-chain staking.
    pub const CROSS_STAKE: Self = Self(16);

    /// Short name of a registered channel.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::BIND => "bind",
            Self::TRANSFER_OUT => "transfer-out",
            Self::TRANSFER_IN => "transfer-in",
            Self::MIRROR => "mirror",
            Self::MIRROR_SYNC => "mirror-sync",
            Self::VALIDATOR_SET => "validator-set",
            Self::CROSS_PARAM => "cross-param",
            Self::SLASH => "slash",
            Self::CROSS_STAKE => "cross-stake",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", self.0, name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<u8> for ChannelId {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// Role of a package within a channel exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PackageType {
    /// Request.
    Syn = 0x00,
    /// Success acknowledgement.
    Ack = 0x01,
    /// Failure acknowledgement.
    FailAck = 0x02,
}

impl PackageType {
    /// Every package type, in wire order.
    pub const ALL: [Self; 3] = [Self::Syn, Self::Ack, Self::FailAck];

    /// Convert to the wire byte.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Try to parse the wire byte.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Syn),
            0x01 => Some(Self::Ack),
            0x02 => Some(Self::FailAck),
            _ => None,
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Syn => "Syn",
            Self::Ack => "Ack",
            Self::FailAck => "FailAck",
        };
        f.write_str(name)
    }
}
