//! Package framing and routed decoding.
//!
//! A relayed package is a 33-byte header followed by the RLP payload:
//!
//! ```text
//! [type: 1 byte][relay fee: 32 bytes big-endian][payload ...]
//! ```
//!
//! The channel is not part of the bytes; it arrives alongside them.

use num_bigint::BigUint;

use bridge_relay_core::codec::big_to_bytes;

use crate::channel::{ChannelId, PackageType};
use crate::content::PackageContent;
use crate::error::{PackageError, Result};
use crate::registry::resolve;

/// Length of the framing header.
pub const PACKAGE_HEADER_LENGTH: usize = 33;

const RELAY_FEE_LENGTH: usize = 32;

/// The framing header of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageHeader {
    pub package_type: PackageType,
    pub relay_fee: BigUint,
}

impl PackageHeader {
    /// Serialize the header.
    ///
    /// Fails with [`PackageError::RelayFeeOverflow`] if the fee needs more
    /// than 32 bytes.
    pub fn encode(&self) -> Result<[u8; PACKAGE_HEADER_LENGTH]> {
        let fee = big_to_bytes(&self.relay_fee);
        if fee.len() > RELAY_FEE_LENGTH {
            return Err(PackageError::RelayFeeOverflow);
        }
        let mut out = [0u8; PACKAGE_HEADER_LENGTH];
        out[0] = self.package_type.to_u8();
        out[PACKAGE_HEADER_LENGTH - fee.len()..].copy_from_slice(&fee);
        Ok(out)
    }

    /// Split `raw` into its header and payload.
    pub fn decode(raw: &[u8]) -> Result<(Self, &[u8])> {
        if raw.len() < PACKAGE_HEADER_LENGTH {
            return Err(PackageError::PackageTooShort(raw.len()));
        }
        let package_type =
            PackageType::from_u8(raw[0]).ok_or(PackageError::UnknownPackageType(raw[0]))?;
        let relay_fee = BigUint::from_bytes_be(&raw[1..PACKAGE_HEADER_LENGTH]);
        Ok((
            Self {
                package_type,
                relay_fee,
            },
            &raw[PACKAGE_HEADER_LENGTH..],
        ))
    }
}

/// Decode a payload routed by `(channel, package_type)`.
///
/// Unknown channels fail with [`PackageError::UnknownChannel`], combinations
/// outside the protocol with [`PackageError::UnsupportedPackageType`], and
/// payloads that do not parse as the routed variant with
/// [`PackageError::MalformedPayload`].
pub fn decode_content(
    channel: ChannelId,
    package_type: PackageType,
    payload: &[u8],
) -> Result<PackageContent> {
    let kind = resolve(channel, package_type)?;
    PackageContent::decode(kind, payload)
}

/// A fully decoded cross-chain package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossChainPackage {
    pub channel: ChannelId,
    pub package_type: PackageType,
    pub relay_fee: BigUint,
    pub content: PackageContent,
}

impl CrossChainPackage {
    /// Decode a framed package received on `channel`.
    pub fn decode(channel: ChannelId, raw: &[u8]) -> Result<Self> {
        let (header, payload) = PackageHeader::decode(raw)?;
        let content = decode_content(channel, header.package_type, payload)?;
        Ok(Self {
            channel,
            package_type: header.package_type,
            relay_fee: header.relay_fee,
            content,
        })
    }

    /// Frame the package for sending.
    ///
    /// The content variant must be the one routed for the channel and type.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let expected = resolve(self.channel, self.package_type)?;
        let got = self.content.kind();
        if expected != got {
            return Err(PackageError::ContentMismatch { expected, got });
        }
        let header = PackageHeader {
            package_type: self.package_type,
            relay_fee: self.relay_fee.clone(),
        }
        .encode()?;
        let mut out = header.to_vec();
        out.extend_from_slice(&self.content.encode());
        Ok(out)
    }
}
