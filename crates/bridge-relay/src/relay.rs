//! The Relay: authenticated intake of side-chain headers and packages.
//!
//! A [`Relay`] applies a [`RelayConfig`] policy on top of the pure codecs:
//! which signers are trusted, how much extra-data a header may carry and
//! which channels are open.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use bridge_relay_core::Address;
use bridge_relay_header::Header;
use bridge_relay_packages::{
    registry, ChannelId, CrossChainPackage, PackageContent, PackageType,
};

use crate::error::{RelayError, Result};

/// Default bound on header extra-data (1 MiB).
pub const DEFAULT_MAX_EXTRA_DATA: usize = 1 << 20;

/// Configuration for the Relay.
///
/// Every field has a default; the default configuration accepts any signer
/// and every registered channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct RelayConfig {
    /// Signers whose headers are accepted. Empty accepts any signer.
    pub trusted_signers: BTreeSet<Address>,
    /// Upper bound on extra-data length in bytes.
    pub max_extra_data: usize,
    /// Channels accepted for package decoding. `None` accepts all.
    pub allowed_channels: Option<BTreeSet<ChannelId>>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            trusted_signers: BTreeSet::new(),
            max_extra_data: DEFAULT_MAX_EXTRA_DATA,
            allowed_channels: None,
        }
    }
}

impl RelayConfig {
    /// Parse a JSON configuration document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).map_err(|e| RelayError::Config(e.to_string()))?;
        debug!(
            trusted_signers = config.trusted_signers.len(),
            max_extra_data = config.max_extra_data,
            allowed_channels = ?config.allowed_channels,
            "relay config loaded"
        );
        Ok(config)
    }

    fn channel_enabled(&self, channel: ChannelId) -> bool {
        self.allowed_channels
            .as_ref()
            .map_or(true, |allowed| allowed.contains(&channel))
    }
}

/// The main Relay struct.
///
/// Immutable after construction and safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Relay {
    config: RelayConfig,
}

impl Relay {
    /// Create a relay with the given policy.
    pub fn new(config: RelayConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Headers
    // ─────────────────────────────────────────────────────────────────────────

    /// Recover the signer of a sealed header and check it against policy.
    pub fn authenticate_header(&self, header: &Header) -> Result<Address> {
        let len = header.extra.len();
        if len > self.config.max_extra_data {
            warn!(
                number = header.number,
                len,
                max = self.config.max_extra_data,
                "header rejected: extra-data too large"
            );
            return Err(RelayError::ExtraDataTooLarge {
                len,
                max: self.config.max_extra_data,
            });
        }

        let signer = header.recover_signer().map_err(|e| {
            warn!(number = header.number, error = %e, "header rejected: signer recovery failed");
            e
        })?;

        if !self.config.trusted_signers.is_empty() && !self.config.trusted_signers.contains(&signer)
        {
            warn!(number = header.number, signer = %signer, "header rejected: untrusted signer");
            return Err(RelayError::UntrustedSigner(signer));
        }

        debug!(number = header.number, signer = %signer, "header authenticated");
        Ok(signer)
    }

    /// Parse a header from its RPC JSON form and authenticate it.
    pub fn authenticate_header_json(&self, json: &str) -> Result<(Header, Address)> {
        let header = Header::from_json_str(json)?;
        let signer = self.authenticate_header(&header)?;
        Ok((header, signer))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Packages
    // ─────────────────────────────────────────────────────────────────────────

    /// Decode a framed package received on `channel`.
    pub fn decode_package(&self, channel: ChannelId, raw: &[u8]) -> Result<CrossChainPackage> {
        self.check_channel(channel)?;
        let package = CrossChainPackage::decode(channel, raw).map_err(|e| {
            warn!(channel = %channel, error = %e, "package rejected");
            e
        })?;
        debug!(
            channel = %channel,
            package_type = %package.package_type,
            kind = %package.content.kind(),
            "package decoded"
        );
        Ok(package)
    }

    /// Decode an unframed payload routed by `(channel, package_type)`.
    pub fn decode_payload(
        &self,
        channel: ChannelId,
        package_type: PackageType,
        payload: &[u8],
    ) -> Result<PackageContent> {
        self.check_channel(channel)?;
        bridge_relay_packages::decode_content(channel, package_type, payload).map_err(|e| {
            warn!(
                channel = %channel,
                package_type = %package_type,
                error = %e,
                "payload rejected"
            );
            RelayError::from(e)
        })
    }

    /// Unregistered channels pass through so the registry reports them as
    /// unknown.
    fn check_channel(&self, channel: ChannelId) -> Result<()> {
        if registry::is_registered(channel) && !self.config.channel_enabled(channel) {
            warn!(channel = %channel, "package rejected: channel disabled");
            return Err(RelayError::ChannelDisabled(channel));
        }
        Ok(())
    }
}
