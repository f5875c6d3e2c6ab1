//! The package routing table.
//!
//! Each registered channel maps every [`PackageType`] either to the content
//! variant its payload carries or to [`Route::Impossible`], meaning the
//! combination is not part of the protocol. The table is static data; any edit
//! is a protocol change and must bump [`REGISTRY_VERSION`].

use std::fmt;

use crate::channel::{ChannelId, PackageType};
use crate::error::PackageError;

/// Version of the routing table below.
pub const REGISTRY_VERSION: u32 = 1;

/// The closed set of payload shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    ApproveBindSyn,
    BindSyn,
    TransferOutRefund,
    TransferOutSyn,
    TransferInSyn,
    MirrorSyn,
    MirrorSyncSyn,
    CommonAck,
    IbcValidatorSet,
    CrossParamChange,
    SideDowntimeSlash,
    CrossStakeSynFromBsc,
    CrossStakeRefund,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One cell of the routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The payload decodes as this variant.
    Content(ContentKind),
    /// The combination never occurs on the wire.
    Impossible,
}

struct ChannelRoutes {
    channel: ChannelId,
    syn: Route,
    ack: Route,
    fail_ack: Route,
}

use ContentKind as K;
use Route::{Content as C, Impossible as X};

#[rustfmt::skip]
const TABLE: [ChannelRoutes; 9] = [
    ChannelRoutes { channel: ChannelId::BIND,          syn: C(K::ApproveBindSyn),       ack: X,                         fail_ack: C(K::BindSyn) },
    ChannelRoutes { channel: ChannelId::TRANSFER_OUT,  syn: X,                          ack: C(K::TransferOutRefund),   fail_ack: C(K::TransferOutSyn) },
    ChannelRoutes { channel: ChannelId::TRANSFER_IN,   syn: C(K::TransferInSyn),        ack: X,                         fail_ack: X },
    ChannelRoutes { channel: ChannelId::MIRROR,        syn: C(K::MirrorSyn),            ack: X,                         fail_ack: X },
    ChannelRoutes { channel: ChannelId::MIRROR_SYNC,   syn: C(K::MirrorSyncSyn),        ack: X,                         fail_ack: X },
    ChannelRoutes { channel: ChannelId::VALIDATOR_SET, syn: X,                          ack: C(K::CommonAck),           fail_ack: C(K::IbcValidatorSet) },
    ChannelRoutes { channel: ChannelId::CROSS_PARAM,   syn: X,                          ack: C(K::CommonAck),           fail_ack: C(K::CrossParamChange) },
    ChannelRoutes { channel: ChannelId::SLASH,         syn: C(K::SideDowntimeSlash),    ack: X,                         fail_ack: X },
    ChannelRoutes { channel: ChannelId::CROSS_STAKE,   syn: C(K::CrossStakeSynFromBsc), ack: C(K::CrossStakeRefund),    fail_ack: X },
];

/// Look up a cell. `None` means the channel is not registered.
pub fn route(channel: ChannelId, package_type: PackageType) -> Option<Route> {
    TABLE
        .iter()
        .find(|entry| entry.channel == channel)
        .map(|entry| match package_type {
            PackageType::Syn => entry.syn,
            PackageType::Ack => entry.ack,
            PackageType::FailAck => entry.fail_ack,
        })
}

/// Resolve a cell to its content variant or the matching error.
pub fn resolve(channel: ChannelId, package_type: PackageType) -> Result<ContentKind, PackageError> {
    match route(channel, package_type) {
        None => Err(PackageError::UnknownChannel(channel)),
        Some(Route::Impossible) => Err(PackageError::UnsupportedPackageType {
            channel,
            package_type,
        }),
        Some(Route::Content(kind)) => Ok(kind),
    }
}

/// Registered channels in ascending order.
pub fn registered_channels() -> impl Iterator<Item = ChannelId> {
    TABLE.iter().map(|entry| entry.channel)
}

/// Whether `channel` has an entry in the table.
pub fn is_registered(channel: ChannelId) -> bool {
    registered_channels().any(|c| c == channel)
}
