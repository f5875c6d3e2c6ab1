//! Package content variants and their RLP payload codec.
//!
//! Every payload is a single RLP list whose items follow the struct's field
//! order. Decoding is strict: the list arity must match, integers must be
//! canonical and fixed-size values must have their exact width.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use num_bigint::BigUint;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

use bridge_relay_core::codec::{append_big, decode_big, decode_exact, expect_fields};
use bridge_relay_core::Address;

use crate::error::{PackageError, Result};
use crate::registry::ContentKind;

/// Width of a [`TokenSymbol`].
pub const TOKEN_SYMBOL_LENGTH: usize = 32;

/// A token symbol in a fixed 32-byte field, NUL padded on the right.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenSymbol(pub [u8; TOKEN_SYMBOL_LENGTH]);

impl TokenSymbol {
    /// Pad `symbol` into the fixed field. Returns `None` if it is longer than
    /// 32 bytes.
    pub fn new(symbol: &str) -> Option<Self> {
        let bytes = symbol.as_bytes();
        if bytes.len() > TOKEN_SYMBOL_LENGTH {
            return None;
        }
        let mut out = [0u8; TOKEN_SYMBOL_LENGTH];
        out[..bytes.len()].copy_from_slice(bytes);
        Some(Self(out))
    }

    /// The symbol text with trailing NULs removed.
    pub fn as_str(&self) -> Cow<'_, str> {
        let end = self
            .0
            .iter()
            .rposition(|b| *b != 0)
            .map_or(0, |last| last + 1);
        String::from_utf8_lossy(&self.0[..end])
    }
}

impl Default for TokenSymbol {
    fn default() -> Self {
        Self([0u8; TOKEN_SYMBOL_LENGTH])
    }
}

impl fmt::Debug for TokenSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenSymbol({:?})", self.as_str())
    }
}

impl fmt::Display for TokenSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl Encodable for TokenSymbol {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.encoder().encode_value(&self.0);
    }
}

impl Decodable for TokenSymbol {
    fn decode(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
        rlp.decoder().decode_value(|bytes| {
            if bytes.len() != TOKEN_SYMBOL_LENGTH {
                return Err(DecoderError::Custom("token symbol must be 32 bytes"));
            }
            let mut out = [0u8; TOKEN_SYMBOL_LENGTH];
            out.copy_from_slice(bytes);
            Ok(Self(out))
        })
    }
}

/// Kind of a cross-stake event, carried as the first payload byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CrossStakeEventType {
    Delegate = 0x01,
    Undelegate = 0x02,
    Redelegate = 0x03,
    DistributeReward = 0x04,
    DistributeUndelegated = 0x05,
}

impl CrossStakeEventType {
    /// Convert to the wire byte.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Try to parse the wire byte.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Delegate),
            0x02 => Some(Self::Undelegate),
            0x03 => Some(Self::Redelegate),
            0x04 => Some(Self::DistributeReward),
            0x05 => Some(Self::DistributeUndelegated),
            _ => None,
        }
    }
}

/// A value that can appear as one item of a payload list.
trait PayloadField: Sized {
    fn append_field(&self, s: &mut RlpStream);
    fn decode_field(rlp: &Rlp) -> std::result::Result<Self, DecoderError>;
}

macro_rules! rlp_field {
    ($($ty:ty),+) => {
        $(
            impl PayloadField for $ty {
                fn append_field(&self, s: &mut RlpStream) {
                    s.append(self);
                }

                fn decode_field(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
                    rlp.as_val()
                }
            }
        )+
    };
}

rlp_field!(u8, u16, u32, u64, String, Address, TokenSymbol);

impl PayloadField for BigUint {
    fn append_field(&self, s: &mut RlpStream) {
        append_big(s, self);
    }

    fn decode_field(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
        decode_big(rlp)
    }
}

impl PayloadField for Bytes {
    fn append_field(&self, s: &mut RlpStream) {
        s.append(&self.to_vec());
    }

    fn decode_field(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
        rlp.as_val::<Vec<u8>>().map(Bytes::from)
    }
}

impl<T: PayloadField> PayloadField for Vec<T> {
    fn append_field(&self, s: &mut RlpStream) {
        s.begin_list(self.len());
        for item in self {
            item.append_field(s);
        }
    }

    fn decode_field(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
        if !rlp.is_list() {
            return Err(DecoderError::RlpExpectedToBeList);
        }
        rlp.iter().map(|item| T::decode_field(&item)).collect()
    }
}

/// Declare a payload struct whose RLP form is the list of its fields.
macro_rules! payload {
    ($(#[$attr:meta])* $name:ident { $($(#[$fattr:meta])* $field:ident : $ty:ty),+ $(,)? }) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            $($(#[$fattr])* pub $field: $ty),+
        }

        impl $name {
            const FIELDS: usize = [$(stringify!($field)),+].len();
        }

        impl Encodable for $name {
            fn rlp_append(&self, s: &mut RlpStream) {
                s.begin_list(Self::FIELDS);
                $(self.$field.append_field(s);)+
            }
        }

        impl Decodable for $name {
            fn decode(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
                expect_fields(rlp, Self::FIELDS)?;
                let mut items = rlp.iter();
                Ok(Self {
                    $($field: <$ty as PayloadField>::decode_field(
                        &items.next().ok_or(DecoderError::RlpIncorrectListLen)?,
                    )?),+
                })
            }
        }

        impl PayloadField for $name {
            fn append_field(&self, s: &mut RlpStream) {
                s.append(self);
            }

            fn decode_field(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
                rlp.as_val()
            }
        }
    };
}

payload!(
    /// Approval of a token bind request.
    ApproveBindSyn {
        status: u32,
        symbol: TokenSymbol,
    }
);

payload!(
    /// A bind request bounced back to the beacon chain.
    BindSyn {
        bind_type: u8,
        symbol: TokenSymbol,
        contract: Address,
        total_supply: BigUint,
        peggy_amount: BigUint,
        decimals: u8,
        expire_time: u64,
    }
);

payload!(
    /// Refund of a failed outbound transfer.
    TransferOutRefund {
        symbol: TokenSymbol,
        refund_amount: BigUint,
        /// Beacon-chain account bytes.
        refund_address: Bytes,
        refund_reason: u32,
    }
);

payload!(
    /// An outbound transfer bounced back to the beacon chain.
    TransferOutSyn {
        symbol: TokenSymbol,
        contract: Address,
        amount: BigUint,
        recipient: Address,
        /// Beacon-chain account bytes.
        refund_address: Bytes,
        expire_time: u64,
    }
);

payload!(
    /// A batch transfer into the beacon chain.
    ///
    /// `amounts`, `receivers` and `refund_addresses` are parallel lists.
    TransferInSyn {
        symbol: TokenSymbol,
        contract: Address,
        amounts: Vec<BigUint>,
        /// Beacon-chain account bytes.
        receivers: Vec<Bytes>,
        refund_addresses: Vec<Address>,
        expire_time: u64,
    }
);

payload!(
    /// Request to mirror a side-chain token.
    MirrorSyn {
        sender: Address,
        contract: Address,
        name: TokenSymbol,
        symbol: TokenSymbol,
        total_supply: BigUint,
        decimals: u8,
        mirror_fee: BigUint,
        expire_time: u64,
    }
);

payload!(
    /// Request to sync the supply of a mirrored token.
    MirrorSyncSyn {
        sender: Address,
        contract: Address,
        symbol: TokenSymbol,
        total_supply: BigUint,
        sync_fee: BigUint,
        expire_time: u64,
    }
);

payload!(
    /// Generic acknowledgement; zero means success.
    CommonAck {
        code: u32,
    }
);

payload!(
    /// One validator of an [`IbcValidatorSet`].
    IbcValidator {
        cons_addr: Bytes,
        fee_addr: Bytes,
        dist_addr: Bytes,
        power: u64,
    }
);

payload!(
    /// A validator set update bounced back to the beacon chain.
    IbcValidatorSet {
        set_type: u8,
        validators: Vec<IbcValidator>,
    }
);

payload!(
    /// A parameter change bounced back to the beacon chain.
    CrossParamChange {
        /// Raw key bytes. Not required to be UTF-8.
        key: Bytes,
        value: Bytes,
        target: Bytes,
    }
);

payload!(
    /// Report of a side-chain validator missing blocks.
    SideDowntimeSlash {
        side_cons_addr: Bytes,
        side_height: u64,
        side_chain_id: u16,
        side_timestamp: u64,
    }
);

payload!(
    /// A staking event originating on the side chain.
    CrossStakeSynFromBsc {
        event_type: u8,
        /// Event-specific parameters, opaque at this layer.
        params: Bytes,
    }
);

payload!(
    /// Refund of a failed staking operation.
    CrossStakeRefund {
        event_type: u8,
        amount: BigUint,
        recipient: Address,
        error_code: u32,
    }
);

impl CrossParamChange {
    /// The key as text, with invalid UTF-8 replaced.
    pub fn key_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.key)
    }
}

impl CrossStakeSynFromBsc {
    /// Typed view of `event_type`.
    pub fn event(&self) -> Option<CrossStakeEventType> {
        CrossStakeEventType::from_u8(self.event_type)
    }
}

impl CrossStakeRefund {
    /// Typed view of `event_type`.
    pub fn event(&self) -> Option<CrossStakeEventType> {
        CrossStakeEventType::from_u8(self.event_type)
    }
}

/// A decoded package payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageContent {
    ApproveBindSyn(ApproveBindSyn),
    BindSyn(BindSyn),
    TransferOutRefund(TransferOutRefund),
    TransferOutSyn(TransferOutSyn),
    TransferInSyn(TransferInSyn),
    MirrorSyn(MirrorSyn),
    MirrorSyncSyn(MirrorSyncSyn),
    CommonAck(CommonAck),
    IbcValidatorSet(IbcValidatorSet),
    CrossParamChange(CrossParamChange),
    SideDowntimeSlash(SideDowntimeSlash),
    CrossStakeSynFromBsc(CrossStakeSynFromBsc),
    CrossStakeRefund(CrossStakeRefund),
}

macro_rules! content_dispatch {
    ($($variant:ident),+ $(,)?) => {
        impl PackageContent {
            /// The variant tag.
            pub fn kind(&self) -> ContentKind {
                match self {
                    $(Self::$variant(_) => ContentKind::$variant,)+
                }
            }

            /// Decode `payload` as the variant named by `kind`.
            pub fn decode(kind: ContentKind, payload: &[u8]) -> Result<Self> {
                let malformed = |source| PackageError::MalformedPayload { kind, source };
                match kind {
                    $(ContentKind::$variant => decode_exact(payload).map(Self::$variant).map_err(malformed),)+
                }
            }

            /// RLP payload bytes.
            pub fn encode(&self) -> Vec<u8> {
                match self {
                    $(Self::$variant(inner) => rlp::encode(inner).to_vec(),)+
                }
            }
        }

        $(
            impl From<$variant> for PackageContent {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

content_dispatch!(
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
);
