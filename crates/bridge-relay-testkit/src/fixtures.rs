//! Test fixtures and helpers.
//!
//! Signing keys, sealed headers and sample packages for integration tests.

use bytes::Bytes;
use num_bigint::BigUint;
use rand::RngCore;
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};

use bridge_relay_core::{
    keccak256, public_key_to_address, Address, BlockNonce, Bloom, Hash, EMPTY_ROOT_HASH,
    EMPTY_UNCLE_HASH, SIGNATURE_LENGTH,
};
use bridge_relay_header::{Header, HeaderError};
use bridge_relay_packages::{
    ApproveBindSyn, BindSyn, ChannelId, CommonAck, ContentKind, CrossChainPackage,
    CrossParamChange, CrossStakeRefund, CrossStakeSynFromBsc, IbcValidator, IbcValidatorSet,
    MirrorSyn, MirrorSyncSyn, PackageContent, PackageError, PackageType, SideDowntimeSlash,
    TokenSymbol, TransferInSyn, TransferOutRefund, TransferOutSyn,
};

/// Length of the vanity prefix in fixture headers.
pub const VANITY_LENGTH: usize = 32;

/// A secp256k1 key that seals headers.
#[derive(Debug, Clone)]
pub struct TestSigner {
    key: SecretKey,
}

impl TestSigner {
    /// Deterministic signer from a seed.
    ///
    /// Seeds outside the curve order are rehashed until they are valid.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let mut candidate = seed;
        loop {
            if let Ok(key) = SecretKey::from_slice(&candidate) {
                return Self { key };
            }
            candidate = keccak256(candidate).0;
        }
    }

    /// Signer with a random key.
    pub fn random() -> Self {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        Self::from_seed(seed)
    }

    /// Address derived from the public key.
    pub fn address(&self) -> Address {
        let public = PublicKey::from_secret_key_global(&self.key);
        public_key_to_address(&public.serialize_uncompressed())
    }

    /// Recoverable signature `R || S || V` over a digest.
    pub fn sign_hash(&self, digest: &Hash) -> [u8; SIGNATURE_LENGTH] {
        let sig = SECP256K1.sign_ecdsa_recoverable(&Message::from_digest(digest.0), &self.key);
        let (id, compact) = sig.serialize_compact();
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..64].copy_from_slice(&compact);
        out[64] = id.to_i32() as u8;
        out
    }

    /// Overwrite the trailing signature slot of `header` with a fresh seal.
    pub fn seal(&self, mut header: Header) -> Result<Header, HeaderError> {
        let digest = header.seal_hash()?;
        let sig = self.sign_hash(&digest);
        let mut extra = header.extra[..header.extra.len() - SIGNATURE_LENGTH].to_vec();
        extra.extend_from_slice(&sig);
        header.extra = extra.into();
        Ok(header)
    }
}

/// A header at `number` with a zeroed signature slot.
pub fn unsealed_header(number: u32, coinbase: Address) -> Header {
    let mut extra = vec![0x61; VANITY_LENGTH];
    extra.resize(VANITY_LENGTH + SIGNATURE_LENGTH, 0);
    Header {
        parent_hash: keccak256(number.to_be_bytes()),
        uncle_hash: EMPTY_UNCLE_HASH,
        coinbase,
        root: Hash::from_bytes([0x22; 32]),
        tx_hash: EMPTY_ROOT_HASH,
        receipt_hash: EMPTY_ROOT_HASH,
        bloom: Bloom::ZERO,
        difficulty: 2,
        number: i64::from(number),
        gas_limit: 30_000_000,
        gas_used: 0,
        time: 1_700_000_000 + u64::from(number) * 3,
        extra: extra.into(),
        mix_digest: Hash::ZERO,
        nonce: BlockNonce::ZERO,
    }
}

/// A header at `number` sealed by `signer`, with the signer as coinbase.
pub fn signed_header(signer: &TestSigner, number: u32) -> Result<Header, HeaderError> {
    signer.seal(unsealed_header(number, signer.address()))
}

/// `count` signers with distinct deterministic keys.
pub fn multi_signer_fixtures(count: usize) -> Vec<TestSigner> {
    (0..count)
        .map(|i| {
            let mut seed = [0x5a; 32];
            seed[..8].copy_from_slice(&(i as u64).to_be_bytes());
            TestSigner::from_seed(seed)
        })
        .collect()
}

fn symbol(text: &str) -> TokenSymbol {
    TokenSymbol::new(text).unwrap_or_default()
}

/// A populated instance of each content variant.
pub fn sample_content(kind: ContentKind) -> PackageContent {
    let contract = Address::from_bytes([0xa5; 20]);
    let account = Bytes::from(vec![0x20; 20]);
    let ether = BigUint::from(10u64).pow(18);
    match kind {
        ContentKind::ApproveBindSyn => ApproveBindSyn {
            status: 0,
            symbol: symbol("ABC-123"),
        }
        .into(),
        ContentKind::BindSyn => BindSyn {
            bind_type: 0,
            symbol: symbol("ABC-123"),
            contract,
            total_supply: ether.clone() * 1_000_000u32,
            peggy_amount: ether,
            decimals: 18,
            expire_time: 1_700_000_600,
        }
        .into(),
        ContentKind::TransferOutRefund => TransferOutRefund {
            symbol: symbol("BNB"),
            refund_amount: BigUint::from(100_000_000u64),
            refund_address: account,
            refund_reason: 1,
        }
        .into(),
        ContentKind::TransferOutSyn => TransferOutSyn {
            symbol: symbol("BNB"),
            contract,
            amount: ether,
            recipient: Address::from_bytes([0x21; 20]),
            refund_address: account,
            expire_time: 1_700_000_600,
        }
        .into(),
        ContentKind::TransferInSyn => TransferInSyn {
            symbol: symbol("BNB"),
            contract,
            amounts: vec![BigUint::from(100_000_000u64), BigUint::from(5u32)],
            receivers: vec![account, Bytes::from(vec![0x21; 20])],
            refund_addresses: vec![Address::from_bytes([0x30; 20]), Address::from_bytes([0x31; 20])],
            expire_time: 1_700_000_000,
        }
        .into(),
        ContentKind::MirrorSyn => MirrorSyn {
            sender: Address::from_bytes([0x40; 20]),
            contract,
            name: symbol("Mirror Token"),
            symbol: symbol("MIR"),
            total_supply: ether.clone() * 21_000_000u32,
            decimals: 18,
            mirror_fee: ether,
            expire_time: 1_700_000_600,
        }
        .into(),
        ContentKind::MirrorSyncSyn => MirrorSyncSyn {
            sender: Address::from_bytes([0x40; 20]),
            contract,
            symbol: symbol("MIR-5A1"),
            total_supply: ether.clone() * 21_000_000u32,
            sync_fee: ether,
            expire_time: 1_700_000_600,
        }
        .into(),
        ContentKind::CommonAck => CommonAck { code: 0 }.into(),
        ContentKind::IbcValidatorSet => IbcValidatorSet {
            set_type: 0,
            validators: vec![IbcValidator {
                cons_addr: Bytes::from(vec![0x01; 20]),
                fee_addr: Bytes::from(vec![0x02; 20]),
                dist_addr: account,
                power: 10_000,
            }],
        }
        .into(),
        ContentKind::CrossParamChange => CrossParamChange {
            key: Bytes::from_static(b"relayerReward"),
            value: Bytes::from(vec![0x01, 0x00]),
            target: Bytes::from(vec![0x10; 20]),
        }
        .into(),
        ContentKind::SideDowntimeSlash => SideDowntimeSlash {
            side_cons_addr: Bytes::from(vec![0xab; 20]),
            side_height: 123_456,
            side_chain_id: 56,
            side_timestamp: 1_700_000_000,
        }
        .into(),
        ContentKind::CrossStakeSynFromBsc => CrossStakeSynFromBsc {
            event_type: 1,
            params: Bytes::from(vec![0xc0]),
        }
        .into(),
        ContentKind::CrossStakeRefund => CrossStakeRefund {
            event_type: 2,
            amount: ether,
            recipient: Address::from_bytes([0x50; 20]),
            error_code: 1,
        }
        .into(),
    }
}

/// Frame `content` as a package on `channel`.
pub fn frame(
    channel: ChannelId,
    package_type: PackageType,
    relay_fee: u64,
    content: PackageContent,
) -> Result<Vec<u8>, PackageError> {
    CrossChainPackage {
        channel,
        package_type,
        relay_fee: BigUint::from(relay_fee),
        content,
    }
    .encode()
}
