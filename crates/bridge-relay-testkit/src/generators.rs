//! Proptest generators for property-based testing.

use num_bigint::BigUint;
use proptest::prelude::*;

use bridge_relay_core::{
    Address, BlockNonce, Bloom, Hash, BLOOM_BYTE_LENGTH, EMPTY_ROOT_HASH, EMPTY_UNCLE_HASH,
};
use bridge_relay_header::Header;
use bridge_relay_packages::{registered_channels, ChannelId, PackageType};

use crate::fixtures::{TestSigner, VANITY_LENGTH};

/// Generate a random Hash.
pub fn hash() -> impl Strategy<Value = Hash> {
    any::<[u8; 32]>().prop_map(Hash::from_bytes)
}

/// Generate a random Address.
pub fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::from_bytes)
}

/// Generate a random Bloom.
pub fn bloom() -> impl Strategy<Value = Bloom> {
    prop::collection::vec(any::<u8>(), BLOOM_BYTE_LENGTH).prop_map(|v| {
        let mut bytes = [0u8; BLOOM_BYTE_LENGTH];
        bytes.copy_from_slice(&v);
        Bloom::from_bytes(bytes)
    })
}

/// Generate a random BlockNonce.
pub fn block_nonce() -> impl Strategy<Value = BlockNonce> {
    any::<u64>().prop_map(BlockNonce::encode)
}

/// Generate a signer.
pub fn signer() -> impl Strategy<Value = TestSigner> {
    any::<[u8; 32]>().prop_map(TestSigner::from_seed)
}

/// Generate a registered channel.
pub fn channel() -> impl Strategy<Value = ChannelId> {
    prop::sample::select(registered_channels().collect::<Vec<_>>())
}

/// Generate a package type.
pub fn package_type() -> impl Strategy<Value = PackageType> {
    prop_oneof![
        Just(PackageType::Syn),
        Just(PackageType::Ack),
        Just(PackageType::FailAck),
    ]
}

/// Generate an unsigned integer of up to `max_bytes` big-endian bytes.
pub fn big_uint(max_bytes: usize) -> impl Strategy<Value = BigUint> {
    prop::collection::vec(any::<u8>(), 0..=max_bytes).prop_map(|b| BigUint::from_bytes_be(&b))
}

/// Parameters for generating a sealed header.
#[derive(Debug, Clone)]
pub struct HeaderParams {
    pub signer: TestSigner,
    pub parent_hash: Hash,
    pub root: Hash,
    pub bloom: Bloom,
    pub difficulty: i64,
    pub number: i64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub time: u64,
    pub vanity: Vec<u8>,
    pub mix_digest: Hash,
    pub nonce: BlockNonce,
}

impl Arbitrary for HeaderParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            (signer(), hash(), hash(), bloom()),
            0i64..=i64::MAX, // difficulty
            0i64..=i64::MAX, // number
            any::<u64>(),    // gas_limit
            any::<u64>(),    // gas_used
            any::<u64>(),    // time
            prop::collection::vec(any::<u8>(), 0..=VANITY_LENGTH * 2),
            (hash(), block_nonce()),
        )
            .prop_map(
                |(
                    (signer, parent_hash, root, bloom),
                    difficulty,
                    number,
                    gas_limit,
                    gas_used,
                    time,
                    vanity,
                    (mix_digest, nonce),
                )| HeaderParams {
                    signer,
                    parent_hash,
                    root,
                    bloom,
                    difficulty,
                    number,
                    gas_limit,
                    gas_used,
                    time,
                    vanity,
                    mix_digest,
                    nonce,
                },
            )
            .boxed()
    }
}

/// Build a header from parameters and seal it with the generated signer.
pub fn header_from_params(params: &HeaderParams) -> Header {
    let mut extra = params.vanity.clone();
    extra.resize(params.vanity.len() + bridge_relay_core::SIGNATURE_LENGTH, 0);
    let header = Header {
        parent_hash: params.parent_hash,
        uncle_hash: EMPTY_UNCLE_HASH,
        coinbase: params.signer.address(),
        root: params.root,
        tx_hash: EMPTY_ROOT_HASH,
        receipt_hash: EMPTY_ROOT_HASH,
        bloom: params.bloom,
        difficulty: params.difficulty,
        number: params.number,
        gas_limit: params.gas_limit,
        gas_used: params.gas_used,
        time: params.time,
        extra: extra.into(),
        mix_digest: params.mix_digest,
        nonce: params.nonce,
    };
    // Non-negative integers and a full signature slot cannot fail to seal.
    params.signer.seal(header.clone()).unwrap_or(header)
}
