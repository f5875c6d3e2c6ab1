//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the byte-level behavior that other implementations of
//! the relay must reproduce: checksum text, seal hash, block hash, signer
//! recovery and package payloads.

use bridge_relay_core::{
    Address, BlockNonce, Bloom, Hash, EMPTY_ROOT_HASH, EMPTY_UNCLE_HASH, SIGNATURE_LENGTH,
};
use bridge_relay_header::Header;
use bridge_relay_packages::{ChannelId, ContentKind, CrossChainPackage, PackageType};

use crate::fixtures::TestSigner;

/// EIP-55 checksum vectors: lowercase input and checksummed output.
pub const CHECKSUM_VECTORS: [(&str, &str); 4] = [
    (
        "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
    ),
    (
        "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
    ),
    (
        "0xdbf03b407c01e7cd3cbea99509d93f8dddc8c6fb",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
    ),
    (
        "0xd1220a0cf47c7b9be7a2e6ba89f429762e7b9adb",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ),
];

/// Seed of the key that sealed [`golden_header`].
pub const GOLDEN_SIGNER_SEED: [u8; 32] = [0x46; 32];

/// Checksummed address of [`GOLDEN_SIGNER_SEED`].
pub const GOLDEN_SIGNER: &str = "0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F";

/// Seal hash of [`golden_header`].
pub const GOLDEN_SEAL_HASH: &str =
    "0x18bd686567c77ef519119d606e6f9dae785ba14a9221ba6cb8684bbb89024a98";

/// Seal hash of [`golden_header`] with `number` set to 1001.
pub const GOLDEN_SEAL_HASH_NEXT: &str =
    "0xaa14fcbbf09552e91f0512f7471bcf553f95bd08cfa0d096d8e062b83e8428ac";

/// Block hash of [`golden_header`].
pub const GOLDEN_BLOCK_HASH: &str =
    "0x207013d6db7cd87a777a09a48e34254b4669df29e074f6c82e72a4c1b4c49237";

/// Seal signature embedded in [`golden_header`].
pub const GOLDEN_SIGNATURE: [u8; SIGNATURE_LENGTH] = [
    0xbb, 0x50, 0xe2, 0xd8, 0x9a, 0x4e, 0xd7, 0x06, 0x63, 0xd0, 0x80, 0x65, 0x9f, 0xe0, 0xad, 0x4b,
    0x9b, 0xc3, 0xe0, 0x6c, 0x17, 0xa2, 0x27, 0x43, 0x39, 0x66, 0xcb, 0x59, 0xce, 0xee, 0x02, 0x0d,
    0x30, 0xb6, 0xfc, 0xef, 0x0f, 0x4e, 0x9b, 0x7d, 0x94, 0x5a, 0xa8, 0x07, 0x9d, 0x3d, 0x38, 0x1f,
    0x9c, 0x53, 0xc7, 0xae, 0xae, 0xbb, 0x2e, 0x77, 0x64, 0x5d, 0x53, 0x9a, 0xac, 0xbe, 0xb0, 0x62,
    0x01,
];

/// Block 1000 sealed by [`GOLDEN_SIGNER`].
pub fn golden_header() -> Header {
    let mut extra = vec![0x61; 32];
    extra.extend_from_slice(&GOLDEN_SIGNATURE);
    Header {
        parent_hash: Hash::from_bytes([0x11; 32]),
        uncle_hash: EMPTY_UNCLE_HASH,
        coinbase: golden_signer_address(),
        root: Hash::from_bytes([0x22; 32]),
        tx_hash: EMPTY_ROOT_HASH,
        receipt_hash: EMPTY_ROOT_HASH,
        bloom: Bloom::ZERO,
        difficulty: 2,
        number: 1000,
        gas_limit: 30_000_000,
        gas_used: 0,
        time: 1_700_000_000,
        extra: extra.into(),
        mix_digest: Hash::ZERO,
        nonce: BlockNonce::ZERO,
    }
}

fn golden_signer_address() -> Address {
    TestSigner::from_seed(GOLDEN_SIGNER_SEED).address()
}

/// A package vector: the framed bytes and the variant they decode to.
#[derive(Debug, Clone)]
pub struct PackageVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Channel the package arrives on.
    pub channel: ChannelId,
    /// Expected package type.
    pub package_type: PackageType,
    /// Expected content variant.
    pub kind: ContentKind,
    /// Framed package bytes (hex, no prefix).
    pub raw: &'static str,
}

/// Get all package vectors.
pub fn package_vectors() -> Vec<PackageVector> {
    vec![
        PackageVector {
            name: "transfer-in syn, relay fee 0.01",
            channel: ChannelId::TRANSFER_IN,
            package_type: PackageType::Syn,
            kind: ContentKind::TransferInSyn,
            raw: concat!(
                "00",
                "000000000000000000000000000000000000000000000000002386f26fc10000",
                "f898a0424e42000000000000000000000000000000000000000000000000000000000094a5f8c5dbd5",
                "f286960b9d90548680ae5ebff07652c68405f5e10005ea9420202020202020202020202020202020",
                "20202020942121212121212121212121212121212121212121ea9430303030303030303030303030",
                "30303030303030943131313131313131313131313131313131313131846553f100",
            ),
        },
        PackageVector {
            name: "validator-set ack, success",
            channel: ChannelId::VALIDATOR_SET,
            package_type: PackageType::Ack,
            kind: ContentKind::CommonAck,
            raw: concat!(
                "01",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "c180",
            ),
        },
        PackageVector {
            name: "cross-param ack, code 7",
            channel: ChannelId::CROSS_PARAM,
            package_type: PackageType::Ack,
            kind: ContentKind::CommonAck,
            raw: concat!(
                "01",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "c107",
            ),
        },
        PackageVector {
            name: "slash syn",
            channel: ChannelId::SLASH,
            package_type: PackageType::Syn,
            kind: ContentKind::SideDowntimeSlash,
            raw: concat!(
                "00",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "df94abababababababababababababababababababab8301e24038846553f100",
            ),
        },
    ]
}

/// Check every vector; returns `(name, passed, detail)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let mut results = Vec::new();

    for (lower, checksummed) in CHECKSUM_VECTORS {
        let got = lower.parse::<Address>().map(|a| a.to_checksum_hex());
        let passed = got.as_deref() == Ok(checksummed);
        results.push((format!("checksum {lower}"), passed, format!("{got:?}")));
    }

    let header = golden_header();
    let checks = [
        (
            "golden seal hash",
            header.seal_hash().map(|h| h.to_hex()),
            GOLDEN_SEAL_HASH,
        ),
        (
            "golden block hash",
            header.hash().map(|h| h.to_hex()),
            GOLDEN_BLOCK_HASH,
        ),
        (
            "golden signer",
            header.recover_signer().map(|a| a.to_checksum_hex()),
            GOLDEN_SIGNER,
        ),
    ];
    for (name, got, want) in checks {
        let passed = got.as_deref() == Ok(want);
        results.push((name.to_string(), passed, format!("{got:?}")));
    }

    for vector in package_vectors() {
        let outcome = hex::decode(vector.raw)
            .map_err(|e| e.to_string())
            .and_then(|raw| {
                CrossChainPackage::decode(vector.channel, &raw).map_err(|e| e.to_string())
            });
        let passed = matches!(
            &outcome,
            Ok(p) if p.package_type == vector.package_type && p.content.kind() == vector.kind
        );
        results.push((vector.name.to_string(), passed, format!("{outcome:?}")));
    }

    results
}
