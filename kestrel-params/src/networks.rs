//! The three shipped networks. Test derives from main and regtest derives
//! from test, so each only states what it changes.

use kestrel_types::network::NetworkKind;
use kestrel_types::primitives::Magic;

use crate::error::ParamsError;
use crate::genesis::{ExpectedGenesis, GenesisInputs};
use crate::profile::{AddressPrefixes, NetworkProfile, ProfileDefinition, ProfileOverrides};
use crate::seeds::{MAIN_SEEDS, TEST_SEEDS};

// ─── Main network ────────────────────────────────────────────────────────────

pub const MAIN_MAGIC: Magic = [0x1c, 0x41, 0xf1, 0xc1];
pub const MAIN_PORT: u16 = 24325;
pub const MAIN_RPC_PORT: u16 = 24326;
pub const MAIN_POW_LIMIT_SHIFT: u32 = 20;
pub const MAIN_POS_LIMIT_SHIFT: u32 = 20;

const MAIN_ALERT_KEY: &str = "04ddba2cdeafb9130a9540d525dbe694ef0573faa5a786adc5f5b5ddc0929b508e14b6fa2dd889791a4ffd3fb4852daa02f3b98085aca4dac2d1b23dadafa5fc0a";
const MAIN_CHECKPOINT_KEY: &str = "04364ac13e8245014fb5f4bbccca7b0e720fc70977ed2c206c23c106ac92d2b19b96b68d9985824f7628e1980de8baa7d564ffdffa3c6bb939f4180a9c44aa7b33";

/// Payload of the genesis coinbase on every network.
pub const GENESIS_MESSAGE: &str =
    "Guardian 05/Sep/2018 Typhoon Jebi: thousands stranded at island airport in Japan";
pub const GENESIS_TX_TIME: u32 = 1_536_155_075;
pub const MAIN_GENESIS_TIME: u32 = 1_536_155_075;
pub const MAIN_GENESIS_NONCE: u32 = 535_291;
/// Compact form of the main proof-of-work limit.
pub const MAIN_GENESIS_BITS: u32 = 0x1e0f_ffff;

/// All three networks share one coinbase transaction, hence one merkle root.
pub const GENESIS_MERKLE_ROOT: &str =
    "0xf4f9aa7e4f028daa1ac8e83fa68da1dd47267ada9d2a049468db2113e5dd883d";

pub const MAIN_GENESIS: ExpectedGenesis = ExpectedGenesis {
    hash: "0x000002fe39baf5e01f46ea4e9da1f0444411bca00659d092a327e601661be091",
    merkle_root: GENESIS_MERKLE_ROOT,
};

// ─── Test network ────────────────────────────────────────────────────────────

/// Rarely used upper-ASCII bytes, not valid UTF-8, large as a 4-byte int at
/// any alignment.
pub const TEST_MAGIC: Magic = [0xab, 0x61, 0x79, 0x17];
pub const TEST_PORT: u16 = 24899;
pub const TEST_RPC_PORT: u16 = 24891;
pub const TEST_POW_LIMIT_SHIFT: u32 = 12;
pub const TEST_GENESIS_NONCE: u32 = 713_027;

const TEST_ALERT_KEY: &str = "042f41d70abc810b2c9e781b488a1b9b6b6ca17725b4fdd80a29bb4a8846b9a29599ad9ab143239c269cf3d6740a52fcbb66862a78618347338de75a2b0300e658";

pub const TEST_GENESIS: ExpectedGenesis = ExpectedGenesis {
    hash: "0x00000367d3705b216b5861ad5abc9f9dd417ab2d842be7aa9b07fe2a394cd6fe",
    merkle_root: GENESIS_MERKLE_ROOT,
};

// ─── Regression test network ─────────────────────────────────────────────────

pub const REGTEST_MAGIC: Magic = [0xf1, 0xbf, 0xb5, 0xda];
pub const REGTEST_PORT: u16 = 22213;
pub const REGTEST_RPC_PORT: u16 = 22214;
pub const REGTEST_POW_LIMIT_SHIFT: u32 = 1;
pub const REGTEST_GENESIS_TIME: u32 = 1_502_755_772;
pub const REGTEST_GENESIS_NONCE: u32 = 5;

pub const REGTEST_GENESIS: ExpectedGenesis = ExpectedGenesis {
    hash: "0x24e3749e09c80f53d804c34a4356199d41eaf018606c266cc75e5f6328e2b6aa",
    merkle_root: GENESIS_MERKLE_ROOT,
};

fn main_prefixes() -> AddressPrefixes {
    AddressPrefixes {
        pubkey_hash: vec![48],
        script_hash: vec![5],
        secret_key: vec![176],
        ext_public_key: vec![0x04, 0x88, 0xb2, 0x1e],
        ext_secret_key: vec![0x04, 0x88, 0xad, 0xe4],
    }
}

fn test_prefixes() -> AddressPrefixes {
    AddressPrefixes {
        pubkey_hash: vec![111],
        script_hash: vec![196],
        secret_key: vec![239],
        ext_public_key: vec![0x04, 0x35, 0x87, 0xcf],
        ext_secret_key: vec![0x04, 0x35, 0x83, 0x94],
    }
}

/// Build the main network profile.
pub fn production() -> Result<NetworkProfile, ParamsError> {
    NetworkProfile::from_definition(production_definition())
}

pub(crate) fn production_definition() -> ProfileDefinition {
    ProfileDefinition {
        kind: NetworkKind::Production,
        magic: MAIN_MAGIC,
        default_port: MAIN_PORT,
        rpc_port: MAIN_RPC_PORT,
        pow_limit_shift: MAIN_POW_LIMIT_SHIFT,
        pos_limit_shift: MAIN_POS_LIMIT_SHIFT,
        alert_public_key: MAIN_ALERT_KEY,
        checkpoint_public_key: MAIN_CHECKPOINT_KEY,
        address_prefixes: main_prefixes(),
        genesis: GenesisInputs {
            message: GENESIS_MESSAGE.to_string(),
            script_number: 42,
            tx_version: 1,
            tx_time: GENESIS_TX_TIME,
            block_version: 1,
            time: MAIN_GENESIS_TIME,
            bits: MAIN_GENESIS_BITS,
            nonce: MAIN_GENESIS_NONCE,
        },
        expected_genesis: MAIN_GENESIS,
        fixed_seeds: MAIN_SEEDS,
        dns_seeds: &[],
        data_directory_name: "",
        requires_rpc_authentication: true,
    }
}

/// Derive the test network profile from the main one.
pub fn test(main: &NetworkProfile) -> Result<NetworkProfile, ParamsError> {
    main.derive(ProfileOverrides {
        magic: Some(TEST_MAGIC),
        default_port: Some(TEST_PORT),
        rpc_port: Some(TEST_RPC_PORT),
        pow_limit_shift: Some(TEST_POW_LIMIT_SHIFT),
        alert_public_key: Some(TEST_ALERT_KEY),
        address_prefixes: Some(test_prefixes()),
        genesis_nonce: Some(TEST_GENESIS_NONCE),
        fixed_seeds: Some(TEST_SEEDS),
        dns_seeds: Some(&[]),
        data_directory_name: Some("testnet"),
        ..ProfileOverrides::new(NetworkKind::Test, TEST_GENESIS)
    })
}

/// Derive the regression test profile from the test one.
pub fn regtest(test: &NetworkProfile) -> Result<NetworkProfile, ParamsError> {
    test.derive(ProfileOverrides {
        magic: Some(REGTEST_MAGIC),
        default_port: Some(REGTEST_PORT),
        rpc_port: Some(REGTEST_RPC_PORT),
        pow_limit_shift: Some(REGTEST_POW_LIMIT_SHIFT),
        genesis_time: Some(REGTEST_GENESIS_TIME),
        genesis_nonce: Some(REGTEST_GENESIS_NONCE),
        fixed_seeds: Some(&[]),
        dns_seeds: Some(&[]),
        data_directory_name: Some("regtest"),
        requires_rpc_authentication: Some(false),
        ..ProfileOverrides::new(NetworkKind::Regtest, REGTEST_GENESIS)
    })
}
