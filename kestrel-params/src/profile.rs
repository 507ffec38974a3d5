//! The immutable parameter set of one network.
//!
//! The main network is built from a full [`ProfileDefinition`]. Other
//! networks are derived from an already-built profile with
//! [`NetworkProfile::derive`], which copies every field and applies only the
//! values set in a [`ProfileOverrides`].

use kestrel_types::block::Block;
use kestrel_types::compact::{limit_from_shift, target_to_compact};
use kestrel_types::network::{AddressClass, NetworkKind, PeerAddress, SeedSpec};
use kestrel_types::primitives::{hash_to_display_hex, Hash, Magic};
use primitive_types::U256;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ParamsError;
use crate::genesis::{ExpectedGenesis, GenesisBuilder, GenesisInputs};
use crate::seeds::convert_seeds_now;

/// Base58-check version prefixes, one per [`AddressClass`].
///
/// Prefixes of different classes are expected to differ so encoded strings
/// stay visually distinguishable; nothing here checks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressPrefixes {
    pub pubkey_hash: Vec<u8>,
    pub script_hash: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub ext_public_key: Vec<u8>,
    pub ext_secret_key: Vec<u8>,
}

impl AddressPrefixes {
    pub fn get(&self, class: AddressClass) -> &[u8] {
        match class {
            AddressClass::PubkeyHash => &self.pubkey_hash,
            AddressClass::ScriptHash => &self.script_hash,
            AddressClass::SecretKey => &self.secret_key,
            AddressClass::ExtPublicKey => &self.ext_public_key,
            AddressClass::ExtSecretKey => &self.ext_secret_key,
        }
    }
}

/// Every literal needed to build a profile from scratch.
#[derive(Debug, Clone)]
pub struct ProfileDefinition {
    pub kind: NetworkKind,
    pub magic: Magic,
    pub default_port: u16,
    pub rpc_port: u16,
    pub pow_limit_shift: u32,
    pub pos_limit_shift: u32,
    pub alert_public_key: &'static str,
    pub checkpoint_public_key: &'static str,
    pub address_prefixes: AddressPrefixes,
    pub genesis: GenesisInputs,
    pub expected_genesis: ExpectedGenesis,
    pub fixed_seeds: &'static [SeedSpec],
    pub dns_seeds: &'static [&'static str],
    pub data_directory_name: &'static str,
    pub requires_rpc_authentication: bool,
}

/// Fields a derived network changes relative to its base. `None` inherits.
#[derive(Debug, Clone)]
pub struct ProfileOverrides {
    pub kind: NetworkKind,
    /// A derived network always rebuilds its genesis block, so it always
    /// names the hash it expects.
    pub expected_genesis: ExpectedGenesis,
    pub magic: Option<Magic>,
    pub default_port: Option<u16>,
    pub rpc_port: Option<u16>,
    pub pow_limit_shift: Option<u32>,
    pub alert_public_key: Option<&'static str>,
    pub checkpoint_public_key: Option<&'static str>,
    pub address_prefixes: Option<AddressPrefixes>,
    pub genesis_time: Option<u32>,
    pub genesis_nonce: Option<u32>,
    /// Explicit genesis bits. Without it the bits follow the (possibly
    /// overridden) proof-of-work limit.
    pub genesis_bits: Option<u32>,
    pub fixed_seeds: Option<&'static [SeedSpec]>,
    pub dns_seeds: Option<&'static [&'static str]>,
    pub data_directory_name: Option<&'static str>,
    pub requires_rpc_authentication: Option<bool>,
}

impl ProfileOverrides {
    /// Overrides that change nothing but the network identity and the
    /// expected genesis.
    pub fn new(kind: NetworkKind, expected_genesis: ExpectedGenesis) -> Self {
        Self {
            kind,
            expected_genesis,
            magic: None,
            default_port: None,
            rpc_port: None,
            pow_limit_shift: None,
            alert_public_key: None,
            checkpoint_public_key: None,
            address_prefixes: None,
            genesis_time: None,
            genesis_nonce: None,
            genesis_bits: None,
            fixed_seeds: None,
            dns_seeds: None,
            data_directory_name: None,
            requires_rpc_authentication: None,
        }
    }
}

/// One network's full parameter set. Never changes after construction.
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    kind: NetworkKind,
    magic: Magic,
    default_port: u16,
    rpc_port: u16,
    proof_of_work_limit: U256,
    proof_of_stake_limit: U256,
    alert_public_key: Vec<u8>,
    checkpoint_public_key: Vec<u8>,
    address_prefixes: AddressPrefixes,
    genesis_inputs: GenesisInputs,
    genesis_block: Block,
    genesis_hash: Hash,
    fixed_seeds: Vec<PeerAddress>,
    dns_seeds: Vec<String>,
    data_directory_name: String,
    requires_rpc_authentication: bool,
}

impl NetworkProfile {
    /// Build a profile from a full definition, verifying its genesis block.
    pub fn from_definition(def: ProfileDefinition) -> Result<Self, ParamsError> {
        let builder = GenesisBuilder::new(def.genesis);
        let (genesis_block, genesis_hash) =
            builder.build_verified(def.kind, &def.expected_genesis)?;

        let profile = Self {
            kind: def.kind,
            magic: def.magic,
            default_port: def.default_port,
            rpc_port: def.rpc_port,
            proof_of_work_limit: limit_from_shift(def.pow_limit_shift),
            proof_of_stake_limit: limit_from_shift(def.pos_limit_shift),
            alert_public_key: decode_key("alert public key", def.alert_public_key)?,
            checkpoint_public_key: decode_key(
                "checkpoint public key",
                def.checkpoint_public_key,
            )?,
            address_prefixes: def.address_prefixes,
            genesis_inputs: builder.into_inputs(),
            genesis_block,
            genesis_hash,
            fixed_seeds: convert_seeds_now(def.fixed_seeds),
            dns_seeds: def.dns_seeds.iter().map(|s| s.to_string()).collect(),
            data_directory_name: def.data_directory_name.to_string(),
            requires_rpc_authentication: def.requires_rpc_authentication,
        };
        profile.log_built();
        Ok(profile)
    }

    /// Derive another network's profile: copy `self`, apply `overrides`,
    /// then rebuild and verify the genesis block.
    pub fn derive(&self, overrides: ProfileOverrides) -> Result<Self, ParamsError> {
        let mut profile = self.clone();
        profile.kind = overrides.kind;

        if let Some(magic) = overrides.magic {
            profile.magic = magic;
        }
        if let Some(port) = overrides.default_port {
            profile.default_port = port;
        }
        if let Some(port) = overrides.rpc_port {
            profile.rpc_port = port;
        }
        if let Some(shift) = overrides.pow_limit_shift {
            profile.proof_of_work_limit = limit_from_shift(shift);
        }
        if let Some(key) = overrides.alert_public_key {
            profile.alert_public_key = decode_key("alert public key", key)?;
        }
        if let Some(key) = overrides.checkpoint_public_key {
            profile.checkpoint_public_key = decode_key("checkpoint public key", key)?;
        }
        if let Some(prefixes) = overrides.address_prefixes {
            profile.address_prefixes = prefixes;
        }
        if let Some(seeds) = overrides.fixed_seeds {
            profile.fixed_seeds = convert_seeds_now(seeds);
        }
        if let Some(seeds) = overrides.dns_seeds {
            profile.dns_seeds = seeds.iter().map(|s| s.to_string()).collect();
        }
        if let Some(dir) = overrides.data_directory_name {
            profile.data_directory_name = dir.to_string();
        }
        if let Some(required) = overrides.requires_rpc_authentication {
            profile.requires_rpc_authentication = required;
        }

        let bits = overrides
            .genesis_bits
            .unwrap_or_else(|| target_to_compact(&profile.proof_of_work_limit));
        let mut builder = GenesisBuilder::new(profile.genesis_inputs.clone()).with_bits(bits);
        if let Some(time) = overrides.genesis_time {
            builder = builder.with_time(time);
        }
        if let Some(nonce) = overrides.genesis_nonce {
            builder = builder.with_nonce(nonce);
        }
        let (block, hash) = builder.build_verified(profile.kind, &overrides.expected_genesis)?;
        profile.genesis_inputs = builder.into_inputs();
        profile.genesis_block = block;
        profile.genesis_hash = hash;

        profile.log_built();
        Ok(profile)
    }

    fn log_built(&self) {
        info!(
            network = %self.kind,
            genesis = %hash_to_display_hex(&self.genesis_hash),
            port = self.default_port,
            "network parameters ready"
        );
        debug!(
            network = %self.kind,
            fixed_seeds = self.fixed_seeds.len(),
            bits = %format!("{:#010x}", self.genesis_block.header.bits),
            "network parameter details"
        );
    }

    pub fn kind(&self) -> NetworkKind {
        self.kind
    }

    /// Prefix of every wire message on this network.
    pub fn magic(&self) -> Magic {
        self.magic
    }

    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    pub fn rpc_port(&self) -> u16 {
        self.rpc_port
    }

    /// The easiest target any block on this network may carry.
    pub fn proof_of_work_limit(&self) -> &U256 {
        &self.proof_of_work_limit
    }

    pub fn proof_of_stake_limit(&self) -> &U256 {
        &self.proof_of_stake_limit
    }

    pub fn alert_public_key(&self) -> &[u8] {
        &self.alert_public_key
    }

    pub fn checkpoint_public_key(&self) -> &[u8] {
        &self.checkpoint_public_key
    }

    pub fn address_prefixes(&self) -> &AddressPrefixes {
        &self.address_prefixes
    }

    pub fn address_prefix(&self, class: AddressClass) -> &[u8] {
        self.address_prefixes.get(class)
    }

    pub fn genesis_inputs(&self) -> &GenesisInputs {
        &self.genesis_inputs
    }

    pub fn genesis_block(&self) -> &Block {
        &self.genesis_block
    }

    pub fn genesis_hash(&self) -> &Hash {
        &self.genesis_hash
    }

    /// Peers to try before any other address source has produced results.
    pub fn fixed_seeds(&self) -> &[PeerAddress] {
        &self.fixed_seeds
    }

    pub fn dns_seeds(&self) -> &[String] {
        &self.dns_seeds
    }

    /// Subdirectory for this network's on-disk state; empty means the base
    /// data directory itself.
    pub fn data_directory_name(&self) -> &str {
        &self.data_directory_name
    }

    pub fn requires_rpc_authentication(&self) -> bool {
        self.requires_rpc_authentication
    }
}

fn decode_key(field: &'static str, hex_str: &str) -> Result<Vec<u8>, ParamsError> {
    hex::decode(hex_str).map_err(|e| ParamsError::InvalidConstant {
        field,
        reason: e.to_string(),
    })
}

/// Big-endian, zero-padded hex of a 256-bit target.
pub fn target_to_hex(target: &U256) -> String {
    let mut bytes = [0u8; 32];
    target.to_big_endian(&mut bytes);
    hex::encode(bytes)
}

/// Serializable snapshot of a profile for diagnostics output.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub network: NetworkKind,
    pub magic: String,
    pub default_port: u16,
    pub rpc_port: u16,
    pub proof_of_work_limit: String,
    pub genesis_hash: String,
    pub genesis_merkle_root: String,
    pub genesis_time: u32,
    pub genesis_bits: String,
    pub genesis_nonce: u32,
    pub address_prefixes: AddressPrefixes,
    pub fixed_seeds: usize,
    pub data_directory_name: String,
    pub requires_rpc_authentication: bool,
}

impl From<&NetworkProfile> for ProfileSummary {
    fn from(profile: &NetworkProfile) -> Self {
        let header = &profile.genesis_block.header;
        Self {
            network: profile.kind,
            magic: hex::encode(profile.magic),
            default_port: profile.default_port,
            rpc_port: profile.rpc_port,
            proof_of_work_limit: target_to_hex(&profile.proof_of_work_limit),
            genesis_hash: hash_to_display_hex(&profile.genesis_hash),
            genesis_merkle_root: hash_to_display_hex(&header.merkle_root),
            genesis_time: header.time,
            genesis_bits: format!("{:#010x}", header.bits),
            genesis_nonce: header.nonce,
            address_prefixes: profile.address_prefixes.clone(),
            fixed_seeds: profile.fixed_seeds.len(),
            data_directory_name: profile.data_directory_name.clone(),
            requires_rpc_authentication: profile.requires_rpc_authentication,
        }
    }
}
