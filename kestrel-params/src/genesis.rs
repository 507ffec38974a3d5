//! Deterministic construction and verification of genesis blocks.

use kestrel_crypto::hash::block_hash;
use kestrel_crypto::merkle::transactions_merkle_root;
use kestrel_types::block::{Block, BlockHeader};
use kestrel_types::network::NetworkKind;
use kestrel_types::primitives::{hash_from_display_hex, hash_to_display_hex, Hash, ZERO_HASH};
use kestrel_types::script::Script;
use kestrel_types::transaction::{Transaction, TxIn, TxOut};
use tracing::{debug, error};

use crate::error::ParamsError;

/// Literal inputs from which a genesis block is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisInputs {
    /// Human-readable payload embedded in the coinbase input.
    pub message: String,
    /// Number pushed ahead of the message in the coinbase script.
    pub script_number: i64,
    pub tx_version: i32,
    /// Timestamp of the coinbase transaction itself.
    pub tx_time: u32,
    pub block_version: i32,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

/// The values a genesis block is checked against, in display-order hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedGenesis {
    pub hash: &'static str,
    pub merkle_root: &'static str,
}

/// Builds genesis blocks from [`GenesisInputs`]. The same inputs always
/// produce a byte-identical block.
#[derive(Debug, Clone)]
pub struct GenesisBuilder {
    inputs: GenesisInputs,
}

impl GenesisBuilder {
    pub fn new(inputs: GenesisInputs) -> Self {
        Self { inputs }
    }

    pub fn with_time(mut self, time: u32) -> Self {
        self.inputs.time = time;
        self
    }

    pub fn with_bits(mut self, bits: u32) -> Self {
        self.inputs.bits = bits;
        self
    }

    pub fn with_nonce(mut self, nonce: u32) -> Self {
        self.inputs.nonce = nonce;
        self
    }

    pub fn into_inputs(self) -> GenesisInputs {
        self.inputs
    }

    /// The single coinbase transaction: one input carrying
    /// `OP_0 <script_number> <message>`, one empty output.
    pub fn coinbase_transaction(&self) -> Transaction {
        let script_sig = Script::new()
            .push_int(0)
            .push_num(self.inputs.script_number)
            .push_slice(self.inputs.message.as_bytes());
        Transaction {
            version: self.inputs.tx_version,
            time: self.inputs.tx_time,
            inputs: vec![TxIn::coinbase(script_sig)],
            outputs: vec![TxOut::empty()],
            lock_time: 0,
        }
    }

    /// Assemble the genesis block.
    pub fn build(&self) -> Block {
        let transactions = vec![self.coinbase_transaction()];
        let merkle_root = transactions_merkle_root(&transactions);
        Block {
            header: BlockHeader {
                version: self.inputs.block_version,
                prev_block_hash: ZERO_HASH,
                merkle_root,
                time: self.inputs.time,
                bits: self.inputs.bits,
                nonce: self.inputs.nonce,
            },
            transactions,
            signature: Vec::new(),
        }
    }

    /// Build the block and check its hash and merkle root against the
    /// compiled-in values for `network`. Returns the block and its hash.
    pub fn build_verified(
        &self,
        network: NetworkKind,
        expected: &ExpectedGenesis,
    ) -> Result<(Block, Hash), ParamsError> {
        let block = self.build();
        let hash = block_hash(&block.header);
        debug!(
            %network,
            merkle_root = %hash_to_display_hex(&block.header.merkle_root),
            "built genesis block"
        );
        verify_genesis(network, &block, &hash, expected)?;
        Ok((block, hash))
    }
}

/// Compare a built genesis block with the expected literals.
pub fn verify_genesis(
    network: NetworkKind,
    block: &Block,
    hash: &Hash,
    expected: &ExpectedGenesis,
) -> Result<(), ParamsError> {
    let expected_merkle = parse_hash("genesis merkle root", expected.merkle_root)?;
    if block.header.merkle_root != expected_merkle {
        let actual = hash_to_display_hex(&block.header.merkle_root);
        error!(%network, expected = expected.merkle_root, %actual, "genesis merkle root mismatch");
        return Err(ParamsError::MerkleRootMismatch {
            network,
            expected: hash_to_display_hex(&expected_merkle),
            actual,
        });
    }

    let expected_hash = parse_hash("genesis hash", expected.hash)?;
    if *hash != expected_hash {
        let actual = hash_to_display_hex(hash);
        error!(%network, expected = expected.hash, %actual, "genesis hash mismatch");
        return Err(ParamsError::GenesisHashMismatch {
            network,
            expected: hash_to_display_hex(&expected_hash),
            actual,
        });
    }
    Ok(())
}

pub(crate) fn parse_hash(field: &'static str, s: &str) -> Result<Hash, ParamsError> {
    hash_from_display_hex(s).map_err(|e| ParamsError::InvalidConstant {
        field,
        reason: e.to_string(),
    })
}
