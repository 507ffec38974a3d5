use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::encode::{write_var_bytes, Encodable};
use crate::primitives::Hash;
use crate::transaction::Transaction;

/// Size of an encoded block header in bytes.
pub const BLOCK_HEADER_SIZE: usize = 80;

/// The 80-byte header that the block hash commits to.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_block_hash: Hash,
    pub merkle_root: Hash,
    pub time: u32,
    /// Difficulty target in compact form.
    pub bits: u32,
    pub nonce: u32,
}

impl Encodable for BlockHeader {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&self.prev_block_hash);
        out.extend_from_slice(&self.merkle_root);
        out.extend_from_slice(&self.time.to_le_bytes());
        out.extend_from_slice(&self.bits.to_le_bytes());
        out.extend_from_slice(&self.nonce.to_le_bytes());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
    /// Block producer's signature. Not part of the header hash, and empty
    /// for blocks that were never signed (the genesis block among them).
    pub signature: Vec<u8>,
}

impl Encodable for Block {
    fn encode(&self, out: &mut Vec<u8>) {
        self.header.encode(out);
        self.transactions.encode(out);
        write_var_bytes(out, &self.signature);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::ZERO_HASH;

    fn sample_header() -> BlockHeader {
        BlockHeader {
            version: 1,
            prev_block_hash: ZERO_HASH,
            merkle_root: [0xab; 32],
            time: 1_502_755_772,
            bits: 0x207f_ffff,
            nonce: 5,
        }
    }

    #[test]
    fn test_header_encodes_to_80_bytes() {
        let bytes = sample_header().to_consensus_bytes();
        assert_eq!(bytes.len(), BLOCK_HEADER_SIZE);
        assert_eq!(&bytes[36..68], &[0xab; 32]);
        assert_eq!(&bytes[72..76], &[0xff, 0xff, 0x7f, 0x20]);
        assert_eq!(&bytes[76..80], &5u32.to_le_bytes());
    }

    #[test]
    fn test_block_encoding_appends_transactions_and_signature() {
        let block = Block {
            header: sample_header(),
            transactions: Vec::new(),
            signature: Vec::new(),
        };
        let bytes = block.to_consensus_bytes();
        assert_eq!(bytes.len(), BLOCK_HEADER_SIZE + 2);
        assert_eq!(&bytes[80..], &[0, 0]);
    }
}
