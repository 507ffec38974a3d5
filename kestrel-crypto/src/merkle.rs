use kestrel_types::primitives::{Hash, ZERO_HASH};
use kestrel_types::transaction::Transaction;

use crate::hash::{sha256d_pair, txid};

/// Merkle root over a list of leaf hashes.
///
/// Each level pairs adjacent nodes, duplicating the last node when the level
/// has an odd count. A single leaf is its own root; an empty list yields the
/// zero hash.
pub fn merkle_root(leaves: &[Hash]) -> Hash {
    if leaves.is_empty() {
        return ZERO_HASH;
    }
    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let left = &pair[0];
                let right = pair.get(1).unwrap_or(left);
                sha256d_pair(left, right)
            })
            .collect();
    }
    level[0]
}

/// Merkle root over the transaction ids of a block's transactions.
pub fn transactions_merkle_root(transactions: &[Transaction]) -> Hash {
    let leaves: Vec<Hash> = transactions.iter().map(txid).collect();
    merkle_root(&leaves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_root_is_zero() {
        assert_eq!(merkle_root(&[]), ZERO_HASH);
    }

    #[test]
    fn test_single_leaf_is_root() {
        let leaf = [7u8; 32];
        assert_eq!(merkle_root(&[leaf]), leaf);
    }

    #[test]
    fn test_two_leaves() {
        let root = merkle_root(&[[1u8; 32], [2u8; 32]]);
        assert_eq!(
            hex::encode(root),
            "39ce20bede82c96b8908bec4a157b09c549b3db90b9b474bda9ae9b9030310b4"
        );
    }

    #[test]
    fn test_odd_level_duplicates_last() {
        let root = merkle_root(&[[1u8; 32], [2u8; 32], [3u8; 32]]);
        assert_eq!(
            hex::encode(root),
            "223e023fadf1f053df26988871f893c821c28edf77d64a955e6c2a02d547bdac"
        );
    }
}
