use kestrel_types::block::BlockHeader;
use kestrel_types::encode::Encodable;
use kestrel_types::primitives::Hash;
use kestrel_types::transaction::Transaction;
use sha2::{Digest, Sha256};

/// Compute a single SHA-256 of the given data.
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Compute SHA-256 applied twice, the digest used for every block and
/// transaction identifier.
pub fn sha256d(data: &[u8]) -> Hash {
    sha256(&sha256(data))
}

/// Hash two nodes together (merkle interior node).
pub fn sha256d_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    let first: Hash = hasher.finalize().into();
    sha256(&first)
}

/// Transaction id: double SHA-256 of the consensus encoding.
pub fn txid(tx: &Transaction) -> Hash {
    sha256d(&tx.to_consensus_bytes())
}

/// Block hash: double SHA-256 of the 80-byte header.
pub fn block_hash(header: &BlockHeader) -> Hash {
    sha256d(&header.to_consensus_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256d_empty_input() {
        assert_eq!(
            hex::encode(sha256d(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_pair_matches_concatenation() {
        let left = [1u8; 32];
        let right = [2u8; 32];
        let mut concat = Vec::with_capacity(64);
        concat.extend_from_slice(&left);
        concat.extend_from_slice(&right);
        assert_eq!(sha256d_pair(&left, &right), sha256d(&concat));
    }
}
