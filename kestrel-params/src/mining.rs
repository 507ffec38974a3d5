//! Offline search for a genesis nonce.
//!
//! Used only when minting constants for a new network; node startup never
//! calls into this module.

use kestrel_crypto::hash::block_hash;
use kestrel_types::block::BlockHeader;
use kestrel_types::primitives::{hash_to_display_hex, Hash};
use primitive_types::U256;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::profile::NetworkProfile;

/// Nonces between progress log lines (mask on the nonce).
const PROGRESS_MASK: u32 = 0xfff;

/// A header time and nonce whose hash meets the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenesisSolution {
    pub time: u32,
    pub nonce: u32,
    #[serde(serialize_with = "serialize_hash")]
    pub hash: Hash,
    /// Headers hashed, including the successful one.
    pub attempts: u64,
}

fn serialize_hash<S: serde::Serializer>(hash: &Hash, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&hash_to_display_hex(hash))
}

/// Whether a block hash, read as a little-endian 256-bit number, is at or
/// below `target`.
pub fn hash_meets_target(hash: &Hash, target: &U256) -> bool {
    U256::from_little_endian(hash) <= *target
}

/// Increment the nonce from `start` until the header hash meets `target`.
/// When the nonce wraps around to zero the time is bumped by one second, so
/// the search always terminates for any non-trivial target.
pub fn search_genesis(start: &BlockHeader, target: &U256) -> GenesisSolution {
    let mut header = start.clone();
    let mut attempts = 0u64;
    info!(
        time = header.time,
        nonce = header.nonce,
        bits = %format!("{:#010x}", header.bits),
        "searching for genesis block"
    );
    loop {
        let hash = block_hash(&header);
        attempts += 1;
        if hash_meets_target(&hash, target) {
            let solution = GenesisSolution {
                time: header.time,
                nonce: header.nonce,
                hash,
                attempts,
            };
            info!(
                time = solution.time,
                nonce = solution.nonce,
                hash = %hash_to_display_hex(&hash),
                merkle_root = %hash_to_display_hex(&header.merkle_root),
                "found genesis block"
            );
            return solution;
        }
        if header.nonce & PROGRESS_MASK == 0 {
            debug!(
                nonce = %format!("{:08x}", header.nonce),
                hash = %hash_to_display_hex(&hash),
                "genesis search progress"
            );
        }
        header.nonce = header.nonce.wrapping_add(1);
        if header.nonce == 0 {
            warn!(time = header.time, "nonce wrapped, incrementing time");
            header.time = header.time.wrapping_add(1);
        }
    }
}

/// Re-run the search for a built network profile, starting at its genesis
/// header with the given nonce and its proof-of-work limit as target.
pub fn search_for_profile(profile: &NetworkProfile, start_nonce: u32) -> GenesisSolution {
    let mut header = profile.genesis_block().header.clone();
    header.nonce = start_nonce;
    search_genesis(&header, profile.proof_of_work_limit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks;
    use kestrel_types::compact::limit_from_shift;

    fn regtest_profile() -> NetworkProfile {
        let main = networks::production().unwrap();
        let test = networks::test(&main).unwrap();
        networks::regtest(&test).unwrap()
    }

    #[test]
    fn test_regtest_search_reproduces_shipped_nonce() {
        let regtest = regtest_profile();
        let solution = search_for_profile(&regtest, 0);
        assert_eq!(solution.nonce, networks::REGTEST_GENESIS_NONCE);
        assert_eq!(solution.time, networks::REGTEST_GENESIS_TIME);
        assert_eq!(solution.attempts, 6);
        assert_eq!(&solution.hash, regtest.genesis_hash());
    }

    #[test]
    fn test_nonce_wrap_increments_time() {
        let regtest = regtest_profile();
        let solution = search_for_profile(&regtest, u32::MAX);
        assert_eq!(solution.time, networks::REGTEST_GENESIS_TIME + 1);
        assert_eq!(solution.nonce, 3);
        assert_eq!(solution.attempts, 5);
        assert_eq!(
            hash_to_display_hex(&solution.hash),
            "51aef3dbbd3d2d99ae8a2eca737f54ab7aac710131d5f422eca5f4ac68bc5634"
        );
    }

    #[test]
    fn test_trivial_target_accepts_first_header() {
        let regtest = regtest_profile();
        let header = regtest.genesis_block().header.clone();
        let solution = search_genesis(&header, &U256::MAX);
        assert_eq!(solution.nonce, header.nonce);
        assert_eq!(solution.attempts, 1);
    }

    #[test]
    fn test_hash_meets_target_reads_little_endian() {
        let mut hash = [0u8; 32];
        hash[31] = 0x80;
        assert!(!hash_meets_target(&hash, &limit_from_shift(1)));
        hash[31] = 0x7f;
        assert!(hash_meets_target(&hash, &limit_from_shift(1)));
    }

    #[test]
    fn test_shipped_genesis_hashes_meet_their_limits() {
        let main = networks::production().unwrap();
        let test = networks::test(&main).unwrap();
        for profile in [&main, &test] {
            assert!(hash_meets_target(
                profile.genesis_hash(),
                profile.proof_of_work_limit()
            ));
        }
    }
}
