//! Compiled-in bootstrap peers and their conversion to peer address records.

use std::net::Ipv6Addr;
use std::time::{SystemTime, UNIX_EPOCH};

use kestrel_types::network::{PeerAddress, SeedSpec};
use kestrel_types::primitives::Timestamp;
use rand::Rng;

/// One week in seconds.
pub const ONE_WEEK: u64 = 7 * 24 * 60 * 60;

// TODO: replace both tables with crawled seed nodes before the next release;
// they still point at documentation address ranges.

/// Fixed seeds for the main network.
pub static MAIN_SEEDS: &[SeedSpec] = &[
    SeedSpec::ipv4(192, 0, 2, 17, 24325),
    SeedSpec::ipv4(192, 0, 2, 44, 24325),
    SeedSpec::ipv4(198, 51, 100, 3, 24325),
    SeedSpec::ipv4(198, 51, 100, 129, 24325),
    SeedSpec::ipv4(203, 0, 113, 8, 24325),
    SeedSpec::ipv4(203, 0, 113, 201, 24325),
    SeedSpec {
        addr: [
            0x20, 0x01, 0x0d, 0xb8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x11,
        ],
        port: 24325,
    },
];

/// Fixed seeds for the test network.
pub static TEST_SEEDS: &[SeedSpec] = &[
    SeedSpec::ipv4(192, 0, 2, 90, 24899),
    SeedSpec::ipv4(198, 51, 100, 77, 24899),
    SeedSpec::ipv4(203, 0, 113, 54, 24899),
];

/// Convert compact seed records into peer addresses.
///
/// Each address is stamped as last seen a uniformly random instant between
/// one and two weeks before `now`. Seeds look stale enough that addresses
/// learned from live peers are preferred, but not so stale that they are
/// never tried.
pub fn convert_seeds<R: Rng + ?Sized>(
    seeds: &[SeedSpec],
    now: Timestamp,
    rng: &mut R,
) -> Vec<PeerAddress> {
    seeds
        .iter()
        .map(|seed| {
            let last_seen = now
                .saturating_sub(rng.gen_range(0..ONE_WEEK))
                .saturating_sub(ONE_WEEK);
            PeerAddress::new(Ipv6Addr::from(seed.addr), seed.port, last_seen)
        })
        .collect()
}

/// [`convert_seeds`] against the wall clock and the thread-local RNG.
pub fn convert_seeds_now(seeds: &[SeedSpec]) -> Vec<PeerAddress> {
    convert_seeds(seeds, unix_now(), &mut rand::thread_rng())
}

pub(crate) fn unix_now() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
