//! Network parameters for the kestrel node.
//!
//! Each supported network (main, test, regtest) is described by an immutable
//! [`NetworkProfile`]: wire magic, ports, proof-of-work limit, address
//! prefixes, bootstrap peers and a genesis block that is rebuilt from literals
//! and checked against a compiled-in hash. [`NetworkProfileRegistry`] builds
//! all three at startup and holds the one chosen by the startup flags.

pub mod error;
pub mod genesis;
pub mod mining;
pub mod networks;
pub mod profile;
pub mod registry;
pub mod seeds;
pub mod selector;

pub use error::ParamsError;
pub use profile::NetworkProfile;
pub use registry::NetworkProfileRegistry;
pub use selector::StartupFlags;
