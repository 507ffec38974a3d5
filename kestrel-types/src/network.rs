use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use serde::{Deserialize, Serialize};

use crate::primitives::Timestamp;

/// Service bit advertised by full nodes that serve the whole chain.
pub const NODE_NETWORK: u64 = 1;

/// Which chain a node participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    Production,
    Test,
    Regtest,
}

impl NetworkKind {
    pub const ALL: [NetworkKind; 3] = [
        NetworkKind::Production,
        NetworkKind::Test,
        NetworkKind::Regtest,
    ];

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            NetworkKind::Production => "Main network",
            NetworkKind::Test => "Test network",
            NetworkKind::Regtest => "Regression test network",
        }
    }
}

impl std::fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Classes of base58-check encoded strings that carry a per-network prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressClass {
    PubkeyHash,
    ScriptHash,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

impl AddressClass {
    pub const ALL: [AddressClass; 5] = [
        AddressClass::PubkeyHash,
        AddressClass::ScriptHash,
        AddressClass::SecretKey,
        AddressClass::ExtPublicKey,
        AddressClass::ExtSecretKey,
    ];
}

/// A compiled-in bootstrap peer: a 16-byte address (IPv6, or IPv4-mapped
/// IPv6) and a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSpec {
    pub addr: [u8; 16],
    pub port: u16,
}

impl SeedSpec {
    /// Seed entry for an IPv4 address, stored in its IPv4-mapped form.
    pub const fn ipv4(a: u8, b: u8, c: u8, d: u8, port: u16) -> Self {
        Self {
            addr: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, a, b, c, d],
            port,
        }
    }
}

/// A known peer address with the time it was last seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerAddress {
    pub ip: Ipv6Addr,
    pub port: u16,
    pub services: u64,
    pub last_seen: Timestamp,
}

impl PeerAddress {
    pub fn new(ip: Ipv6Addr, port: u16, last_seen: Timestamp) -> Self {
        Self {
            ip,
            port,
            services: NODE_NETWORK,
            last_seen,
        }
    }

    /// Socket address to dial, unwrapping IPv4-mapped addresses.
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = match self.ip.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(self.ip),
        };
        SocketAddr::new(ip, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_network_kind_display_names() {
        assert_eq!(NetworkKind::Production.to_string(), "Main network");
        assert_eq!(NetworkKind::Test.to_string(), "Test network");
        assert_eq!(NetworkKind::Regtest.to_string(), "Regression test network");
    }

    #[test]
    fn test_network_kind_serde_lowercase() {
        let json = serde_json::to_string(&NetworkKind::Regtest).unwrap();
        assert_eq!(json, "\"regtest\"");
        let class: AddressClass = serde_json::from_str("\"ext_public_key\"").unwrap();
        assert_eq!(class, AddressClass::ExtPublicKey);
    }

    #[test]
    fn test_seed_spec_ipv4_mapping() {
        let seed = SeedSpec::ipv4(10, 1, 2, 3, 24325);
        let peer = PeerAddress::new(Ipv6Addr::from(seed.addr), seed.port, 0);
        assert_eq!(
            peer.socket_addr(),
            SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3)), 24325)
        );
        assert_eq!(peer.services, NODE_NETWORK);
    }

    #[test]
    fn test_native_ipv6_stays_v6() {
        let ip: Ipv6Addr = "2001:db8::1".parse().unwrap();
        let peer = PeerAddress::new(ip, 1, 0);
        assert!(peer.socket_addr().is_ipv6());
    }
}
