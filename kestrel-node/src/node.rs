use std::path::{Path, PathBuf};
use std::sync::Arc;

use kestrel_params::{NetworkProfile, NetworkProfileRegistry, StartupFlags};
use kestrel_types::primitives::hash_to_display_hex;
use tracing::{info, warn};

use crate::config::{NodeConfig, RpcConfig};
use crate::error::NodeError;

/// Where the RPC server listens and whether it checks credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcEndpoint {
    pub port: u16,
    pub authenticated: bool,
}

/// A node after parameter bootstrap: the network is chosen and every
/// component reads its parameters through `profile`.
#[derive(Debug)]
pub struct Node {
    profile: Arc<NetworkProfile>,
    data_dir: PathBuf,
    p2p_port: u16,
    rpc: Option<RpcEndpoint>,
}

impl Node {
    /// Build and verify every network profile, then select the one named by
    /// the command line and config flags.
    pub fn bootstrap(config: &NodeConfig, cli_flags: StartupFlags) -> Result<Self, NodeError> {
        let mut registry = NetworkProfileRegistry::new()?;
        let flags = cli_flags.merge(config.startup_flags());
        registry.select_from_flags(flags)?;
        let profile = registry.active_handle();

        let data_dir = network_data_dir(Path::new(&config.data_dir), &profile);
        let p2p_port = config.network.listen_port.unwrap_or(profile.default_port());
        let rpc = rpc_endpoint(&config.rpc, &profile);

        Ok(Self {
            profile,
            data_dir,
            p2p_port,
            rpc,
        })
    }

    pub fn profile(&self) -> &Arc<NetworkProfile> {
        &self.profile
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn p2p_port(&self) -> u16 {
        self.p2p_port
    }

    pub fn rpc(&self) -> Option<RpcEndpoint> {
        self.rpc
    }

    /// Prepare on-disk state and report the parameters the node runs with.
    pub fn start(&self) -> Result<(), NodeError> {
        std::fs::create_dir_all(&self.data_dir)?;
        let profile = &self.profile;
        info!(
            network = %profile.kind(),
            magic = %hex::encode(profile.magic()),
            genesis = %hash_to_display_hex(profile.genesis_hash()),
            data_dir = %self.data_dir.display(),
            "node parameters bootstrapped"
        );
        info!(
            p2p_port = self.p2p_port,
            fixed_seeds = profile.fixed_seeds().len(),
            "peer-to-peer endpoint"
        );
        match self.rpc {
            Some(rpc) => info!(
                rpc_port = rpc.port,
                authenticated = rpc.authenticated,
                "rpc endpoint"
            ),
            None => info!("rpc server disabled"),
        }
        Ok(())
    }
}

/// The data directory for a network: the base directory, plus the
/// network's subdirectory when it has one.
pub fn network_data_dir(base: &Path, profile: &NetworkProfile) -> PathBuf {
    match profile.data_directory_name() {
        "" => base.to_path_buf(),
        name => base.join(name),
    }
}

/// Resolve the RPC endpoint. On networks that require authentication the
/// server stays off until both a user and a password are configured.
pub fn rpc_endpoint(config: &RpcConfig, profile: &NetworkProfile) -> Option<RpcEndpoint> {
    if !config.enabled {
        return None;
    }
    let has_credentials = config.user.is_some() && config.password.is_some();
    if profile.requires_rpc_authentication() && !has_credentials {
        warn!(
            network = %profile.kind(),
            "rpc server disabled: set rpc.user and rpc.password to enable it on this network"
        );
        return None;
    }
    Some(RpcEndpoint {
        port: config.listen_port.unwrap_or(profile.rpc_port()),
        authenticated: has_credentials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_params::ParamsError;
    use kestrel_types::network::NetworkKind;

    fn config_in(dir: &Path) -> NodeConfig {
        NodeConfig {
            data_dir: dir.to_string_lossy().into_owned(),
            ..NodeConfig::default()
        }
    }

    #[test]
    fn test_bootstrap_defaults_to_production() {
        let tmp = tempfile::tempdir().unwrap();
        let node = Node::bootstrap(&config_in(tmp.path()), StartupFlags::default()).unwrap();
        assert_eq!(node.profile().kind(), NetworkKind::Production);
        assert_eq!(node.data_dir(), tmp.path());
        assert_eq!(node.p2p_port(), 24325);
        // No credentials configured on an authenticated network.
        assert_eq!(node.rpc(), None);
    }

    #[test]
    fn test_bootstrap_regtest_uses_subdirectory_and_open_rpc() {
        let tmp = tempfile::tempdir().unwrap();
        let node =
            Node::bootstrap(&config_in(tmp.path()), StartupFlags::new(true, false)).unwrap();
        assert_eq!(node.profile().kind(), NetworkKind::Regtest);
        assert_eq!(node.data_dir(), tmp.path().join("regtest"));
        assert_eq!(
            node.rpc(),
            Some(RpcEndpoint {
                port: 22214,
                authenticated: false
            })
        );
        node.start().unwrap();
        assert!(tmp.path().join("regtest").is_dir());
    }

    #[test]
    fn test_config_and_cli_flags_conflict() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config_in(tmp.path());
        config.testnet = true;
        let err = Node::bootstrap(&config, StartupFlags::new(true, false)).unwrap_err();
        assert!(matches!(
            err,
            NodeError::ParamsError(ParamsError::ConflictingNetworkFlags)
        ));
    }

    #[test]
    fn test_testnet_rpc_with_credentials_and_port_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config_in(tmp.path());
        config.testnet = true;
        config.network.listen_port = Some(40000);
        config.rpc.listen_port = Some(40001);
        config.rpc.user = Some("operator".to_string());
        config.rpc.password = Some("secret".to_string());

        let node = Node::bootstrap(&config, StartupFlags::default()).unwrap();
        assert_eq!(node.profile().kind(), NetworkKind::Test);
        assert_eq!(node.data_dir(), tmp.path().join("testnet"));
        assert_eq!(node.p2p_port(), 40000);
        assert_eq!(
            node.rpc(),
            Some(RpcEndpoint {
                port: 40001,
                authenticated: true
            })
        );
    }

    #[test]
    fn test_rpc_disabled_in_config() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config_in(tmp.path());
        config.rpc.enabled = false;
        let node = Node::bootstrap(&config, StartupFlags::new(true, false)).unwrap();
        assert_eq!(node.rpc(), None);
    }
}
