use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use kestrel_params::StartupFlags;

use crate::error::NodeError;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "kestrel.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Join the test network.
    #[serde(default)]
    pub testnet: bool,
    /// Join the local regression test network.
    #[serde(default)]
    pub regtest: bool,
    /// Base data directory. Test and regtest state lives in a subdirectory.
    pub data_dir: String,
    pub network: NetworkConfig,
    pub rpc: RpcConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Override of the network's default peer port.
    #[serde(default)]
    pub listen_port: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    pub enabled: bool,
    /// Override of the network's default RPC port.
    #[serde(default)]
    pub listen_port: Option<u16>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            testnet: false,
            regtest: false,
            data_dir: dirs::home_dir()
                .map(|h| h.join(".kestrel").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./kestrel-data".to_string()),
            network: NetworkConfig::default(),
            rpc: RpcConfig {
                enabled: true,
                listen_port: None,
                user: None,
                password: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, NodeError> {
        let contents = std::fs::read_to_string(path).map_err(|e| NodeError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path, e),
        })?;
        let config: NodeConfig = toml::from_str(&contents).map_err(|e| NodeError::ConfigError {
            reason: format!("failed to parse config file '{}': {}", path, e),
        })?;
        Ok(config)
    }

    /// Load the named file, or fall back to `kestrel.toml` in the working
    /// directory, or to defaults when that file does not exist either. Only
    /// an explicitly named file is required to exist.
    pub fn resolve(path: Option<&str>) -> Result<Self, NodeError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Initialize a default configuration file in the given directory.
    pub fn init(dir: &str) -> Result<PathBuf, NodeError> {
        let dir_path = Path::new(dir);
        if !dir_path.exists() {
            std::fs::create_dir_all(dir_path)?;
        }

        let config = NodeConfig::default();
        let toml_str = toml::to_string_pretty(&config).map_err(|e| NodeError::ConfigError {
            reason: format!("failed to serialize default config: {}", e),
        })?;

        let config_path = dir_path.join(DEFAULT_CONFIG_FILE);
        std::fs::write(&config_path, toml_str)?;

        Ok(config_path)
    }

    /// Network-selection flags set in the config file.
    pub fn startup_flags(&self) -> StartupFlags {
        StartupFlags::new(self.regtest, self.testnet)
    }
}
