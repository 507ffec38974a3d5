use serde::{Deserialize, Serialize};

use kestrel_types::network::NetworkKind;

use crate::error::ParamsError;

/// The network-selection flags a node was started with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupFlags {
    #[serde(default)]
    pub regtest: bool,
    #[serde(default)]
    pub testnet: bool,
}

impl StartupFlags {
    pub fn new(regtest: bool, testnet: bool) -> Self {
        Self { regtest, testnet }
    }

    /// Combine two flag sources; a network requested by either is requested.
    pub fn merge(self, other: StartupFlags) -> Self {
        Self {
            regtest: self.regtest || other.regtest,
            testnet: self.testnet || other.testnet,
        }
    }

    /// The network these flags ask for. Requesting both networks is an
    /// error; no flag means the main network.
    pub fn network_kind(&self) -> Result<NetworkKind, ParamsError> {
        match (self.regtest, self.testnet) {
            (true, true) => Err(ParamsError::ConflictingNetworkFlags),
            (true, false) => Ok(NetworkKind::Regtest),
            (false, true) => Ok(NetworkKind::Test),
            (false, false) => Ok(NetworkKind::Production),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_precedence() {
        assert_eq!(
            StartupFlags::new(false, false).network_kind(),
            Ok(NetworkKind::Production)
        );
        assert_eq!(
            StartupFlags::new(true, false).network_kind(),
            Ok(NetworkKind::Regtest)
        );
        assert_eq!(
            StartupFlags::new(false, true).network_kind(),
            Ok(NetworkKind::Test)
        );
    }

    #[test]
    fn test_both_flags_conflict() {
        assert_eq!(
            StartupFlags::new(true, true).network_kind(),
            Err(ParamsError::ConflictingNetworkFlags)
        );
    }

    #[test]
    fn test_merge_is_union() {
        let cli = StartupFlags::new(false, true);
        let config = StartupFlags::new(true, false);
        assert_eq!(cli.merge(config), StartupFlags::new(true, true));
        assert_eq!(cli.merge(StartupFlags::default()), cli);
    }
}
