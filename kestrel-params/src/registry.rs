use std::sync::Arc;

use kestrel_types::network::NetworkKind;
use tracing::{info, warn};

use crate::error::ParamsError;
use crate::networks;
use crate::profile::NetworkProfile;
use crate::selector::StartupFlags;

/// Owns one profile per network and tracks which one is active.
///
/// All three profiles are built and verified in [`NetworkProfileRegistry::new`].
/// The active network starts as the main network and can be chosen once
/// with [`select_network`](Self::select_network). Selection takes `&mut self`,
/// so it has to happen before the registry is shared; after that every
/// reader sees the same immutable profile.
#[derive(Debug, Clone)]
pub struct NetworkProfileRegistry {
    production: Arc<NetworkProfile>,
    test: Arc<NetworkProfile>,
    regtest: Arc<NetworkProfile>,
    active: NetworkKind,
    selected: bool,
}

impl NetworkProfileRegistry {
    /// Build all network profiles. Fails if any genesis block does not
    /// match its compiled-in hash.
    pub fn new() -> Result<Self, ParamsError> {
        let production = networks::production()?;
        let test = networks::test(&production)?;
        let regtest = networks::regtest(&test)?;
        Ok(Self {
            production: Arc::new(production),
            test: Arc::new(test),
            regtest: Arc::new(regtest),
            active: NetworkKind::Production,
            selected: false,
        })
    }

    pub fn profile(&self, kind: NetworkKind) -> &NetworkProfile {
        self.slot(kind)
    }

    /// Shared handle to a profile, for components that outlive the registry borrow.
    pub fn handle(&self, kind: NetworkKind) -> Arc<NetworkProfile> {
        Arc::clone(self.slot(kind))
    }

    pub fn active_kind(&self) -> NetworkKind {
        self.active
    }

    pub fn active_profile(&self) -> &NetworkProfile {
        self.slot(self.active)
    }

    pub fn active_handle(&self) -> Arc<NetworkProfile> {
        self.handle(self.active)
    }

    /// Whether a network has been explicitly selected yet.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Make `kind` the active network. Allowed once; a second call fails
    /// and leaves the active network unchanged.
    pub fn select_network(&mut self, kind: NetworkKind) -> Result<(), ParamsError> {
        if self.selected {
            warn!(current = %self.active, requested = %kind, "network already selected");
            return Err(ParamsError::NetworkAlreadySelected {
                current: self.active,
            });
        }
        self.active = kind;
        self.selected = true;
        info!(network = %kind, "selected network");
        Ok(())
    }

    /// Select the network named by the startup flags. Asking for both
    /// regtest and testnet fails without touching the active network.
    pub fn select_from_startup_flags(
        &mut self,
        regtest: bool,
        testnet: bool,
    ) -> Result<NetworkKind, ParamsError> {
        self.select_from_flags(StartupFlags::new(regtest, testnet))
    }

    pub fn select_from_flags(&mut self, flags: StartupFlags) -> Result<NetworkKind, ParamsError> {
        let kind = flags.network_kind()?;
        self.select_network(kind)?;
        Ok(kind)
    }

    fn slot(&self, kind: NetworkKind) -> &Arc<NetworkProfile> {
        match kind {
            NetworkKind::Production => &self.production,
            NetworkKind::Test => &self.test,
            NetworkKind::Regtest => &self.regtest,
        }
    }
}
