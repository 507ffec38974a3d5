use clap::{Args, Parser, Subcommand};

use kestrel_params::mining::search_for_profile;
use kestrel_params::profile::ProfileSummary;
use kestrel_params::{NetworkProfile, NetworkProfileRegistry, StartupFlags};
use kestrel_types::network::{AddressClass, NetworkKind};

use crate::config::NodeConfig;
use crate::error::NodeError;
use crate::node::Node;

#[derive(Parser)]
#[command(
    name = "kestrel",
    about = "Kestrel full node: network parameters and genesis bootstrap",
    version
)]
pub struct Cli {
    /// Path to config file (default: ./kestrel.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Network selection flags. At most one may be given.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct NetworkArgs {
    /// Use the test network
    #[arg(long)]
    pub testnet: bool,
    /// Use the local regression test network
    #[arg(long)]
    pub regtest: bool,
}

impl NetworkArgs {
    pub fn flags(&self) -> StartupFlags {
        StartupFlags::new(self.regtest, self.testnet)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Bootstrap the node's network parameters and start it
    Run {
        #[command(flatten)]
        network: NetworkArgs,
        /// Override the base data directory
        #[arg(long)]
        data_dir: Option<String>,
    },
    /// Initialize a new node configuration
    Init {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: String,
    },
    /// Show a network's parameters and genesis block
    Genesis {
        #[command(flatten)]
        network: NetworkArgs,
        /// Show every network instead of the selected one
        #[arg(long)]
        all: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Search for a genesis nonce under a network's proof-of-work limit
    MineGenesis {
        #[command(flatten)]
        network: NetworkArgs,
        /// Nonce to start searching from
        #[arg(long, default_value_t = 0)]
        start_nonce: u32,
    },
}

impl Cli {
    /// The config this invocation runs with.
    pub fn load_config(&self) -> Result<NodeConfig, NodeError> {
        NodeConfig::resolve(self.config.as_deref())
    }
}

pub fn run(cli: Cli, mut config: NodeConfig) -> Result<(), NodeError> {
    match cli.command {
        Command::Run { network, data_dir } => {
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }
            let node = Node::bootstrap(&config, network.flags())?;
            node.start()
        }
        Command::Init { dir } => {
            let path = NodeConfig::init(&dir)?;
            tracing::info!("Node configuration written to {}", path.display());
            Ok(())
        }
        Command::Genesis { network, all, json } => {
            let flags = network.flags().merge(config.startup_flags());
            flags.network_kind()?;
            let mut registry = NetworkProfileRegistry::new()?;
            let kinds = if all {
                NetworkKind::ALL.to_vec()
            } else {
                vec![registry.select_from_flags(flags)?]
            };
            let profiles: Vec<&NetworkProfile> =
                kinds.iter().map(|kind| registry.profile(*kind)).collect();
            if json {
                let summaries: Vec<ProfileSummary> =
                    profiles.iter().map(|p| ProfileSummary::from(*p)).collect();
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for profile in profiles {
                    print!("{}", render_summary(&ProfileSummary::from(profile)));
                }
            }
            Ok(())
        }
        Command::MineGenesis {
            network,
            start_nonce,
        } => {
            let mut registry = NetworkProfileRegistry::new()?;
            registry.select_from_flags(network.flags().merge(config.startup_flags()))?;
            let solution = search_for_profile(registry.active_profile(), start_nonce);
            println!("{}", serde_json::to_string_pretty(&solution)?);
            Ok(())
        }
    }
}

/// Human-readable rendering of a profile summary.
pub fn render_summary(s: &ProfileSummary) -> String {
    let prefixes = &s.address_prefixes;
    let mut out = String::new();
    out.push_str(&format!("{}\n", s.network));
    out.push_str(&format!("  magic            {}\n", s.magic));
    out.push_str(&format!("  ports            {} (p2p) | {} (rpc)\n", s.default_port, s.rpc_port));
    out.push_str(&format!("  pow limit        {}\n", s.proof_of_work_limit));
    out.push_str(&format!("  genesis hash     {}\n", s.genesis_hash));
    out.push_str(&format!("  merkle root      {}\n", s.genesis_merkle_root));
    out.push_str(&format!(
        "  genesis header   time={} bits={} nonce={}\n",
        s.genesis_time, s.genesis_bits, s.genesis_nonce
    ));
    for class in AddressClass::ALL {
        out.push_str(&format!(
            "  prefix {:<14}{}\n",
            format!("{:?}", class),
            hex::encode(prefixes.get(class))
        ));
    }
    out.push_str(&format!("  fixed seeds      {}\n", s.fixed_seeds));
    out.push_str(&format!(
        "  data dir         {}\n",
        if s.data_directory_name.is_empty() {
            "(base)"
        } else {
            s.data_directory_name.as_str()
        }
    ));
    out.push_str(&format!(
        "  rpc auth         {}\n",
        if s.requires_rpc_authentication { "required" } else { "off" }
    ));
    out
}
