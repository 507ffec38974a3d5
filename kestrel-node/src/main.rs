use clap::Parser;
use tracing_subscriber::EnvFilter;

use kestrel_node::cli;

fn main() {
    let cli = cli::Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the config file's level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    if let Err(e) = cli::run(cli, config) {
        tracing::error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}
