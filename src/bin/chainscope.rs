//! Minimal CLI entrypoint for Chainscope
//! Loads the configuration, connects to the JSON-RPC node and serves the
//! explorer pages.

use anyhow::{Context, Result};
use chainscope::chain::{ChainRpc, NodeClient, NodeClientConfig};
use chainscope::config::Config;
use chainscope::explorer::Explorer;
use chainscope::web::{self, AppState};

use clap::Parser;
use std::net::{SocketAddr, TcpListener};
use std::path::Path;
use std::sync::Arc;

use clap::Subcommand;

#[derive(Debug, Parser)]
#[command(name = "chainscope", author, version, about = "Chainscope CLI", long_about = None)]
struct Args {
    /// Path to the configuration file (TOML)
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// JSON-RPC endpoint, overrides the configured node.rpc_url
    #[arg(long, env = "CHAINSCOPE_RPC_URL")]
    rpc_url: Option<String>,

    /// Print the default configuration to stdout and exit
    #[arg(long)]
    print_default_config: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the explorer web interface
    Serve {
        /// Listen address, e.g. 0.0.0.0:3000 (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Generate a default configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "config.toml")]
        config: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Check node connectivity and print the latest block number
    Probe,
}

#[tokio::main]
async fn main() -> Result<()> {
    chainscope::utils::init_logging("info");
    chainscope::metrics::init().expect("metrics init");

    let args = Args::parse();

    if args.print_default_config {
        println!("{}", Config::default_toml());
        return Ok(());
    }

    // Handle subcommands first so we can fall back to the default serve behaviour
    if let Some(cmd) = &args.command {
        match cmd {
            | Command::Serve { bind } => {
                let config = load_config(&args)?;
                run_service(&config, bind.as_deref()).await?;
                return Ok(());
            }
            | Command::Init { config, force } => {
                let cfg_path = std::path::PathBuf::from(config);

                if cfg_path.exists() && !force {
                    eprintln!("Config already exists. Use --force to overwrite.");
                    std::process::exit(1);
                }

                if let Some(parent) = cfg_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }

                std::fs::write(&cfg_path, Config::default_toml())?;
                println!("Wrote default config to {}", cfg_path.display());
                return Ok(());
            }
            | Command::Probe => {
                let config = load_config(&args)?;
                let client = NodeClient::new(NodeClientConfig::from(&config.node))
                    .context("Failed to create node client")?;
                let latest = client
                    .latest_block_number()
                    .await
                    .context("Node did not answer eth_blockNumber")?;
                println!("{} -> block {}", config.node.rpc_url, latest);
                return Ok(());
            }
        }
    }

    let config = load_config(&args)?;
    log::info!("Starting explorer via default command");
    run_service(&config, None).await
}

/// Load configuration from disk, otherwise fall back to defaults, then
/// apply CLI overrides and validate.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = if Path::new(&args.config).exists() {
        Config::from_file(&args.config).context("Failed to load configuration")?
    } else {
        log::warn!("Configuration file '{}' not found - using defaults", args.config);
        let mut config = Config::default();
        config.merge_env()?;
        config
    };

    if let Some(rpc_url) = &args.rpc_url {
        config.node.rpc_url = rpc_url.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn run_service(config: &Config, bind_override: Option<&str>) -> Result<()> {
    let client = NodeClient::new(NodeClientConfig::from(&config.node))
        .context("Failed to create node client")?;
    let chain: Arc<dyn ChainRpc> = Arc::new(client);
    let explorer = Explorer::new(chain, config.chain.clone(), config.explorer.clone());
    let state = Arc::new(AppState::new(explorer, config));
    let app = web::router(state);

    let bind = bind_override.unwrap_or(&config.server.bind);
    let primary_addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", bind))?;
    let listener = match TcpListener::bind(primary_addr) {
        | Ok(l) => l,
        | Err(e) => {
            log::warn!("Address {} unavailable: {} - binding to random port", primary_addr, e);
            TcpListener::bind("127.0.0.1:0").context("failed to bind random port")?
        }
    };
    let addr = listener.local_addr().context("no local_addr")?;
    log::info!("Serving explorer on http://{}", addr);
    log::info!("Upstream node: {}", config.node.rpc_url);

    let server = axum::Server::from_tcp(listener)
        .context("failed to create server from listener")?
        .serve(app.into_make_service());
    let server_handle = tokio::spawn(server);

    tokio::signal::ctrl_c().await?;
    log::info!("Shutdown signal received. Stopping...");
    server_handle.abort();

    Ok(())
}
