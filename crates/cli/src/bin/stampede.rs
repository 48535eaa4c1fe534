//! Stampede CLI.
//!
//! Generates staged, high-concurrency operation batches against a node to
//! benchmark throughput under controlled contention.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stampede_cli::{generate_genesis_toml, load_resources, CampaignFile, KeyFile};
use stampede_client::HttpTransport;
use stampede_engine::{ActorRegistry, Campaign, ResourceRegistry, Workflow};
use stampede_workloads::{AmmCatalog, KeyringSigner};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "stampede")]
#[command(about = "Workload generator for AMM-style contention benchmarks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive actor keys for a seed and export them as JSON
    Keys {
        /// Key derivation seed
        #[arg(long, default_value = "7")]
        seed: u64,

        /// Number of actors
        #[arg(long, default_value = "8")]
        actors: usize,

        /// Also derive the funder key
        #[arg(long)]
        with_funder: bool,

        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print genesis balance allocations for derived actors
    Genesis {
        /// Key derivation seed
        #[arg(long, default_value = "7")]
        seed: u64,

        /// Number of actors
        #[arg(long, default_value = "8")]
        actors: usize,

        /// Balance per actor, in native units
        #[arg(long, default_value = "1000000000000000000000000")]
        balance: u128,

        /// Also fund the funder account with this balance
        #[arg(long)]
        funder_balance: Option<u128>,
    },

    /// Probe a node's status endpoint
    Status {
        /// Node endpoint
        #[arg(short, long)]
        endpoint: String,
    },

    /// Run the campaign described by a TOML file
    Run {
        /// Campaign file
        #[arg(short, long, default_value = "campaign.toml")]
        config: PathBuf,

        /// Override the endpoint from the campaign file
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Wait for the node to be ready before starting
        #[arg(long)]
        wait_ready: bool,

        /// How long to wait for readiness (e.g. "30s", "2m")
        #[arg(long, default_value = "60s")]
        ready_timeout: humantime::Duration,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Keys {
            seed,
            actors,
            with_funder,
            output,
        } => {
            // No tracing here: key material goes to stdout or the file.
            let file = KeyFile::derive(seed, actors, with_funder);
            match output {
                Some(path) => {
                    file.write(&path)?;
                    println!("Wrote {} actor key(s) to {}", actors, path.display());
                }
                None => print!("{}", file.to_json()),
            }
        }

        Commands::Genesis {
            seed,
            actors,
            balance,
            funder_balance,
        } => {
            print!(
                "{}",
                generate_genesis_toml(seed, actors, balance, funder_balance)
            );
        }

        Commands::Status { endpoint } => {
            tracing_subscriber::fmt::init();
            let transport = HttpTransport::new(&endpoint);
            let status = transport.status().await?;
            println!("Endpoint:  {endpoint}");
            println!("Height:    {}", status.block_height.0);
            println!("Peers:     {}", status.connected_peers);
        }

        Commands::Run {
            config,
            endpoint,
            wait_ready,
            ready_timeout,
        } => {
            tracing_subscriber::fmt::init();

            let file = CampaignFile::load(&config)?;
            let engine_config = file.to_engine_config()?;
            let endpoint = endpoint.unwrap_or_else(|| file.endpoint.clone());

            let with_funder = engine_config.workflow == Workflow::Fund;
            let keyring = if with_funder {
                KeyringSigner::derive_with_funder(file.seed, engine_config.actor_count)
            } else {
                KeyringSigner::derive(file.seed, engine_config.actor_count)
            };
            let actors = match keyring.funder_address() {
                Some(funder) => ActorRegistry::new(keyring.addresses()).with_funder(funder),
                None => ActorRegistry::new(keyring.addresses()),
            };

            let resources = match &file.resources {
                Some(path) => load_resources(path)?,
                None => ResourceRegistry::empty(),
            };
            let catalog = AmmCatalog::with_params(resources.router(), file.to_amm_params());

            let transport = HttpTransport::new(&endpoint);
            if wait_ready {
                info!(endpoint = %endpoint, "waiting for node");
                let status = transport.wait_for_ready(*ready_timeout).await?;
                info!(height = %status.block_height, "node ready");
            }

            let cancel = CancellationToken::new();
            let interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("interrupt received, cancelling campaign");
                    interrupt.cancel();
                }
            });

            let campaign = Campaign::new(engine_config, actors, resources)?;
            let report = campaign.run(&transport, &keyring, &catalog, &cancel).await?;
            report.print_summary();

            if !report.is_clean() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
