//! Operator console for a single vending machine.
//!
//! Reads one command per line from stdin and prints the result to stdout. Logging goes
//! to stderr and is controlled with `RUST_LOG`.

use clap::Parser;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;
use vending_core::MachineConfig;
use vending_service::config::load_config;
use vending_service::lifecycle::{setup_tracing, VendingSystem};
use vending_service::session::Session;

#[derive(Parser, Debug)]
#[command(name = "vending", version, about = "Vending machine console")]
struct Cli {
    /// JSON file with `productList` and `coinInventory`. Uses the factory load-out if
    /// omitted.
    #[arg(short, long, env = "VENDING_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON, one object per line.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MachineConfig::default(),
    };

    let system = VendingSystem::new();
    let id = system.client.commission(config.clone()).await?;
    let session = Session::new(system.client.clone(), id, config);
    info!(%id, "Console attached");

    if !cli.json {
        println!("Machine ready. Type 'help' for commands.");
    }

    let mut stdout = tokio::io::stdout();
    session
        .run_console(BufReader::new(tokio::io::stdin()), &mut stdout, cli.json)
        .await?;

    drop(session);
    system.shutdown().await?;
    Ok(())
}
