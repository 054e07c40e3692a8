// Inventory Manager - Web Server
// REST API with Axum over the same inventory file the CLI uses

use anyhow::{Context, Result};
use clap::Parser;
use inventory_manager::server::{router, AppState};
use inventory_manager::{logging, Inventory, InventoryConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "inventory-server", version, about = "Serve the inventory over HTTP")]
struct Args {
    /// Inventory file
    #[arg(short, long, env = "INVENTORY_FILE", default_value = inventory_manager::config::DEFAULT_FILE)]
    file: PathBuf,

    /// Address to listen on
    #[arg(long, env = "INVENTORY_ADDR", default_value = "127.0.0.1:3000")]
    addr: String,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = inventory_manager::config::DEFAULT_LOG_LEVEL)]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = InventoryConfig::new(&args.file).with_log_level(&args.log_level);
    logging::init_logging(&config.log_level)?;

    let inventory = Inventory::open(&config)
        .with_context(|| format!("Failed to open inventory {}", config.path().display()))?;
    info!(path = %config.path().display(), items = inventory.len(), "inventory opened");

    let app = router(AppState::new(inventory));

    let listener = tokio::net::TcpListener::bind(&args.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", args.addr))?;

    info!(addr = %args.addr, "server running, API under /api/items");

    axum::serve(listener, app)
        .await
        .context("Server stopped with an error")?;

    Ok(())
}
