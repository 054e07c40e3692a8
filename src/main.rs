// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use inventory_manager::{
    csv_io, display_row, logging, parse_item_input, parse_item_number, Inventory,
    InventoryConfig,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "inventory", version, about = "Keep a list of items and prices in a text file")]
struct Cli {
    /// Inventory file
    #[arg(short, long, env = "INVENTORY_FILE", default_value = inventory_manager::config::DEFAULT_FILE)]
    file: PathBuf,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = inventory_manager::config::DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Write logs to this file (the TUI logs nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal UI (default)
    Tui,
    /// Print all items
    List,
    /// Add an item
    Add { name: String, price: String },
    /// Delete an item by its number in `list`
    Delete { number: String },
    /// Append items from a CSV file with a name,price header
    Import { csv: PathBuf },
    /// Write all items to a CSV file
    Export { csv: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = InventoryConfig::new(&cli.file).with_log_level(&cli.log_level);
    let command = cli.command.unwrap_or(Command::Tui);

    match (&command, &cli.log_file) {
        (_, Some(path)) => logging::init_file_logging(path, &config.log_level)?,
        (Command::Tui, None) => {}
        (_, None) => logging::init_logging(&config.log_level)?,
    }

    let mut inventory = Inventory::open(&config)
        .with_context(|| format!("Failed to open inventory {}", config.path().display()))?;

    match command {
        Command::Tui => run_ui_mode(inventory)?,
        Command::List => print_items(&inventory),
        Command::Add { name, price } => {
            let item = parse_item_input(&name, &price)?;
            inventory.add(item)?;
            print_items(&inventory);
        }
        Command::Delete { number } => {
            let index = parse_item_number(&number, inventory.len())?;
            let removed = inventory.delete(index)?;
            println!("Deleted {}", removed.name());
            print_items(&inventory);
        }
        Command::Import { csv } => run_import(&mut inventory, &csv)?,
        Command::Export { csv } => {
            let count = csv_io::export_csv(&csv, inventory.items())
                .with_context(|| format!("Failed to export to {}", csv.display()))?;
            println!("Exported {} items to {}", count, csv.display());
        }
    }

    Ok(())
}

fn print_items(inventory: &Inventory) {
    if inventory.is_empty() {
        println!("(no items)");
        return;
    }
    for (i, item) in inventory.items().iter().enumerate() {
        println!("{}", display_row(i + 1, item));
    }
}

fn run_import(inventory: &mut Inventory, csv: &Path) -> Result<()> {
    let report = csv_io::import_csv(inventory, csv)
        .with_context(|| format!("Failed to import {}", csv.display()))?;

    for row in &report.rejected {
        eprintln!("Skipped line {}: {}", row.line, row.error);
    }
    println!("Imported {} items ({} rejected)", report.added, report.rejected.len());
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(inventory: Inventory) -> Result<()> {
    let mut app = ui::App::new(inventory);
    ui::run_ui(&mut app)
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_inventory: Inventory) -> Result<()> {
    bail!("TUI mode not available; rebuild with --features tui or use the list/add/delete commands")
}
