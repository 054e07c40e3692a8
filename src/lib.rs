// Inventory Manager - Core Library
// Exposes the store and its helpers for the CLI, TUI, API server, and tests

pub mod config;
pub mod csv_io;
pub mod error;
pub mod format;
pub mod input;
pub mod inventory;
pub mod item;
pub mod logging;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use config::InventoryConfig;
pub use error::{InputError, InventoryError, ParseError, Result};
pub use input::{display_row, parse_item_input, parse_item_number};
pub use inventory::{Inventory, LoadReport};
pub use item::Item;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
