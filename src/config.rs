// Runtime configuration
// The inventory file path is always explicit; nothing reads a global path.

use std::path::{Path, PathBuf};

pub const DEFAULT_FILE: &str = "inventory.txt";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryConfig {
    /// Persistent inventory file
    pub path: PathBuf,

    /// Default tracing filter when RUST_LOG is not set
    pub log_level: String,
}

impl InventoryConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
