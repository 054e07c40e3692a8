// Error types for the inventory library
// Every failure the store can hit is a variant here; nothing is swallowed.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A line of the inventory file that could not be read as `<name> <price>`
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,
    pub content: String,
    pub reason: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({:?})", self.line, self.reason, self.content)
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("index {index} out of range (inventory has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("parse error at {0}")]
    Parse(#[from] ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no valid rows in {} ({rejected} rejected)", .path.display())]
    NoValidRows { path: PathBuf, rejected: usize },
}

impl InventoryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InventoryError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;

/// Rejected user input (front-end validation)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("item name must not be empty")]
    EmptyName,

    #[error("item name must not contain whitespace: {0:?}")]
    NameHasWhitespace(String),

    #[error("price is not a number: {0:?}")]
    InvalidPrice(String),

    #[error("price {price} outside allowed range 0..={max}")]
    PriceOutOfRange { price: f64, max: f64 },

    #[error("item number is not a whole number: {0:?}")]
    InvalidNumber(String),

    #[error("item number {number} outside 1..={len}")]
    NumberOutOfRange { number: usize, len: usize },
}
