// Inventory store - ordered items backed by a flat text file
//
// The file is rewritten after every mutation, so on return from add/delete
// the file always mirrors `items` line for line.

use crate::config::InventoryConfig;
use crate::error::{InventoryError, ParseError, Result};
use crate::format;
use crate::item::Item;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Outcome of reading the inventory file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadReport {
    pub loaded: usize,
    /// First unreadable line; everything from it onwards was ignored
    pub stopped_at: Option<ParseError>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.stopped_at.is_none()
    }
}

#[derive(Debug)]
pub struct Inventory {
    path: PathBuf,
    items: Vec<Item>,
    last_load: LoadReport,
}

impl Inventory {
    /// Open the inventory at `path`, loading whatever is already there
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let mut inventory = Self {
            path: path.into(),
            items: Vec::new(),
            last_load: LoadReport::default(),
        };
        inventory.load()?;
        Ok(inventory)
    }

    pub fn open(config: &InventoryConfig) -> Result<Self> {
        Self::new(config.path())
    }

    /// Re-read the file, replacing the in-memory items
    ///
    /// A missing file is an empty inventory. A malformed line ends the read;
    /// the items before it are kept and the line is reported.
    pub fn load(&mut self) -> Result<LoadReport> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "inventory file not found, starting empty");
                Vec::new()
            }
            Err(e) => return Err(InventoryError::io(&self.path, e)),
        };

        let (items, stopped_at) = format::parse_bytes(&bytes);

        if let Some(err) = &stopped_at {
            warn!(
                path = %self.path.display(),
                line = err.line,
                reason = %err.reason,
                kept = items.len(),
                "inventory file truncated at unreadable line"
            );
        }

        self.items = items;
        self.last_load = LoadReport {
            loaded: self.items.len(),
            stopped_at,
        };

        debug!(path = %self.path.display(), count = self.items.len(), "inventory loaded");
        Ok(self.last_load.clone())
    }

    /// Write all items to the file
    ///
    /// Writes a uniquely named temp file in the same directory and renames it
    /// over the target, so a crash leaves either the old or the new contents,
    /// never a partial file. The temp file is removed if anything fails.
    pub fn save(&self) -> Result<()> {
        let mut buf = Vec::new();
        format::write_items(&mut buf, &self.items).map_err(|e| InventoryError::io(&self.path, e))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| InventoryError::io(dir, e))?;
        tmp.write_all(&buf)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| InventoryError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| InventoryError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), count = self.items.len(), "inventory saved");
        Ok(())
    }

    /// Append an item and persist
    ///
    /// If the write fails the item is not kept.
    pub fn add(&mut self, item: Item) -> Result<()> {
        info!(name = item.name(), price = item.price(), "adding item");
        self.items.push(item);

        if let Err(e) = self.save() {
            self.items.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Append several items with a single write
    pub fn add_all(&mut self, items: impl IntoIterator<Item = Item>) -> Result<usize> {
        let before = self.items.len();
        self.items.extend(items);
        let added = self.items.len() - before;

        info!(count = added, "adding items");
        if let Err(e) = self.save() {
            self.items.truncate(before);
            return Err(e);
        }
        Ok(added)
    }

    /// Remove the item at `index` (0-based) and persist
    ///
    /// Out-of-range indices leave both memory and file untouched.
    pub fn delete(&mut self, index: usize) -> Result<Item> {
        let len = self.items.len();
        if index >= len {
            warn!(index, len, "delete index out of range");
            return Err(InventoryError::IndexOutOfRange { index, len });
        }

        let removed = self.items.remove(index);
        if let Err(e) = self.save() {
            self.items.insert(index, removed);
            return Err(e);
        }

        info!(index, name = removed.name(), "deleted item");
        Ok(removed)
    }

    /// Snapshot of the current items
    pub fn list(&self) -> Vec<Item> {
        self.items.clone()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn last_load(&self) -> &LoadReport {
        &self.last_load
    }

    pub fn total_value(&self) -> f64 {
        self.items.iter().map(Item::price).sum()
    }
}
