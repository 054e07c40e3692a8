use inventory_manager::{Inventory, InventoryConfig, InventoryError, Item};
use std::fs;
use tempfile::TempDir;

fn pairs(items: &[Item]) -> Vec<(String, f64)> {
    items
        .iter()
        .map(|i| (i.name().to_string(), i.price()))
        .collect()
}

#[test]
fn test_pen_and_book_scenario() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.txt");
    fs::write(&path, "").unwrap();

    let mut inv = Inventory::open(&InventoryConfig::new(&path)).unwrap();
    assert!(inv.list().is_empty());

    inv.add(Item::new("Pen", 10.0)).unwrap();
    assert_eq!(pairs(&inv.list()), vec![("Pen".to_string(), 10.0)]);

    inv.add(Item::new("Book", 50.0)).unwrap();
    assert_eq!(
        pairs(&inv.list()),
        vec![("Pen".to_string(), 10.0), ("Book".to_string(), 50.0)]
    );

    inv.delete(0).unwrap();
    assert_eq!(pairs(&inv.list()), vec![("Book".to_string(), 50.0)]);
}

#[test]
fn test_fresh_store_reads_back_what_was_saved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.txt");

    let written = vec![
        Item::new("Laptop", 999.0),
        Item::new("Mouse", 25.5),
        Item::new("Cable", 0.1 + 0.2),
        Item::new("Sticker", 0.0),
    ];

    {
        let mut inv = Inventory::new(&path).unwrap();
        for item in &written {
            inv.add(item.clone()).unwrap();
        }
    }

    let reopened = Inventory::new(&path).unwrap();
    assert_eq!(reopened.list(), written);
    assert!(reopened.last_load().is_complete());
}

#[test]
fn test_n_adds_grow_list_by_n() {
    let dir = TempDir::new().unwrap();
    let mut inv = Inventory::new(dir.path().join("inventory.txt")).unwrap();
    inv.add(Item::new("Seed", 1.0)).unwrap();

    for n in 1..=5usize {
        let before = inv.list().len();
        for k in 0..n {
            inv.add(Item::new(format!("Item{}", k), k as f64)).unwrap();
        }
        assert_eq!(inv.list().len(), before + n);
        assert_eq!(inv.list().last(), Some(&Item::new(format!("Item{}", n - 1), (n - 1) as f64)));
    }
}

#[test]
fn test_add_then_delete_first_restores_size() {
    let dir = TempDir::new().unwrap();
    let mut inv = Inventory::new(dir.path().join("inventory.txt")).unwrap();
    inv.add(Item::new("Book", 4000.0)).unwrap();
    let before = inv.list().len();

    inv.add(Item::new("Pen", 11.0)).unwrap();
    inv.delete(0).unwrap();

    assert_eq!(inv.list().len(), before);
}

#[test]
fn test_out_of_range_delete_leaves_list_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut inv = Inventory::new(dir.path().join("inventory.txt")).unwrap();

    // Empty inventory
    assert!(matches!(
        inv.delete(0),
        Err(InventoryError::IndexOutOfRange { index: 0, len: 0 })
    ));

    inv.add(Item::new("Pen", 10.0)).unwrap();
    let before = inv.list();
    for index in [1, 2, 100] {
        assert!(inv.delete(index).is_err());
        assert_eq!(inv.list(), before);
    }
}

#[test]
fn test_list_is_a_snapshot() {
    let dir = TempDir::new().unwrap();
    let mut inv = Inventory::new(dir.path().join("inventory.txt")).unwrap();
    inv.add(Item::new("Pen", 10.0)).unwrap();

    let mut snapshot = inv.list();
    snapshot.clear();

    assert_eq!(inv.len(), 1);
}

#[test]
fn test_hand_edited_file_with_bad_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.txt");
    fs::write(&path, "Pen 10\nBook 50\nBlue Pen 3\nLamp 20\n").unwrap();

    let mut inv = Inventory::new(&path).unwrap();
    assert_eq!(pairs(&inv.list()), vec![("Pen".to_string(), 10.0), ("Book".to_string(), 50.0)]);
    assert_eq!(inv.last_load().stopped_at.as_ref().map(|e| e.line), Some(3));

    // The next save rewrites the file from what was loaded
    inv.add(Item::new("Cup", 2.0)).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Pen 10\nBook 50\nCup 2\n");
}
