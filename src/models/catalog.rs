//! Item catalog.
//!
//! The fixed list of modules in input order, with a code index for lookup.

use std::collections::HashMap;

use super::Item;

/// Ordered, code-unique set of items.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<Item>,
    index: HashMap<String, usize>,
}

impl ItemCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item. Returns `false` (and leaves the catalog unchanged)
    /// if an item with the same code already exists.
    pub fn insert(&mut self, item: Item) -> bool {
        if self.index.contains_key(&item.code) {
            return false;
        }
        self.index.insert(item.code.clone(), self.items.len());
        self.items.push(item);
        true
    }

    /// Items in catalog order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Looks up an item by code.
    pub fn get(&self, code: &str) -> Option<&Item> {
        self.index.get(code).map(|&i| &self.items[i])
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
