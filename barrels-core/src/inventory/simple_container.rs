//! A fixed-size container backed by a `Vec`.

use crate::item::ItemStack;

use super::Container;

/// A simple container that stores items in a fixed-size vector.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleContainer {
    items: Vec<ItemStack>,
}

impl SimpleContainer {
    /// Creates a new container with the given number of slots.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            items: (0..size).map(|_| ItemStack::empty()).collect(),
        }
    }

    /// Iterates over `(slot, item)` for every occupied slot, in slot order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &ItemStack)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_empty())
    }
}

impl Container for SimpleContainer {
    fn size(&self) -> usize {
        self.items.len()
    }

    fn get_item(&self, slot: usize) -> &ItemStack {
        &self.items[slot]
    }

    fn get_item_mut(&mut self, slot: usize) -> &mut ItemStack {
        &mut self.items[slot]
    }

    fn set_item(&mut self, slot: usize, item: ItemStack) {
        self.items[slot] = item;
    }
}
