//! The item stack value type.

use std::fmt::{self, Display};

use barrels_utils::Identifier;

use crate::error::BarrelError;

use super::meta::{BlockStateMeta, ContainerState, ItemMeta};
use super::vanilla_items;

/// A stack of items of one type.
///
/// Stacks are plain values: cloning one yields an independent copy, including
/// any inventory embedded in its block state.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    item: Identifier,
    count: i32,
    meta: ItemMeta,
}

impl ItemStack {
    /// The empty stack.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            item: vanilla_items::AIR,
            count: 0,
            meta: ItemMeta::default(),
        }
    }

    /// Creates a stack with the default metadata for its type.
    #[must_use]
    pub fn new(item: Identifier, count: i32) -> Self {
        let meta = ItemMeta {
            block_state: BlockStateMeta::for_item(&item),
            ..ItemMeta::default()
        };
        Self { item, count, meta }
    }

    /// Creates a stack with explicit metadata.
    #[must_use]
    pub fn with_meta(item: Identifier, count: i32, meta: ItemMeta) -> Self {
        Self { item, count, meta }
    }

    /// Returns true for air or a non-positive count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count <= 0 || self.item == vanilla_items::AIR
    }

    /// The item type.
    #[must_use]
    pub fn item(&self) -> &Identifier {
        &self.item
    }

    /// Returns true if this stack is of the given type.
    #[must_use]
    pub fn is(&self, item: &Identifier) -> bool {
        self.item == *item
    }

    /// The number of items in the stack.
    #[must_use]
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Sets the number of items in the stack.
    pub fn set_count(&mut self, count: i32) {
        self.count = count;
    }

    /// Removes `amount` items from the stack.
    pub fn shrink(&mut self, amount: i32) {
        self.count -= amount;
    }

    /// Returns a copy of this stack and leaves it empty.
    pub fn copy_and_clear(&mut self) -> ItemStack {
        std::mem::replace(self, ItemStack::empty())
    }

    /// The stack's metadata.
    #[must_use]
    pub fn meta(&self) -> &ItemMeta {
        &self.meta
    }

    /// Mutable access to the stack's metadata.
    pub fn meta_mut(&mut self) -> &mut ItemMeta {
        &mut self.meta
    }

    /// The custom display name, if set.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.meta.display_name.as_deref()
    }

    /// The name players see: the custom name, or one derived from the type.
    #[must_use]
    pub fn visible_name(&self) -> String {
        match self.display_name() {
            Some(name) => name.to_string(),
            None => self.item.display_name(),
        }
    }

    /// The inventory embedded in this stack's barrel block state.
    pub fn barrel_state_mut(&mut self) -> Result<&mut ContainerState, BarrelError> {
        match &mut self.meta.block_state {
            BlockStateMeta::Barrel(state) => Ok(state),
            BlockStateMeta::Container(_) | BlockStateMeta::None => {
                Err(BarrelError::MissingBlockState {
                    item: self.item.clone(),
                })
            }
        }
    }

    /// Returns true if this stack is a container item with something inside.
    #[must_use]
    pub fn is_loaded_container(&self) -> bool {
        self.meta.block_state.has_contents()
    }

    /// Compares type and metadata, ignoring the count.
    #[must_use]
    pub fn is_same_item_same_components(&self, other: &ItemStack) -> bool {
        self.item == other.item && self.meta == other.meta
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::empty()
    }
}

impl Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.item, self.count)
    }
}
