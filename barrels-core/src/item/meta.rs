//! Display metadata and embedded block state.

use barrels_utils::Identifier;

use crate::inventory::{Container, SimpleContainer};

use super::vanilla_items;

/// Number of slots in a barrel.
pub const BARREL_SLOTS: usize = 27;

/// Returns the slot count of the container block an item places, if any.
///
/// Barrels are included; callers that need to tell them apart use
/// [`BlockStateMeta::for_item`].
#[must_use]
pub fn container_slots(item: &Identifier) -> Option<usize> {
    if item.namespace != Identifier::VANILLA_NAMESPACE {
        return None;
    }
    let path: &str = &item.path;
    match path {
        "barrel" | "chest" | "trapped_chest" => Some(27),
        p if p.ends_with("shulker_box") => Some(27),
        "dispenser" | "dropper" | "crafter" => Some(9),
        "hopper" | "brewing_stand" => Some(5),
        "chiseled_bookshelf" => Some(6),
        "furnace" | "blast_furnace" | "smoker" => Some(3),
        _ => None,
    }
}

/// The inventory (and name) of a container block, either live as a snapshot
/// or embedded in an item.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerState {
    /// The name shown on the container's window, if renamed.
    pub custom_name: Option<String>,
    /// The container's slots.
    pub items: SimpleContainer,
}

impl ContainerState {
    /// Creates an unnamed, empty container state.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            custom_name: None,
            items: SimpleContainer::new(size),
        }
    }

    /// Returns true if any slot holds an item.
    #[must_use]
    pub fn has_contents(&self) -> bool {
        !self.items.is_empty()
    }
}

/// The block state an item carries, resolved once from the item type.
///
/// Barrels get their own variant so barrel-specific handling is a pattern
/// match instead of a type probe.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BlockStateMeta {
    /// The item places no container, or carries no block state at all.
    #[default]
    None,
    /// A container other than a barrel.
    Container(ContainerState),
    /// A barrel.
    Barrel(ContainerState),
}

impl BlockStateMeta {
    /// The empty block state a fresh stack of `item` carries.
    #[must_use]
    pub fn for_item(item: &Identifier) -> Self {
        match container_slots(item) {
            Some(size) if *item == vanilla_items::BARREL => Self::Barrel(ContainerState::new(size)),
            Some(size) => Self::Container(ContainerState::new(size)),
            None => Self::None,
        }
    }

    /// The embedded container, barrel or not.
    #[must_use]
    pub fn container(&self) -> Option<&ContainerState> {
        match self {
            Self::Container(state) | Self::Barrel(state) => Some(state),
            Self::None => None,
        }
    }

    /// Mutable access to the embedded container, barrel or not.
    pub fn container_mut(&mut self) -> Option<&mut ContainerState> {
        match self {
            Self::Container(state) | Self::Barrel(state) => Some(state),
            Self::None => None,
        }
    }

    /// Returns true if this is a container holding at least one item.
    #[must_use]
    pub fn has_contents(&self) -> bool {
        self.container().is_some_and(ContainerState::has_contents)
    }
}

/// Display metadata of an item stack.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemMeta {
    /// A custom display name overriding the item's default name.
    pub display_name: Option<String>,
    /// Descriptive lines shown under the name.
    pub lore: Vec<String>,
    /// The block state placed along with the item.
    pub block_state: BlockStateMeta,
}
