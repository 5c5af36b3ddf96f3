//! This module contains the inventory system.

mod action;
mod container;
mod simple_container;

pub use action::{InventoryAction, InventoryKind, SlotType};
pub use container::Container;
pub use simple_container::SimpleContainer;
