//! Item stacks and the metadata they carry.

mod item_stack;
mod meta;
pub mod nbt;
pub mod vanilla_items;

pub use item_stack::ItemStack;
pub use meta::{BARREL_SLOTS, BlockStateMeta, ContainerState, ItemMeta, container_slots};
