//! Barrel behaviors: what happens when a barrel is broken, and where barrel
//! items may not go.

mod barrel;
mod fuel_slot;

pub use barrel::{BarrelDrops, BarrelSerializer, BreakOutcome, DEFAULT_PREVIEW_LIMIT};
pub use fuel_slot::{FURNACE_FUEL_SLOT, FuelSlotGuard, is_non_empty_barrel};
