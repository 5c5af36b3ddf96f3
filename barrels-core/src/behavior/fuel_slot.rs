//! Keeps barrels out of furnace fuel slots.
//!
//! A barrel burns as fuel, and burning one that holds items would destroy
//! them. Clicks, drags and automatic transfers that would put a barrel into a
//! furnace are cancelled.

use crate::event::{EventDecision, InventoryClickEvent, InventoryDragEvent, InventoryMoveItemEvent};
use crate::inventory::{InventoryAction, SlotType};
use crate::item::{ItemStack, vanilla_items};

/// Raw index of the fuel slot in a furnace window.
pub const FURNACE_FUEL_SLOT: usize = 1;

/// Returns true if `item` is a barrel that may hold contents.
///
/// Every barrel counts, whether or not anything is embedded in it.
#[must_use]
pub fn is_non_empty_barrel(item: &ItemStack) -> bool {
    !item.is_empty() && item.is(&vanilla_items::BARREL)
}

/// Cancels inventory interactions that would feed a barrel to a furnace.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuelSlotGuard;

impl FuelSlotGuard {
    /// Checks a click in an open inventory window.
    #[must_use]
    pub fn on_inventory_click(&self, event: &InventoryClickEvent) -> EventDecision {
        if !event.inventory.is_furnace() {
            return EventDecision::Allow;
        }

        let blocked = match event.action {
            action if action.places_cursor() => {
                event.slot_type == SlotType::Fuel && is_non_empty_barrel(&event.cursor)
            }
            InventoryAction::HotbarSwap => {
                event.slot_type == SlotType::Fuel
                    && event.hotbar_item.as_ref().is_some_and(is_non_empty_barrel)
            }
            InventoryAction::MoveToOtherInventory => is_non_empty_barrel(&event.current_item),
            _ => false,
        };

        if blocked {
            log::debug!("Blocked {:?} of a barrel into a furnace", event.action);
            EventDecision::Cancel
        } else {
            EventDecision::Allow
        }
    }

    /// Checks a cursor drag across an open inventory window.
    #[must_use]
    pub fn on_inventory_drag(&self, event: &InventoryDragEvent) -> EventDecision {
        if event.inventory.is_furnace()
            && is_non_empty_barrel(&event.old_cursor)
            && event.inventory_slots.contains(&FURNACE_FUEL_SLOT)
        {
            EventDecision::Cancel
        } else {
            EventDecision::Allow
        }
    }

    /// Checks an automatic transfer, such as a hopper feeding a furnace.
    #[must_use]
    pub fn on_inventory_move_item(&self, event: &InventoryMoveItemEvent) -> EventDecision {
        if event.destination.is_furnace() && is_non_empty_barrel(&event.item) {
            EventDecision::Cancel
        } else {
            EventDecision::Allow
        }
    }
}
