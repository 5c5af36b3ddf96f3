//! Slot-based item storage.

use crate::item::ItemStack;

/// Anything holding items in numbered slots: a barrel's live inventory, a
/// snapshot of it, or the inventory embedded in a container item.
pub trait Container: Send + Sync {
    /// Number of slots.
    fn size(&self) -> usize;

    /// The item in `slot`. Empty slots hold [`ItemStack::empty`].
    fn get_item(&self, slot: usize) -> &ItemStack;

    /// Mutable access to the item in `slot`.
    fn get_item_mut(&mut self, slot: usize) -> &mut ItemStack;

    /// Puts `item` into `slot`, replacing what was there.
    fn set_item(&mut self, slot: usize, item: ItemStack);

    /// Returns true if every slot is empty.
    fn is_empty(&self) -> bool {
        (0..self.size()).all(|slot| self.get_item(slot).is_empty())
    }

    /// Takes the whole stack out of `slot`, leaving it empty.
    fn take_item(&mut self, slot: usize) -> ItemStack {
        self.get_item_mut(slot).copy_and_clear()
    }
}
