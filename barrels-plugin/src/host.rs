//! What the plugin needs from the server it runs in.

use std::fmt;
use std::path::Path;

use barrels_core::ItemStack;
use barrels_utils::{BlockPos, WorldId};

/// Handle to a task scheduled on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A task the host runs on its event dispatch thread.
pub type Task = Box<dyn FnMut() + Send>;

/// Services the hosting server offers the plugin.
///
/// Every call happens on the host's event dispatch thread.
pub trait PluginHost {
    /// Directory holding the plugin's config.
    fn data_folder(&self) -> &Path;

    /// Drops `item` at `pos` the way broken blocks drop their items.
    fn drop_item_naturally(&mut self, world: WorldId, pos: BlockPos, item: ItemStack);

    /// Empties the inventory of the live block at `pos`.
    fn clear_block_inventory(&mut self, world: WorldId, pos: BlockPos);

    /// Runs `task` every `interval_ticks` server ticks until cancelled.
    fn schedule_repeating(&mut self, interval_ticks: u32, task: Task) -> TaskId;

    /// Stops a task started with [`PluginHost::schedule_repeating`].
    fn cancel_task(&mut self, task: TaskId);
}
