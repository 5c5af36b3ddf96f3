//! Event values delivered by the server and the decisions handlers return.
//!
//! Handlers never mutate an event. They read it and return an
//! [`EventDecision`]; the dispatcher folds the decisions of every handler in
//! priority order and applies the result.

use std::cmp::Ordering;

use barrels_utils::math::Vector3;
use barrels_utils::{BlockPos, Identifier, WorldId};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::inventory::{InventoryAction, InventoryKind, SlotType};
use crate::item::{ContainerState, ItemStack};

/// Order in which handlers of the same event run.
///
/// Lower priorities run first; `Monitor` runs last and only observes the
/// outcome the earlier handlers settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i8)]
pub enum EventPriority {
    /// Runs first.
    Lowest = -2,
    /// Runs early.
    Low = -1,
    /// The default.
    #[default]
    Normal = 0,
    /// Runs late.
    High = 1,
    /// Runs last among handlers that may change the outcome.
    Highest = 2,
    /// Observes the final outcome.
    Monitor = 3,
}

impl EventPriority {
    /// Returns the numeric value of this priority.
    /// Lower values run earlier.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i8 {
        self as i8
    }
}

impl PartialOrd for EventPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

/// The events this plugin listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A player broke a block.
    BlockBreak,
    /// A player placed a block.
    BlockPlace,
    /// An entity carrying an item is about to spawn.
    ItemSpawn,
    /// A player clicked a slot in an open inventory.
    InventoryClick,
    /// A player dragged the cursor across inventory slots.
    InventoryDrag,
    /// A hopper or similar moved an item between inventories.
    InventoryMoveItem,
}

/// What a handler wants done with an event.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EventDecision {
    /// Let the event proceed unchanged.
    #[default]
    Allow,
    /// Stop the event from taking effect.
    Cancel,
    /// Let a block break proceed, but empty the block's live inventory,
    /// disable the default drops, and drop these items naturally instead.
    ReplaceDrops(SmallVec<[ItemStack; 4]>),
}

impl EventDecision {
    /// Returns true if this decision stops the event.
    #[must_use]
    pub fn is_cancel(&self) -> bool {
        matches!(self, Self::Cancel)
    }
}

/// A player's game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    /// Survival.
    #[default]
    Survival,
    /// Creative: broken blocks drop nothing by default.
    Creative,
    /// Adventure.
    Adventure,
    /// Spectator.
    Spectator,
}

/// The kind of entity an item spawn event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A loose item lying in the world.
    DroppedItem,
    /// Any other entity that carries an item, such as an item frame.
    Other,
}

/// Something that can be cancelled by the dispatcher.
pub trait Cancellable {
    /// Returns true if an earlier handler cancelled the event.
    fn is_cancelled(&self) -> bool;

    /// Sets the cancellation state.
    fn set_cancelled(&mut self, cancelled: bool);
}

macro_rules! cancellable {
    ($($event:ty),* $(,)?) => {
        $(
            impl Cancellable for $event {
                fn is_cancelled(&self) -> bool {
                    self.cancelled
                }

                fn set_cancelled(&mut self, cancelled: bool) {
                    self.cancelled = cancelled;
                }
            }
        )*
    };
}

/// A player broke a block.
#[derive(Debug, Clone)]
pub struct BlockBreakEvent {
    /// The type of the broken block.
    pub block: Identifier,
    /// A snapshot of the block's inventory, for container blocks.
    pub state: Option<ContainerState>,
    /// The block's position.
    pub pos: BlockPos,
    /// The world the block is in, if it is still loaded.
    pub world: Option<WorldId>,
    /// The game mode of the breaking player.
    pub game_mode: GameMode,
    /// Whether the break is currently set to drop items.
    pub drop_items: bool,
    /// Whether an earlier handler cancelled the break.
    pub cancelled: bool,
}

/// A player placed a block.
#[derive(Debug, Clone)]
pub struct BlockPlaceEvent {
    /// The type of the placed block.
    pub block: Identifier,
    /// A snapshot of the placed block's inventory, taken from the placed item.
    pub state: Option<ContainerState>,
    /// The block's position.
    pub pos: BlockPos,
    /// The world the block is in, if it is still loaded.
    pub world: Option<WorldId>,
    /// Whether an earlier handler cancelled the placement.
    pub cancelled: bool,
}

/// An entity carrying an item is about to spawn.
#[derive(Debug, Clone)]
pub struct ItemSpawnEvent {
    /// The kind of entity spawning.
    pub entity: EntityKind,
    /// Where it spawns.
    pub location: Vector3<f64>,
    /// The world it spawns in, if known.
    pub world: Option<WorldId>,
    /// The item the entity carries.
    pub item: ItemStack,
    /// Whether an earlier handler cancelled the spawn.
    pub cancelled: bool,
}

/// A player clicked a slot in an open inventory.
#[derive(Debug, Clone)]
pub struct InventoryClickEvent {
    /// The top inventory of the open window.
    pub inventory: InventoryKind,
    /// What the click does.
    pub action: InventoryAction,
    /// The role of the clicked slot.
    pub slot_type: SlotType,
    /// The stack on the cursor.
    pub cursor: ItemStack,
    /// The stack in the clicked slot.
    pub current_item: ItemStack,
    /// For [`InventoryAction::HotbarSwap`], the stack in the hotbar slot
    /// selected by the pressed number key.
    pub hotbar_item: Option<ItemStack>,
    /// Whether an earlier handler cancelled the click.
    pub cancelled: bool,
}

/// A player dragged the cursor across inventory slots.
#[derive(Debug, Clone)]
pub struct InventoryDragEvent {
    /// The top inventory of the open window.
    pub inventory: InventoryKind,
    /// The stack that was on the cursor when the drag started.
    pub old_cursor: ItemStack,
    /// The raw slot indices of the window the drag covered.
    pub inventory_slots: FxHashSet<usize>,
    /// Whether an earlier handler cancelled the drag.
    pub cancelled: bool,
}

/// An item is being moved from one inventory to another without a player.
#[derive(Debug, Clone)]
pub struct InventoryMoveItemEvent {
    /// The inventory the item leaves.
    pub source: InventoryKind,
    /// The inventory the item enters.
    pub destination: InventoryKind,
    /// The moving stack.
    pub item: ItemStack,
    /// Whether an earlier handler cancelled the move.
    pub cancelled: bool,
}

cancellable!(
    BlockBreakEvent,
    BlockPlaceEvent,
    ItemSpawnEvent,
    InventoryClickEvent,
    InventoryDragEvent,
    InventoryMoveItemEvent,
);
