//! In-process delivery of events to registered handlers.
//!
//! Handlers run in priority order. A handler registered with
//! `ignore_cancelled` is skipped once an earlier handler, or the server
//! itself, cancelled the event.

use barrels_core::event::{
    BlockBreakEvent, BlockPlaceEvent, Cancellable, InventoryClickEvent, InventoryDragEvent,
    InventoryMoveItemEvent, ItemSpawnEvent,
};
use barrels_core::{EventDecision, EventPriority};

use crate::host::PluginHost;

/// A boxed event handler.
pub type Handler<E> = Box<dyn Fn(&E) -> EventDecision + Send + Sync>;

struct Registration<E> {
    priority: EventPriority,
    ignore_cancelled: bool,
    handler: Handler<E>,
}

/// The handlers registered for one event type.
pub struct HandlerList<E> {
    registrations: Vec<Registration<E>>,
}

impl<E: Cancellable> HandlerList<E> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Adds a handler. Handlers of equal priority run in registration order.
    pub fn register(
        &mut self,
        priority: EventPriority,
        ignore_cancelled: bool,
        handler: Handler<E>,
    ) {
        let index = self
            .registrations
            .partition_point(|registration| registration.priority <= priority);
        self.registrations.insert(
            index,
            Registration {
                priority,
                ignore_cancelled,
                handler,
            },
        );
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Returns true if no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Removes every handler.
    pub fn clear(&mut self) {
        self.registrations.clear();
    }

    /// Runs every applicable handler and folds their decisions.
    ///
    /// A `ReplaceDrops` replaces an earlier `Allow` or `ReplaceDrops`. A
    /// `Cancel` marks the event cancelled, and a cancelled event always
    /// results in `Cancel` whatever was decided before or after.
    pub fn fire(&self, event: &mut E) -> EventDecision {
        let mut decision = EventDecision::Allow;

        for registration in &self.registrations {
            if registration.ignore_cancelled && event.is_cancelled() {
                continue;
            }
            match (registration.handler)(event) {
                EventDecision::Allow => {}
                EventDecision::Cancel => event.set_cancelled(true),
                replace @ EventDecision::ReplaceDrops(_) => decision = replace,
            }
        }

        if event.is_cancelled() {
            EventDecision::Cancel
        } else {
            decision
        }
    }
}

impl<E: Cancellable> Default for HandlerList<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler lists for every event the plugin listens to.
#[derive(Default)]
pub struct EventBus {
    /// Block break handlers.
    pub block_break: HandlerList<BlockBreakEvent>,
    /// Block place handlers.
    pub block_place: HandlerList<BlockPlaceEvent>,
    /// Item spawn handlers.
    pub item_spawn: HandlerList<ItemSpawnEvent>,
    /// Inventory click handlers.
    pub inventory_click: HandlerList<InventoryClickEvent>,
    /// Inventory drag handlers.
    pub inventory_drag: HandlerList<InventoryDragEvent>,
    /// Inventory move handlers.
    pub inventory_move_item: HandlerList<InventoryMoveItemEvent>,
}

impl EventBus {
    /// Creates a bus without handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires a block break and applies replaced drops through `host`.
    ///
    /// When drops are replaced the live block inventory is emptied, the
    /// event's default drops are disabled and each replacement is dropped at
    /// the block.
    pub fn fire_block_break(
        &self,
        event: &mut BlockBreakEvent,
        host: &mut dyn PluginHost,
    ) -> EventDecision {
        let decision = self.block_break.fire(event);
        if event.is_cancelled() {
            return decision;
        }
        if let EventDecision::ReplaceDrops(items) = &decision {
            if let Some(world) = event.world {
                host.clear_block_inventory(world, event.pos);
                event.drop_items = false;
                for item in items {
                    host.drop_item_naturally(world, event.pos, item.clone());
                }
            } else {
                log::warn!("Dropping replaced drops at {} requires a world", event.pos);
            }
        }
        decision
    }

    /// Fires a block place.
    pub fn fire_block_place(&self, event: &mut BlockPlaceEvent) -> EventDecision {
        self.block_place.fire(event)
    }

    /// Fires an item spawn.
    pub fn fire_item_spawn(&self, event: &mut ItemSpawnEvent) -> EventDecision {
        self.item_spawn.fire(event)
    }

    /// Fires an inventory click.
    pub fn fire_inventory_click(&self, event: &mut InventoryClickEvent) -> EventDecision {
        self.inventory_click.fire(event)
    }

    /// Fires an inventory drag.
    pub fn fire_inventory_drag(&self, event: &mut InventoryDragEvent) -> EventDecision {
        self.inventory_drag.fire(event)
    }

    /// Fires an inventory move.
    pub fn fire_inventory_move_item(&self, event: &mut InventoryMoveItemEvent) -> EventDecision {
        self.inventory_move_item.fire(event)
    }

    /// Removes every handler of every event.
    pub fn clear(&mut self) {
        self.block_break.clear();
        self.block_place.clear();
        self.item_spawn.clear();
        self.inventory_click.clear();
        self.inventory_drag.clear();
        self.inventory_move_item.clear();
    }
}
