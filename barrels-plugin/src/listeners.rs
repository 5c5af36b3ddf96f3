//! Event handlers connecting the server's events to the barrel behaviours.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use barrels_core::event::{
    BlockBreakEvent, BlockPlaceEvent, InventoryClickEvent, InventoryDragEvent,
    InventoryMoveItemEvent, ItemSpawnEvent,
};
use barrels_core::item::vanilla_items;
use barrels_core::{
    BarrelError, BarrelSerializer, BreakOutcome, EventDecision, EventKind, EventPriority,
    FuelSlotGuard, PoiConflictFilter,
};
use parking_lot::Mutex;

/// Source of the current time.
pub type Clock = Arc<dyn Fn() -> Instant + Send + Sync>;

/// How a handler is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    /// The event handled.
    pub kind: EventKind,
    /// When the handler runs relative to others.
    pub priority: EventPriority,
    /// Whether the handler is skipped for cancelled events.
    pub ignore_cancelled: bool,
}

/// Every handler the plugin registers.
pub const LISTENERS: [Subscription; 6] = [
    Subscription {
        kind: EventKind::BlockBreak,
        priority: EventPriority::Monitor,
        ignore_cancelled: true,
    },
    Subscription {
        kind: EventKind::BlockPlace,
        priority: EventPriority::Monitor,
        ignore_cancelled: false,
    },
    Subscription {
        kind: EventKind::ItemSpawn,
        priority: EventPriority::Normal,
        ignore_cancelled: false,
    },
    Subscription {
        kind: EventKind::InventoryClick,
        priority: EventPriority::Normal,
        ignore_cancelled: false,
    },
    Subscription {
        kind: EventKind::InventoryDrag,
        priority: EventPriority::Normal,
        ignore_cancelled: false,
    },
    Subscription {
        kind: EventKind::InventoryMoveItem,
        priority: EventPriority::Normal,
        ignore_cancelled: false,
    },
];

/// Looks up how the handler for `kind` is registered.
#[must_use]
pub fn listener(kind: EventKind) -> Subscription {
    LISTENERS
        .iter()
        .copied()
        .find(|subscription| subscription.kind == kind)
        .unwrap_or(Subscription {
            kind,
            priority: EventPriority::Normal,
            ignore_cancelled: false,
        })
}

/// The state shared by all handlers. Cloning shares the conflict filter.
#[derive(Clone)]
pub struct Listeners {
    filter: Arc<Mutex<PoiConflictFilter>>,
    serializer: BarrelSerializer,
    guard: FuelSlotGuard,
    clock: Clock,
}

impl Listeners {
    /// Creates handlers around a shared conflict filter.
    #[must_use]
    pub fn new(
        filter: Arc<Mutex<PoiConflictFilter>>,
        serializer: BarrelSerializer,
        clock: Clock,
    ) -> Self {
        Self {
            filter,
            serializer,
            guard: FuelSlotGuard,
            clock,
        }
    }

    /// The shared conflict filter.
    #[must_use]
    pub fn filter(&self) -> &Arc<Mutex<PoiConflictFilter>> {
        &self.filter
    }

    /// The current time according to the configured clock.
    #[must_use]
    pub fn now(&self) -> Instant {
        (self.clock)()
    }

    /// Replaces a broken barrel's drops with the barrel carrying its contents.
    pub fn on_block_break(&self, event: &BlockBreakEvent) -> EventDecision {
        if event.cancelled || !event.drop_items || event.block != vanilla_items::BARREL {
            return EventDecision::Allow;
        }
        let Some(state) = &event.state else {
            log::warn!("Barrel broken at {} has no inventory snapshot", event.pos);
            return EventDecision::Allow;
        };
        if event.world.is_none() {
            log::warn!("Ignoring barrel break: {}", BarrelError::MissingWorld { pos: event.pos });
            return EventDecision::Allow;
        }

        match self.serializer.serialize(state.clone(), event.game_mode) {
            BreakOutcome::NoDrops => EventDecision::Allow,
            BreakOutcome::Drops(drops) => EventDecision::ReplaceDrops(drops.into_items()),
        }
    }

    /// Remembers the duplicates a cancelled loaded barrel placement produces.
    pub fn on_block_place(&self, event: &BlockPlaceEvent) -> EventDecision {
        if !event.cancelled || event.block != vanilla_items::BARREL {
            return EventDecision::Allow;
        }
        let Some(state) = &event.state else {
            return EventDecision::Allow;
        };
        let Some(world) = event.world else {
            log::warn!(
                "Ignoring cancelled barrel placement: {}",
                BarrelError::MissingWorld { pos: event.pos }
            );
            return EventDecision::Allow;
        };

        let now = self.now();
        self.filter
            .lock()
            .on_placement_cancelled(&state.items, event.pos, world, now);
        EventDecision::Allow
    }

    /// Cancels the spawn of an expected duplicate.
    pub fn on_item_spawn(&self, event: &ItemSpawnEvent) -> EventDecision {
        let Some(world) = event.world else {
            return EventDecision::Allow;
        };
        let suppressed =
            self.filter
                .lock()
                .on_item_spawn(event.entity, event.location, world, &event.item);
        if suppressed {
            EventDecision::Cancel
        } else {
            EventDecision::Allow
        }
    }

    /// Keeps barrels out of furnace fuel slots on click.
    pub fn on_inventory_click(&self, event: &InventoryClickEvent) -> EventDecision {
        self.guard.on_inventory_click(event)
    }

    /// Keeps barrels out of furnace fuel slots on drag.
    pub fn on_inventory_drag(&self, event: &InventoryDragEvent) -> EventDecision {
        self.guard.on_inventory_drag(event)
    }

    /// Keeps hoppers from moving barrels into furnaces.
    pub fn on_inventory_move_item(&self, event: &InventoryMoveItemEvent) -> EventDecision {
        self.guard.on_inventory_move_item(event)
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("filter", &self.filter)
            .field("serializer", &self.serializer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_table() {
        let breaking = listener(EventKind::BlockBreak);
        assert_eq!(breaking.priority, EventPriority::Monitor);
        assert!(breaking.ignore_cancelled);

        let placing = listener(EventKind::BlockPlace);
        assert_eq!(placing.priority, EventPriority::Monitor);
        assert!(!placing.ignore_cancelled);

        for kind in [
            EventKind::ItemSpawn,
            EventKind::InventoryClick,
            EventKind::InventoryDrag,
            EventKind::InventoryMoveItem,
        ] {
            assert_eq!(listener(kind).priority, EventPriority::Normal);
            assert!(!listener(kind).ignore_cancelled);
        }
    }
}
