use std::time::{Duration, Instant};

use barrels_utils::math::Vector3;
use barrels_utils::{BlockPos, WorldId};

use crate::config::PluginConfig;
use crate::event::EntityKind;
use crate::inventory::Container;
use crate::item::ItemStack;

use super::{ConflictExpectation, ConflictRegistry, Reconciliation};

/// Distance beyond the block's faces at which duplicates may still land.
/// Covers the random offset the server applies to dropped items.
pub const DEFAULT_SPAWN_MARGIN: f64 = 0.5;

/// How long an expectation waits for its duplicate before it is dropped.
pub const DEFAULT_EXPECTATION_TTL: Duration = Duration::from_secs(1);

/// Tracks the duplicates produced by cancelled barrel placements and
/// suppresses their spawns.
///
/// All methods must be called from the thread that dispatches world events;
/// the registry is not shared with anything else.
#[derive(Debug)]
pub struct PoiConflictFilter {
    registry: ConflictRegistry,
    spawn_margin: f64,
    ttl: Duration,
}

impl PoiConflictFilter {
    /// Creates a filter with the given spawn margin and expectation lifetime.
    #[must_use]
    pub fn new(spawn_margin: f64, ttl: Duration) -> Self {
        Self {
            registry: ConflictRegistry::new(),
            spawn_margin,
            ttl,
        }
    }

    /// Creates a filter using the configured margin and lifetime.
    #[must_use]
    pub fn from_config(config: &PluginConfig) -> Self {
        Self::new(config.spawn_margin, config.expectation_ttl())
    }

    /// Records the duplicates a cancelled barrel placement will produce.
    ///
    /// `contents` is the inventory the placed barrel carried. One expectation
    /// is registered per occupied slot. Returns how many were registered.
    pub fn on_placement_cancelled(
        &mut self,
        contents: &impl Container,
        pos: BlockPos,
        world: WorldId,
        now: Instant,
    ) -> usize {
        let duplicates: Vec<&ItemStack> = (0..contents.size())
            .map(|slot| contents.get_item(slot))
            .filter(|item| !item.is_empty())
            .collect();

        if duplicates.is_empty() {
            return 0;
        }

        log::debug!(
            "Detected a POI conflict at {pos} with {} duplicated stack(s)",
            duplicates.len()
        );

        let area = pos.bounds().inflate(self.spawn_margin);
        for duplicate in &duplicates {
            self.registry
                .register(ConflictExpectation::new(world, area, duplicate, now));
        }

        log::debug!("Pending POI conflicts: {}", self.registry.len());
        duplicates.len()
    }

    /// Decides whether a spawning entity is an expected duplicate.
    ///
    /// Returns true if the spawn must be cancelled.
    pub fn on_item_spawn(
        &mut self,
        entity: EntityKind,
        location: Vector3<f64>,
        world: WorldId,
        item: &ItemStack,
    ) -> bool {
        if entity != EntityKind::DroppedItem {
            return false;
        }

        match self.registry.reconcile(world, location, item) {
            Some(Reconciliation::Partial { remaining }) => {
                log::debug!("Suppressed duplicate {item}, {remaining} still expected");
                true
            }
            Some(Reconciliation::Consumed) => {
                log::debug!("Suppressed duplicate {item}, conflict resolved");
                true
            }
            None => false,
        }
    }

    /// Drops expectations whose duplicate never showed up in time.
    /// Returns how many were removed.
    pub fn sweep(&mut self, now: Instant) -> usize {
        if self.registry.is_empty() {
            return 0;
        }
        let removed = self.registry.sweep(now, self.ttl);
        if removed > 0 {
            log::debug!("Expired {removed} POI conflict(s)");
        }
        removed
    }

    /// The pending expectations.
    #[must_use]
    pub fn registry(&self) -> &ConflictRegistry {
        &self.registry
    }

    /// Forgets every pending expectation.
    pub fn clear(&mut self) {
        self.registry.clear();
    }
}

impl Default for PoiConflictFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SPAWN_MARGIN, DEFAULT_EXPECTATION_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::SimpleContainer;
    use crate::item::{BARREL_SLOTS, vanilla_items};

    fn contents(items: &[(usize, ItemStack)]) -> SimpleContainer {
        let mut container = SimpleContainer::new(BARREL_SLOTS);
        for (slot, item) in items {
            container.set_item(*slot, item.clone());
        }
        container
    }

    #[test]
    fn test_diamond_scenario() {
        let world = WorldId::random();
        let now = Instant::now();
        let mut filter = PoiConflictFilter::default();

        let registered = filter.on_placement_cancelled(
            &contents(&[(0, ItemStack::new(vanilla_items::DIAMOND, 3))]),
            BlockPos::new(10, 64, 10),
            world,
            now,
        );
        assert_eq!(registered, 1);

        let expectation = filter.registry().iter().next().expect("registered");
        assert_eq!(expectation.world(), world);
        assert_eq!(expectation.area().min, Vector3::new(9.5, 63.5, 9.5));
        assert_eq!(expectation.area().max, Vector3::new(11.5, 65.5, 11.5));
        assert_eq!(expectation.remaining(), 3);

        let spawn = Vector3::new(10.4, 64.1, 10.6);
        assert!(filter.on_item_spawn(
            EntityKind::DroppedItem,
            spawn,
            world,
            &ItemStack::new(vanilla_items::DIAMOND, 3),
        ));
        assert!(filter.registry().is_empty());

        assert!(!filter.on_item_spawn(
            EntityKind::DroppedItem,
            spawn,
            world,
            &ItemStack::new(vanilla_items::DIAMOND, 1),
        ));
    }

    #[test]
    fn test_one_expectation_per_stack() {
        let mut filter = PoiConflictFilter::default();
        let registered = filter.on_placement_cancelled(
            &contents(&[
                (0, ItemStack::new(vanilla_items::DIAMOND, 3)),
                (7, ItemStack::new(vanilla_items::DIAMOND, 64)),
                (26, ItemStack::new(vanilla_items::OAK_LOG, 1)),
            ]),
            BlockPos::new(0, 0, 0),
            WorldId::random(),
            Instant::now(),
        );
        assert_eq!(registered, 3);
        assert_eq!(filter.registry().len(), 3);
    }

    #[test]
    fn test_empty_contents_register_nothing() {
        let mut filter = PoiConflictFilter::default();
        let registered = filter.on_placement_cancelled(
            &contents(&[]),
            BlockPos::new(0, 0, 0),
            WorldId::random(),
            Instant::now(),
        );
        assert_eq!(registered, 0);
        assert!(filter.registry().is_empty());
    }

    #[test]
    fn test_only_dropped_items_are_checked() {
        let world = WorldId::random();
        let mut filter = PoiConflictFilter::default();
        filter.on_placement_cancelled(
            &contents(&[(0, ItemStack::new(vanilla_items::COAL, 1))]),
            BlockPos::new(0, 0, 0),
            world,
            Instant::now(),
        );

        assert!(!filter.on_item_spawn(
            EntityKind::Other,
            Vector3::new(0.5, 0.5, 0.5),
            world,
            &ItemStack::new(vanilla_items::COAL, 1),
        ));
        assert_eq!(filter.registry().len(), 1);
    }

    #[test]
    fn test_split_duplicate() {
        let world = WorldId::random();
        let mut filter = PoiConflictFilter::default();
        filter.on_placement_cancelled(
            &contents(&[(0, ItemStack::new(vanilla_items::STONE, 40))]),
            BlockPos::new(0, 0, 0),
            world,
            Instant::now(),
        );

        let at = Vector3::new(0.2, 0.3, 0.9);
        let stone = |count| ItemStack::new(vanilla_items::STONE, count);
        assert!(filter.on_item_spawn(EntityKind::DroppedItem, at, world, &stone(25)));
        let remaining = filter.registry().iter().next().map(ConflictExpectation::remaining);
        assert_eq!(remaining, Some(15));
        assert!(filter.on_item_spawn(EntityKind::DroppedItem, at, world, &stone(15)));
        assert!(filter.registry().is_empty());
    }

    #[test]
    fn test_sweep_bounds_registry() {
        let world = WorldId::random();
        let start = Instant::now();
        let mut filter = PoiConflictFilter::default();
        for i in 0..100 {
            filter.on_placement_cancelled(
                &contents(&[(0, ItemStack::new(vanilla_items::COAL, 1))]),
                BlockPos::new(i * 4, 64, 0),
                world,
                start,
            );
        }
        assert_eq!(filter.registry().len(), 100);

        assert_eq!(filter.sweep(start + Duration::from_millis(10)), 0);
        assert_eq!(filter.sweep(start + DEFAULT_EXPECTATION_TTL), 100);
        assert!(filter.registry().is_empty());
    }
}
