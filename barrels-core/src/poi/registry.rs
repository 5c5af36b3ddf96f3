use std::time::{Duration, Instant};

use barrels_utils::WorldId;
use barrels_utils::math::Vector3;

use crate::item::ItemStack;

use super::ConflictExpectation;

/// How a matched spawn was accounted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The spawn covered part of the expected copy; this many items are still expected.
    Partial {
        /// Items still expected.
        remaining: i32,
    },
    /// The expected copy has fully spawned and the expectation was removed.
    Consumed,
}

/// The set of pending duplicate spawns.
///
/// Matching is order independent: a spawn is charged to whichever matching
/// expectation is found first, and at most one expectation per spawn.
#[derive(Debug, Default)]
pub struct ConflictRegistry {
    expectations: Vec<ConflictExpectation>,
}

impl ConflictRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an expectation.
    pub fn register(&mut self, expectation: ConflictExpectation) {
        self.expectations.push(expectation);
    }

    /// Charges a spawn of `item` against the first matching expectation.
    ///
    /// Returns `None` when nothing matches, meaning the spawn is legitimate.
    pub fn reconcile(
        &mut self,
        world: WorldId,
        location: Vector3<f64>,
        item: &ItemStack,
    ) -> Option<Reconciliation> {
        let index = self
            .expectations
            .iter()
            .position(|e| e.matches(world, location, item))?;

        if self.expectations[index].consume(item.count()) {
            self.expectations.swap_remove(index);
            Some(Reconciliation::Consumed)
        } else {
            Some(Reconciliation::Partial {
                remaining: self.expectations[index].remaining(),
            })
        }
    }

    /// Removes every expectation at least `ttl` old, matched or not.
    /// Returns how many were removed.
    pub fn sweep(&mut self, now: Instant, ttl: Duration) -> usize {
        let before = self.expectations.len();
        self.expectations.retain(|e| !e.is_expired(now, ttl));
        before - self.expectations.len()
    }

    /// Returns the number of pending expectations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }

    /// Iterates over the pending expectations.
    pub fn iter(&self) -> impl Iterator<Item = &ConflictExpectation> {
        self.expectations.iter()
    }

    /// Drops every pending expectation.
    pub fn clear(&mut self) {
        self.expectations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::vanilla_items;
    use barrels_utils::BlockPos;

    fn registry_with(world: WorldId, item: &ItemStack, now: Instant) -> ConflictRegistry {
        let mut registry = ConflictRegistry::new();
        registry.register(ConflictExpectation::new(
            world,
            BlockPos::new(0, 64, 0).bounds().inflate(0.5),
            item,
            now,
        ));
        registry
    }

    #[test]
    fn test_partial_then_consumed() {
        let world = WorldId::random();
        let now = Instant::now();
        let spot = Vector3::new(0.5, 64.2, 0.5);
        let mut registry = registry_with(world, &ItemStack::new(vanilla_items::DIAMOND, 5), now);

        let first = registry.reconcile(world, spot, &ItemStack::new(vanilla_items::DIAMOND, 2));
        assert_eq!(first, Some(Reconciliation::Partial { remaining: 3 }));
        assert_eq!(registry.len(), 1);

        let second = registry.reconcile(world, spot, &ItemStack::new(vanilla_items::DIAMOND, 3));
        assert_eq!(second, Some(Reconciliation::Consumed));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_oversized_spawn_consumes() {
        let world = WorldId::random();
        let mut registry =
            registry_with(world, &ItemStack::new(vanilla_items::COAL, 2), Instant::now());
        let result = registry.reconcile(
            world,
            Vector3::new(0.0, 64.0, 0.0),
            &ItemStack::new(vanilla_items::COAL, 10),
        );
        assert_eq!(result, Some(Reconciliation::Consumed));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_one_expectation_per_spawn() {
        let world = WorldId::random();
        let now = Instant::now();
        let coal = ItemStack::new(vanilla_items::COAL, 4);
        let mut registry = registry_with(world, &coal, now);
        registry.register(ConflictExpectation::new(
            world,
            BlockPos::new(0, 64, 0).bounds().inflate(0.5),
            &coal,
            now,
        ));

        let result = registry.reconcile(world, Vector3::new(0.5, 64.5, 0.5), &coal);
        assert_eq!(result, Some(Reconciliation::Consumed));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_no_match() {
        let world = WorldId::random();
        let now = Instant::now();
        let diamond = ItemStack::new(vanilla_items::DIAMOND, 1);
        let mut registry = registry_with(world, &diamond, now);

        let outside = Vector3::new(2.0, 64.0, 0.0);
        assert_eq!(registry.reconcile(world, outside, &diamond), None);

        let inside = Vector3::new(0.5, 64.5, 0.5);
        assert_eq!(registry.reconcile(WorldId::random(), inside, &diamond), None);
        assert_eq!(
            registry.reconcile(world, inside, &ItemStack::new(vanilla_items::STONE, 1)),
            None
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_sweep_removes_only_stale() {
        let world = WorldId::random();
        let start = Instant::now();
        let ttl = Duration::from_secs(1);
        let mut registry = registry_with(world, &ItemStack::new(vanilla_items::COAL, 1), start);
        registry.register(ConflictExpectation::new(
            world,
            BlockPos::new(5, 64, 5).bounds(),
            &ItemStack::new(vanilla_items::COAL, 1),
            start + Duration::from_millis(600),
        ));

        assert_eq!(registry.sweep(start + Duration::from_millis(500), ttl), 0);
        assert_eq!(registry.sweep(start + Duration::from_millis(1200), ttl), 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.sweep(start + Duration::from_millis(1600), ttl), 1);
        assert!(registry.is_empty());
    }
}
