use std::fmt::{self, Display};
use std::time::{Duration, Instant};

use barrels_utils::WorldId;
use barrels_utils::math::{BoundingBox, Vector3};

use crate::item::ItemStack;

/// A duplicate item expected to spawn inside `area` of `world` soon.
#[derive(Debug, Clone)]
pub struct ConflictExpectation {
    world: WorldId,
    area: BoundingBox,
    duplicate: ItemStack,
    created_at: Instant,
}

impl ConflictExpectation {
    /// Creates an expectation for a copy of `duplicate`.
    ///
    /// The stack is copied so later changes to the caller's item cannot
    /// affect what is matched.
    #[must_use]
    pub fn new(
        world: WorldId,
        area: BoundingBox,
        duplicate: &ItemStack,
        created_at: Instant,
    ) -> Self {
        Self {
            world,
            area,
            duplicate: duplicate.clone(),
            created_at,
        }
    }

    /// The world the duplicate will spawn in.
    #[must_use]
    pub fn world(&self) -> WorldId {
        self.world
    }

    /// The region the duplicate will spawn in.
    #[must_use]
    pub fn area(&self) -> &BoundingBox {
        &self.area
    }

    /// The item still expected, with the count not yet seen.
    #[must_use]
    pub fn duplicate(&self) -> &ItemStack {
        &self.duplicate
    }

    /// The number of items still expected.
    #[must_use]
    pub fn remaining(&self) -> i32 {
        self.duplicate.count()
    }

    /// Returns true if a spawn of `item` at `location` in `world` is this duplicate.
    ///
    /// Counts are ignored: the copy may arrive split over several stacks.
    #[must_use]
    pub fn matches(&self, world: WorldId, location: Vector3<f64>, item: &ItemStack) -> bool {
        self.world == world
            && self.area.contains(location)
            && self.duplicate.is_same_item_same_components(item)
    }

    /// Accounts for `amount` items having spawned.
    /// Returns true once nothing more is expected.
    pub(super) fn consume(&mut self, amount: i32) -> bool {
        self.duplicate.shrink(amount);
        self.duplicate.count() <= 0
    }

    /// Returns true once the expectation is at least `ttl` old.
    #[must_use]
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) >= ttl
    }
}

impl Display for ConflictExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoiConflict({} # {} @ {})", self.duplicate, self.world, self.area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::vanilla_items;
    use barrels_utils::BlockPos;

    #[test]
    fn test_registered_copy_is_detached() {
        let world = WorldId::random();
        let mut original = ItemStack::new(vanilla_items::DIAMOND, 3);
        let expectation = ConflictExpectation::new(
            world,
            BlockPos::new(0, 0, 0).bounds(),
            &original,
            Instant::now(),
        );

        original.set_count(1);
        original.meta_mut().display_name = Some("Changed".to_string());
        assert_eq!(expectation.remaining(), 3);
        assert_eq!(expectation.duplicate().display_name(), None);
    }

    #[test]
    fn test_expiry() {
        let start = Instant::now();
        let expectation = ConflictExpectation::new(
            WorldId::random(),
            BlockPos::new(0, 0, 0).bounds(),
            &ItemStack::new(vanilla_items::COAL, 1),
            start,
        );
        let ttl = Duration::from_secs(1);
        assert!(!expectation.is_expired(start + Duration::from_millis(999), ttl));
        assert!(expectation.is_expired(start + ttl, ttl));
    }
}
