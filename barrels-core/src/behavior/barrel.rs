//! Keeps a barrel's contents inside the item it drops when broken.
//!
//! The contents are embedded in the dropped barrel's block state and summed up
//! in its lore. Loaded containers found inside the barrel are taken out and
//! dropped on their own, so their contents never end up two levels deep.

use barrels_utils::text::chat_format;
use smallvec::SmallVec;

use crate::event::GameMode;
use crate::inventory::Container;
use crate::item::{ContainerState, ItemStack, vanilla_items};

/// Number of contents listed in a dropped barrel's lore by default.
pub const DEFAULT_PREVIEW_LIMIT: usize = 5;

/// Items produced by breaking a barrel.
#[derive(Debug, Clone, PartialEq)]
pub struct BarrelDrops {
    /// The barrel item, carrying whatever contents stayed embedded.
    pub replacement: ItemStack,
    /// Loaded containers that were taken out of the barrel, in slot order.
    pub extra_drops: Vec<ItemStack>,
}

impl BarrelDrops {
    /// All items to drop: the separated containers first, then the barrel.
    #[must_use]
    pub fn into_items(self) -> SmallVec<[ItemStack; 4]> {
        let mut items: SmallVec<[ItemStack; 4]> = self.extra_drops.into_iter().collect();
        items.push(self.replacement);
        items
    }
}

/// The result of breaking a barrel.
#[derive(Debug, Clone, PartialEq)]
pub enum BreakOutcome {
    /// Nothing may drop. The server's own behavior already produces no drops
    /// here and must be left alone.
    NoDrops,
    /// These items replace the server's default drops.
    Drops(BarrelDrops),
}

impl BreakOutcome {
    /// Returns true if anything should drop.
    #[must_use]
    pub fn should_drop(&self) -> bool {
        matches!(self, Self::Drops(_))
    }
}

/// Turns a broken barrel's inventory snapshot into its drops.
#[derive(Debug, Clone)]
pub struct BarrelSerializer {
    preview_limit: usize,
    barrel_item: ItemStack,
}

impl BarrelSerializer {
    /// Creates a serializer listing up to `preview_limit` contents in the lore.
    #[must_use]
    pub fn new(preview_limit: usize) -> Self {
        Self {
            preview_limit,
            barrel_item: ItemStack::new(vanilla_items::BARREL, 1),
        }
    }

    /// Uses `item` as the template for dropped barrels.
    #[must_use]
    pub fn with_barrel_item(mut self, item: ItemStack) -> Self {
        self.barrel_item = item;
        self
    }

    /// Computes the drops for a barrel broken by a player in `game_mode`.
    ///
    /// The caller must empty the live block inventory and disable the default
    /// drops before dropping the returned items, otherwise the contents drop
    /// twice.
    #[must_use]
    pub fn serialize(&self, snapshot: ContainerState, game_mode: GameMode) -> BreakOutcome {
        let ContainerState {
            custom_name,
            items: mut contents,
        } = snapshot;

        let mut extra_drops = Vec::new();
        let mut preview = Vec::new();
        let mut contents_count = 0;

        for slot in 0..contents.size() {
            let item = contents.get_item(slot);
            if item.is_empty() {
                continue;
            }

            if item.is_loaded_container() {
                extra_drops.push(contents.take_item(slot));
                continue;
            }

            if preview.len() < self.preview_limit {
                preview.push(chat_format(
                    "&r&f{} x{}",
                    &[&item.visible_name(), &item.count()],
                ));
            }
            contents_count += 1;
        }

        if contents_count > self.preview_limit {
            let remaining = contents_count - self.preview_limit;
            preview.push(chat_format("&f&oand {} more...", &[&remaining]));
        }

        if contents_count == 0 && extra_drops.is_empty() && game_mode == GameMode::Creative {
            return BreakOutcome::NoDrops;
        }

        let mut replacement = self.barrel_item.clone();
        if let Some(name) = custom_name {
            replacement.meta_mut().display_name = Some(name);
        }

        if contents_count > 0 {
            match replacement.barrel_state_mut() {
                Ok(state) => {
                    state.items = contents;

                    let lore = &mut replacement.meta_mut().lore;
                    preview.append(lore);
                    *lore = preview;
                }
                Err(err) => {
                    // Keep the contents as loose drops so nothing is lost.
                    log::warn!("Dropping barrel contents loose: {err}");
                    for slot in 0..contents.size() {
                        if !contents.get_item(slot).is_empty() {
                            extra_drops.push(contents.take_item(slot));
                        }
                    }
                }
            }
        }

        BreakOutcome::Drops(BarrelDrops {
            replacement,
            extra_drops,
        })
    }
}

impl Default for BarrelSerializer {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::nbt::{item_from_nbt, item_to_nbt};
    use crate::item::{BARREL_SLOTS, ItemMeta};
    use barrels_utils::Identifier;
    use barrels_utils::text::strip_color;

    fn barrel_with(items: &[(usize, ItemStack)]) -> ContainerState {
        let mut state = ContainerState::new(BARREL_SLOTS);
        for (slot, item) in items {
            state.items.set_item(*slot, item.clone());
        }
        state
    }

    fn drops(outcome: BreakOutcome) -> BarrelDrops {
        match outcome {
            BreakOutcome::Drops(drops) => drops,
            BreakOutcome::NoDrops => panic!("expected drops"),
        }
    }

    fn plain_lore(item: &ItemStack) -> Vec<String> {
        item.meta().lore.iter().map(|line| strip_color(line)).collect()
    }

    fn loaded_shulker() -> ItemStack {
        let mut shulker = ItemStack::new(Identifier::vanilla_static("shulker_box"), 1);
        if let Some(state) = shulker.meta_mut().block_state.container_mut() {
            state.items.set_item(0, ItemStack::new(vanilla_items::DIAMOND, 1));
        }
        shulker
    }

    #[test]
    fn test_preview_lists_every_item_up_to_limit() {
        let snapshot = barrel_with(&[
            (0, ItemStack::new(vanilla_items::DIAMOND, 3)),
            (4, ItemStack::new(vanilla_items::OAK_LOG, 16)),
        ]);
        let drops = drops(BarrelSerializer::default().serialize(snapshot, GameMode::Survival));

        assert_eq!(
            plain_lore(&drops.replacement),
            vec!["Diamond x3".to_string(), "Oak Log x16".to_string()]
        );
        assert!(drops.extra_drops.is_empty());
    }

    #[test]
    fn test_preview_summarises_overflow() {
        let items: Vec<(usize, ItemStack)> = (0..8)
            .map(|slot| (slot, ItemStack::new(vanilla_items::STONE, slot as i32 + 1)))
            .collect();
        let snapshot = barrel_with(&items);
        let drops = drops(BarrelSerializer::default().serialize(snapshot, GameMode::Survival));

        let lore = plain_lore(&drops.replacement);
        assert_eq!(lore.len(), 6);
        assert_eq!(lore[0], "Stone x1");
        assert_eq!(lore[4], "Stone x5");
        assert_eq!(lore[5], "and 3 more...");
    }

    #[test]
    fn test_exactly_limit_has_no_summary() {
        let items: Vec<(usize, ItemStack)> = (0..5)
            .map(|slot| (slot * 2, ItemStack::new(vanilla_items::COAL, 1)))
            .collect();
        let snapshot = barrel_with(&items);
        let drops = drops(BarrelSerializer::default().serialize(snapshot, GameMode::Survival));
        assert_eq!(drops.replacement.meta().lore.len(), 5);
    }

    #[test]
    fn test_display_name_preferred_in_preview() {
        let mut named = ItemStack::new(vanilla_items::DIAMOND, 2);
        named.meta_mut().display_name = Some("Gems".to_string());
        let drops = drops(
            BarrelSerializer::default().serialize(barrel_with(&[(0, named)]), GameMode::Survival),
        );
        assert_eq!(plain_lore(&drops.replacement), vec!["Gems x2".to_string()]);
    }

    #[test]
    fn test_contents_round_trip_minus_extracted() {
        let diamonds = ItemStack::new(vanilla_items::DIAMOND, 3);
        let empty_chest = ItemStack::new(vanilla_items::CHEST, 1);
        let snapshot = barrel_with(&[
            (0, diamonds.clone()),
            (1, loaded_shulker()),
            (2, empty_chest.clone()),
        ]);

        let mut drops = drops(BarrelSerializer::default().serialize(snapshot, GameMode::Survival));
        assert_eq!(drops.extra_drops, vec![loaded_shulker()]);

        let expected = barrel_with(&[(0, diamonds), (2, empty_chest)]);
        let state = drops.replacement.barrel_state_mut().expect("barrel state");
        assert_eq!(state.items, expected.items);
    }

    #[test]
    fn test_dropped_barrel_survives_save_and_load() {
        let snapshot = barrel_with(&[
            (0, ItemStack::new(vanilla_items::DIAMOND, 3)),
            (5, loaded_shulker()),
            (9, ItemStack::new(vanilla_items::OAK_LOG, 16)),
        ]);
        let drops = drops(BarrelSerializer::default().serialize(snapshot, GameMode::Survival));

        for item in drops.into_items() {
            let restored = item_from_nbt(&item_to_nbt(&item)).expect("decodes");
            assert_eq!(restored, item);
        }
    }

    #[test]
    fn test_empty_nested_container_stays_embedded() {
        let snapshot = barrel_with(&[(3, ItemStack::new(vanilla_items::CHEST, 1))]);
        let drops = drops(BarrelSerializer::default().serialize(snapshot, GameMode::Survival));
        assert!(drops.extra_drops.is_empty());
        assert_eq!(plain_lore(&drops.replacement), vec!["Chest x1".to_string()]);
    }

    #[test]
    fn test_creative_empty_barrel_drops_nothing() {
        let outcome = BarrelSerializer::default()
            .serialize(ContainerState::new(BARREL_SLOTS), GameMode::Creative);
        assert_eq!(outcome, BreakOutcome::NoDrops);
        assert!(!outcome.should_drop());
    }

    #[test]
    fn test_survival_empty_barrel_drops_plain_barrel() {
        let outcome = BarrelSerializer::default()
            .serialize(ContainerState::new(BARREL_SLOTS), GameMode::Survival);
        let items = drops(outcome).into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0], ItemStack::new(vanilla_items::BARREL, 1));
    }

    #[test]
    fn test_creative_with_only_nested_container_still_drops() {
        let snapshot = barrel_with(&[(0, loaded_shulker())]);
        let items = drops(BarrelSerializer::default().serialize(snapshot, GameMode::Creative))
            .into_items();
        assert_eq!(items.len(), 2);
        assert!(items[1].is(&vanilla_items::BARREL));
        assert!(items[1].meta().lore.is_empty());
    }

    #[test]
    fn test_custom_name_and_existing_lore() {
        let template = {
            let mut barrel = ItemStack::new(vanilla_items::BARREL, 1);
            barrel.meta_mut().lore = vec!["Sturdy".to_string()];
            barrel
        };
        let mut snapshot = barrel_with(&[(0, ItemStack::new(vanilla_items::COAL, 9))]);
        snapshot.custom_name = Some("Fuel Store".to_string());

        let drops = drops(
            BarrelSerializer::default()
                .with_barrel_item(template)
                .serialize(snapshot, GameMode::Survival),
        );
        assert_eq!(drops.replacement.display_name(), Some("Fuel Store"));
        assert_eq!(
            plain_lore(&drops.replacement),
            vec!["Coal x9".to_string(), "Sturdy".to_string()]
        );
    }

    #[test]
    fn test_missing_block_state_drops_contents_loose() {
        let template = ItemStack::with_meta(vanilla_items::BARREL, 1, ItemMeta::default());
        let snapshot = barrel_with(&[
            (0, ItemStack::new(vanilla_items::COAL, 9)),
            (5, ItemStack::new(vanilla_items::DIAMOND, 1)),
        ]);

        let drops = drops(
            BarrelSerializer::default()
                .with_barrel_item(template.clone())
                .serialize(snapshot, GameMode::Survival),
        );
        assert_eq!(drops.replacement, template);
        assert_eq!(
            drops.extra_drops,
            vec![
                ItemStack::new(vanilla_items::COAL, 9),
                ItemStack::new(vanilla_items::DIAMOND, 1),
            ]
        );
    }
}
