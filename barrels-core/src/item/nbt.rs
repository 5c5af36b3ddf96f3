//! NBT encoding of item stacks.
//!
//! Layout follows the vanilla item format: `id`, `count` and a `components`
//! compound. Container contents are stored sparsely under
//! `components.container`, one compound per occupied slot tagged with a
//! `Slot` byte, nested to any depth.
//!
//! Hosts persist the barrels produced by
//! [`BarrelSerializer`](crate::behavior::BarrelSerializer) with
//! [`item_to_nbt`] and restore them with [`item_from_nbt`], so embedded
//! contents survive chunk saves and player inventories.

use barrels_utils::{Identifier, IdentifierError};
use simdnbt::Mutf8String;
use simdnbt::owned::{NbtCompound, NbtList, NbtTag};
use thiserror::Error;

use crate::inventory::Container;

use super::{ItemMeta, ItemStack};

/// Reasons a compound cannot be read back as an item stack.
#[derive(Debug, Error)]
pub enum NbtError {
    /// A required field is absent or has the wrong tag type.
    #[error("missing or mistyped field `{0}`")]
    MissingField(&'static str),
    /// The item id is not a valid identifier.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
    /// Container contents were stored on an item that places no container.
    #[error("{item} cannot hold container contents")]
    NotAContainer {
        /// The offending item type.
        item: Identifier,
    },
    /// A slot index does not fit the container.
    #[error("slot {slot} is outside a container of {size} slots")]
    SlotOutOfRange {
        /// The stored slot index.
        slot: i8,
        /// The container's size.
        size: usize,
    },
}

fn string_tag(value: &str) -> NbtTag {
    NbtTag::String(Mutf8String::from(value))
}

/// Encodes an item stack, including any embedded inventory.
#[must_use]
pub fn item_to_nbt(stack: &ItemStack) -> NbtCompound {
    let mut nbt = NbtCompound::new();
    nbt.insert("id", string_tag(&stack.item().to_string()));
    nbt.insert("count", stack.count());
    if let Some(components) = components_to_nbt(stack.meta()) {
        nbt.insert("components", NbtTag::Compound(components));
    }
    nbt
}

fn components_to_nbt(meta: &ItemMeta) -> Option<NbtCompound> {
    let mut components = NbtCompound::new();
    let mut written = false;

    if let Some(name) = &meta.display_name {
        components.insert("custom_name", string_tag(name));
        written = true;
    }

    if !meta.lore.is_empty() {
        let lines = meta
            .lore
            .iter()
            .map(|line| Mutf8String::from(line.as_str()))
            .collect();
        components.insert("lore", NbtTag::List(NbtList::String(lines)));
        written = true;
    }

    if let Some(state) = meta.block_state.container() {
        if let Some(name) = &state.custom_name {
            components.insert("container_name", string_tag(name));
            written = true;
        }

        let items: Vec<NbtCompound> = state
            .items
            .occupied()
            .map(|(slot, item)| {
                let mut item_nbt = item_to_nbt(item);
                item_nbt.insert("Slot", slot as i8);
                item_nbt
            })
            .collect();
        if !items.is_empty() {
            components.insert("container", NbtTag::List(NbtList::Compound(items)));
            written = true;
        }
    }

    written.then_some(components)
}

/// Decodes an item stack written by [`item_to_nbt`].
pub fn item_from_nbt(nbt: &NbtCompound) -> Result<ItemStack, NbtError> {
    let id = nbt.string("id").ok_or(NbtError::MissingField("id"))?;
    let item: Identifier = id.to_str().parse()?;
    let count = nbt.int("count").unwrap_or(1);

    let mut stack = ItemStack::new(item, count);
    if let Some(components) = nbt.compound("components") {
        read_components(components, &mut stack)?;
    }
    Ok(stack)
}

fn read_components(components: &NbtCompound, stack: &mut ItemStack) -> Result<(), NbtError> {
    let item = stack.item().clone();
    let meta = stack.meta_mut();

    if let Some(name) = components.string("custom_name") {
        meta.display_name = Some(name.to_str().into_owned());
    }

    if let Some(lore) = components.list("lore") {
        let lines = lore.strings().ok_or(NbtError::MissingField("lore"))?;
        meta.lore = lines
            .iter()
            .map(|line| line.to_str().into_owned())
            .collect();
    }

    let container_name = components.string("container_name");
    let contents = components.list("container");
    if container_name.is_none() && contents.is_none() {
        return Ok(());
    }

    let Some(state) = meta.block_state.container_mut() else {
        return Err(NbtError::NotAContainer { item });
    };

    if let Some(name) = container_name {
        state.custom_name = Some(name.to_str().into_owned());
    }

    // An empty list reads back untyped, so a missing compound list is fine.
    if let Some(compounds) = contents.and_then(NbtList::compounds) {
        let size = state.items.size();
        for compound in compounds {
            let slot = compound.byte("Slot").ok_or(NbtError::MissingField("Slot"))?;
            let index = usize::try_from(slot)
                .ok()
                .filter(|&index| index < size)
                .ok_or(NbtError::SlotOutOfRange { slot, size })?;
            state.items.set_item(index, item_from_nbt(compound)?);
        }
    }

    Ok(())
}
