//! Identifiers of the vanilla items this crate refers to by name.

#![allow(missing_docs)]

use barrels_utils::Identifier;

pub const AIR: Identifier = Identifier::vanilla_static("air");
pub const BARREL: Identifier = Identifier::vanilla_static("barrel");
pub const CHEST: Identifier = Identifier::vanilla_static("chest");
pub const HOPPER: Identifier = Identifier::vanilla_static("hopper");
pub const DIAMOND: Identifier = Identifier::vanilla_static("diamond");
pub const STONE: Identifier = Identifier::vanilla_static("stone");
pub const OAK_LOG: Identifier = Identifier::vanilla_static("oak_log");
pub const COAL: Identifier = Identifier::vanilla_static("coal");
