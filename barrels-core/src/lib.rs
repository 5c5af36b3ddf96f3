//! # Barrels Core
//!
//! Block-inventory rules for barrels: keeping a barrel's contents in its item
//! when it is broken, keeping loaded barrels out of furnace fuel slots, and
//! suppressing the duplicate item spawns the server produces when a loaded
//! barrel's placement is cancelled.
//!
//! Nothing in this crate talks to the server directly. Handlers receive event
//! values and return an [`event::EventDecision`] for the caller to apply.

pub mod behavior;
pub mod config;
pub mod error;
pub mod event;
pub mod inventory;
pub mod item;
pub mod poi;

pub use behavior::{BarrelDrops, BarrelSerializer, BreakOutcome, FuelSlotGuard};
pub use config::{ConfigError, PluginConfig};
pub use error::BarrelError;
pub use event::{EventDecision, EventKind, EventPriority};
pub use inventory::{Container, SimpleContainer};
pub use item::{BlockStateMeta, ContainerState, ItemMeta, ItemStack};
pub use poi::{ConflictExpectation, ConflictRegistry, PoiConflictFilter};
