//! Suppression of the item duplication caused by cancelled barrel placements.
//!
//! When the placement of a barrel item that holds contents is cancelled, the
//! server spawns the barrel's contents as loose items next to the block while
//! the player also keeps the barrel. [`PoiConflictFilter`] records where those
//! copies will appear and cancels their spawns.

mod expectation;
mod filter;
mod registry;

pub use expectation::ConflictExpectation;
pub use filter::{DEFAULT_EXPECTATION_TTL, DEFAULT_SPAWN_MARGIN, PoiConflictFilter};
pub use registry::{ConflictRegistry, Reconciliation};
