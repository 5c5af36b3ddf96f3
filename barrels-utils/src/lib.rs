//! # Barrels Utils
//!
//! Shared value types for the barrels plugin: positions, bounding boxes,
//! identifiers and chat text formatting.

pub mod math;
pub mod text;
mod types;

pub use types::{BlockPos, Identifier, IdentifierError, WorldId};
