//! Error types for barrel handling.

use barrels_utils::{BlockPos, Identifier};
use thiserror::Error;

/// Failures while turning a broken barrel into drops.
///
/// None of these abort a break outright; they select a degraded path that
/// is logged for the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarrelError {
    /// The item cannot hold a barrel inventory.
    #[error("item {item} has no barrel block state to embed contents into")]
    MissingBlockState {
        /// The item type that lacked the block state.
        item: Identifier,
    },
    /// The event's location could not be resolved to a loaded world.
    #[error("no world is loaded for the block at {pos}")]
    MissingWorld {
        /// The block the event refers to.
        pos: BlockPos,
    },
}
