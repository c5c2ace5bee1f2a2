//! Solvability analysis over rotation states.
//!
//! The generator does not promise solvable boards. Callers that want vetted
//! seeds can search the orientations reachable through the rotate operation
//! before offering a board to a player. Relocations are not searched.

use crate::*;

pub use rotation::*;

mod rotation;

/// Bounds for the rotation search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Rotation edits allowed on top of the current board.
    pub max_depth: usize,
    /// Orientation assignments examined before giving up.
    pub max_states: usize,
}

impl SearchLimits {
    pub const DEFAULT: SearchLimits = SearchLimits {
        max_depth: 4,
        max_states: 4096,
    };
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}
