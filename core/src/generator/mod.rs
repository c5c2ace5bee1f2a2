use crate::*;
pub use random::*;

mod random;

/// Produces a starting layout for one difficulty tier.
///
/// Implementations promise structural validity: the tier's exact element
/// counts with no overlaps, a single source on a border cell aimed inward,
/// and a target under every goal spot. They do not promise the layout is
/// solvable.
pub trait BoardGenerator {
    fn generate(self, difficulty: Difficulty) -> Result<PuzzleLayout>;
}
