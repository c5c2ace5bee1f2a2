//! Final score computation for completed puzzles.

use crate::Difficulty;

/// Base award for solving a puzzle at all.
const BASE_SCORE: f64 = 100.0;

/// Seconds left in the tier's time budget are worth half a point each.
const TIME_BONUS_PER_SEC: f64 = 0.5;

/// Moves at or beyond this count earn no move bonus.
const MOVE_BONUS_CUTOFF: u32 = 50;

/// Each move under the cutoff is worth two points.
const MOVE_BONUS_PER_MOVE: f64 = 2.0;

/// Computes the final score for a completed puzzle.
///
/// `base + time bonus + move bonus`, scaled by the tier multiplier and
/// rounded to the nearest integer. Both bonuses floor at zero, so slow or
/// move-heavy sessions still earn the scaled base score. The result depends
/// only on the arguments.
pub fn compute_score(difficulty: Difficulty, elapsed_secs: u32, move_count: u32) -> u32 {
    let config = difficulty.config();
    let time_bonus =
        f64::from(config.time_budget_secs.saturating_sub(elapsed_secs)) * TIME_BONUS_PER_SEC;
    let move_bonus =
        f64::from(MOVE_BONUS_CUTOFF.saturating_sub(move_count)) * MOVE_BONUS_PER_MOVE;
    let total = (BASE_SCORE + time_bonus + move_bonus) * f64::from(config.multiplier);
    total.round() as u32
}
