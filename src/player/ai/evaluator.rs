//! Evaluator trait for move scoring
//!
//! Defines the interface the search uses to score a single placement.

use crate::core::Position;

/// Trait for scoring placements
pub trait Evaluator {
    /// Desirability of placing a disc on `pos`, from the searching side's view.
    ///
    /// Must be a pure lookup: the search calls it once per visited move.
    fn weight(&self, pos: Position) -> i32;

    /// Get evaluator name for debugging
    fn name(&self) -> &str;
}
