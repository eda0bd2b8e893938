//! # Positional weight table
//!
//! Scores are per cell, from the searching side's perspective.
//! Index `[row][col]`, row 0 at the top.
//!
//! ## Zones
//! - **Corners** can never be flipped back, so they are worth the most.
//! - **C / X squares** (next to a corner along the edge, and diagonally one
//!   step in) hand the corner to the opponent and are penalised hard.
//! - Everything else is mildly positive or mildly negative.
//!
//! ## Corner ramp
//! Once the searching side owns a corner, the two edges leaving it become
//! safe to grow along. Each non-corner edge cell at distance `d` from an owned
//! corner is raised to at least `ramp_start - ramp_step * d`.

use super::config::EvaluationConfig;
use super::evaluator::Evaluator;
use crate::core::{Board, Color, Position, BOARD_SIZE};
use once_cell::sync::Lazy;

static DEFAULT_TABLE: Lazy<[[i32; BOARD_SIZE]; BOARD_SIZE]> =
    Lazy::new(|| EvaluationConfig::default().base_table());

const CORNERS: [Position; 4] = [
    Position { row: 0, col: 0 },
    Position { row: 0, col: BOARD_SIZE - 1 },
    Position { row: BOARD_SIZE - 1, col: BOARD_SIZE - 1 },
    Position { row: BOARD_SIZE - 1, col: 0 },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    weights: [[i32; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for WeightTable {
    fn default() -> Self {
        WeightTable {
            weights: *DEFAULT_TABLE,
        }
    }
}

impl WeightTable {
    /// Base table without any corner adjustment.
    pub fn from_config(config: &EvaluationConfig) -> Self {
        WeightTable {
            weights: config.base_table(),
        }
    }

    /// Table for one decision: the base table with the corner ramp applied for
    /// every corner `me` holds on `board`.
    pub fn for_decision(board: &Board, me: Color, config: &EvaluationConfig) -> Self {
        let mut table = Self::from_config(config);
        for corner in CORNERS {
            if board.cell(corner) == me.to_cell() {
                log::debug!("corner {} held, ramping its edges", corner);
                table.ramp_edges(corner, config.corner_ramp_start, config.corner_ramp_step);
            }
        }
        table
    }

    fn ramp_edges(&mut self, corner: Position, start: i32, step: i32) {
        let dr: i32 = if corner.row == 0 { 1 } else { -1 };
        let dc: i32 = if corner.col == 0 { 1 } else { -1 };

        for (sr, sc) in [(dr, 0), (0, dc)] {
            let mut curr = corner;
            // stop before the opposite corner
            for d in 1..BOARD_SIZE as i32 - 1 {
                let Some(next) = curr.offset(sr, sc) else {
                    break;
                };
                let w = &mut self.weights[next.row][next.col];
                *w = (*w).max(start - step * d);
                curr = next;
            }
        }
    }

    pub fn as_array(&self) -> &[[i32; BOARD_SIZE]; BOARD_SIZE] {
        &self.weights
    }
}

impl Evaluator for WeightTable {
    fn weight(&self, pos: Position) -> i32 {
        self.weights[pos.row][pos.col]
    }

    fn name(&self) -> &str {
        "positional"
    }
}
