use crate::core::BOARD_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 探索の深さ (ルートの一手の下に再帰する手数)
///
/// Not read from the config file.
pub const MAX_PLY: usize = 4;

/// Default value of a node where the engine's side has no legal move.
pub const OWN_NO_MOVE_SCORE: i32 = -10_000;
/// Default value of a node where the opponent has no legal move.
pub const OPPONENT_NO_MOVE_SCORE: i32 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIConfig {
    pub version: String,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Positional weights by board zone plus the corner ramp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub corner: i32,
    /// Edge cells next to a corner.
    pub c_square: i32,
    /// Diagonal cells one step in from a corner.
    pub x_square: i32,
    /// Rows 0 and 7, away from the corners.
    pub row_edge: i32,
    /// Columns 0 and 7, away from the corners.
    pub column_edge: i32,
    /// The ring one step in from the edge.
    pub inner_ring: i32,
    pub interior: i32,
    pub corner_ramp_start: i32,
    pub corner_ramp_step: i32,
}

/// When the root skips search and plays its only candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShortcutTrigger {
    /// Exactly one legal move.
    LegalMoveCount,
    /// Exactly one empty cell on the board.
    EmptyCellCount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Mobility weight inside the recursive search.
    pub mobility_penalty: i32,
    /// Mobility weight applied to root moves.
    pub root_mobility_penalty: i32,
    pub shortcut: ShortcutTrigger,
    /// Score of a searched node where the engine's side cannot move.
    pub own_no_move_score: i32,
    /// Score of a searched node where the opponent cannot move.
    pub opponent_no_move_score: i32,
}

impl AIConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: AIConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("could not load {}: {}; using defaults", path.display(), e);
            Self::default()
        })
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            version: "1.1".to_string(),
            evaluation: EvaluationConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            corner: 1200,
            c_square: -600,
            x_square: -800,
            row_edge: 10,
            column_edge: 200,
            inner_ring: -50,
            interior: 10,
            corner_ramp_start: 900,
            corner_ramp_step: 100,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            mobility_penalty: 20,
            root_mobility_penalty: 10,
            shortcut: ShortcutTrigger::LegalMoveCount,
            own_no_move_score: OWN_NO_MOVE_SCORE,
            opponent_no_move_score: OPPONENT_NO_MOVE_SCORE,
        }
    }
}

impl EvaluationConfig {
    /// Expands the zone values into the full base table.
    pub fn base_table(&self) -> [[i32; BOARD_SIZE]; BOARD_SIZE] {
        let last = BOARD_SIZE - 1;
        let edge = |i: usize| i == 0 || i == last;
        let ring = |i: usize| i == 1 || i == last - 1;

        let mut table = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in table.iter_mut().enumerate() {
            for (col, w) in line.iter_mut().enumerate() {
                *w = if edge(row) {
                    if edge(col) {
                        self.corner
                    } else if ring(col) {
                        self.c_square
                    } else {
                        self.row_edge
                    }
                } else if ring(row) {
                    if edge(col) {
                        self.c_square
                    } else if ring(col) {
                        self.x_square
                    } else {
                        self.inner_ring
                    }
                } else if edge(col) {
                    self.column_edge
                } else if ring(col) {
                    self.inner_ring
                } else {
                    self.interior
                };
            }
        }
        table
    }
}
