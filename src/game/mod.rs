use crate::core::{Board, Cell, Color, Move, Outcome, TurnStatus};
use crate::player::PlayerController;
use serde::{Deserialize, Serialize};

/// One entry of a played game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Placed(Color, Move),
    Passed(Color),
}

/// 対局結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub outcome: Outcome,
    /// Set when the loser gave up instead of the board deciding.
    pub resigned: bool,
    pub black_discs: usize,
    pub white_discs: usize,
    pub turns: Vec<Turn>,
}

impl GameRecord {
    pub fn move_count(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| matches!(t, Turn::Placed(..)))
            .count()
    }
}

pub struct Game {
    pub board: Board,
    pub turns: Vec<Turn>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Board::standard_opening())
    }
}

impl Game {
    pub fn new(board: Board) -> Self {
        Game {
            board,
            turns: Vec::new(),
        }
    }

    /// Plays until the board is decided or a controller resigns.
    pub fn play(
        &mut self,
        black: &dyn PlayerController,
        white: &dyn PlayerController,
    ) -> anyhow::Result<GameRecord> {
        loop {
            match self.board.status() {
                TurnStatus::Finished(outcome) => return Ok(self.record(outcome, false)),
                TurnStatus::MustPass => {
                    let side = self.board.side_to_move();
                    log::debug!("{} has no legal move and passes", side);
                    self.board.pass()?;
                    self.turns.push(Turn::Passed(side));
                }
                TurnStatus::Move => {
                    let side = self.board.side_to_move();
                    let controller = match side {
                        Color::Black => black,
                        Color::White => white,
                    };
                    let moves = self.board.legal_moves().to_vec();

                    let Some(mv) = controller.choose_move(&self.board, &moves) else {
                        log::info!("{} ({}) resigned", controller.name(), side);
                        return Ok(self.record(Outcome::Winner(side.opponent()), true));
                    };
                    if !moves.contains(&mv) {
                        anyhow::bail!("{} chose {} which is not legal", controller.name(), mv);
                    }

                    self.board.apply_move(mv)?;
                    self.turns.push(Turn::Placed(side, mv));
                    log::trace!("{} plays {}\n{}", side, mv, self.board);
                }
            }
        }
    }

    fn record(&self, outcome: Outcome, resigned: bool) -> GameRecord {
        GameRecord {
            outcome,
            resigned,
            black_discs: self.board.count(Cell::Black),
            white_discs: self.board.count(Cell::White),
            turns: self.turns.clone(),
        }
    }
}
