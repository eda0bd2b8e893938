use super::types::{Cell, Color, Position, BOARD_SIZE, NUM_CELLS};
use crate::logic::{self, Grid};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 盤面操作のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The cell is occupied or brackets no opponent run.
    IllegalMove(Position),
    /// The coordinate lies outside the 8x8 grid.
    OutOfBoard(Position),
    /// The game already has an outcome.
    GameOver,
    /// A pass was requested while the side to move still has a legal move.
    PassWithLegalMoves,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardError::IllegalMove(pos) => write!(f, "illegal move at {}", pos),
            BoardError::OutOfBoard(pos) => write!(f, "{} is off the board", pos),
            BoardError::GameOver => write!(f, "the game is already over"),
            BoardError::PassWithLegalMoves => {
                write!(f, "cannot pass while a legal move is available")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// 終局結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Color),
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Winner(color) => Some(color),
            Outcome::Draw => None,
        }
    }
}

/// What the side to move has to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    Move,
    MustPass,
    Finished(Outcome),
}

/// Everything `undo_move` needs to restore the position before a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub pos: Position,
    pub mover: Color,
    pub flipped: Vec<Position>,
    prev_legal_moves: Vec<Position>,
}

/// 盤面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Grid,
    /// 各状態 (空・黒・白) のマス数
    disc_count: [usize; 3],
    side_to_move: Color,
    /// 手番側の合法手 (行優先)
    legal_moves: Vec<Position>,
    outcome: Option<Outcome>,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard_opening()
    }
}

impl Board {
    /// Standard start: (3,3)/(4,4) White, (3,4)/(4,3) Black, Black to move.
    pub fn standard_opening() -> Self {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        cells[3][3] = Cell::White;
        cells[3][4] = Cell::Black;
        cells[4][3] = Cell::Black;
        cells[4][4] = Cell::White;

        let legal_moves = logic::legal_moves(&cells, Color::Black);
        Board {
            cells,
            disc_count: count_cells(&cells),
            side_to_move: Color::Black,
            legal_moves,
            outcome: None,
        }
    }

    /// Builds a board from an external snapshot. The supplied legal-move list
    /// is stored as given; it is the caller's word for the root position.
    pub fn from_snapshot(cells: Grid, side_to_move: Color, legal_moves: Vec<Position>) -> Self {
        Board {
            cells,
            disc_count: count_cells(&cells),
            side_to_move,
            legal_moves,
            outcome: None,
        }
    }

    /// Builds a board and derives the legal moves from the grid.
    pub fn from_cells(cells: Grid, side_to_move: Color) -> Self {
        let legal_moves = logic::legal_moves(&cells, side_to_move);
        Self::from_snapshot(cells, side_to_move, legal_moves)
    }

    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    /// Panics if `pos` is off the board.
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.disc_count[cell.index()]
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn legal_moves(&self) -> &[Position] {
        &self.legal_moves
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Legal moves recomputed from the grid, ignoring the cache.
    pub fn computed_legal_moves(&self) -> Vec<Position> {
        logic::legal_moves(&self.cells, self.side_to_move)
    }

    pub fn is_legal(&self, pos: Position) -> bool {
        logic::is_legal(&self.cells, pos, self.side_to_move)
    }

    /// 着手: 石を置き、挟んだ石をすべて裏返して手番を渡す
    ///
    /// The board is left untouched when an error is returned.
    pub fn apply_move(&mut self, pos: Position) -> Result<MoveRecord, BoardError> {
        if self.outcome.is_some() {
            return Err(BoardError::GameOver);
        }
        if !pos.is_on_board() {
            return Err(BoardError::OutOfBoard(pos));
        }
        let mover = self.side_to_move;
        let flipped = logic::flips_for(&self.cells, pos, mover);
        if flipped.is_empty() {
            return Err(BoardError::IllegalMove(pos));
        }

        let own = mover.to_cell();
        let opp = mover.opponent().to_cell();
        self.cells[pos.row][pos.col] = own;
        for p in &flipped {
            self.cells[p.row][p.col] = own;
        }
        self.disc_count[own.index()] += 1 + flipped.len();
        self.disc_count[opp.index()] -= flipped.len();
        self.disc_count[Cell::Empty.index()] -= 1;

        self.side_to_move = mover.opponent();
        let next_legal = logic::legal_moves(&self.cells, self.side_to_move);
        let prev_legal_moves = std::mem::replace(&mut self.legal_moves, next_legal);

        Ok(MoveRecord {
            pos,
            mover,
            flipped,
            prev_legal_moves,
        })
    }

    /// Reverts the move described by `record`. Records must be undone in
    /// reverse order of application.
    pub fn undo_move(&mut self, record: MoveRecord) {
        let own = record.mover.to_cell();
        let opp = record.mover.opponent().to_cell();
        for p in &record.flipped {
            self.cells[p.row][p.col] = opp;
        }
        self.cells[record.pos.row][record.pos.col] = Cell::Empty;
        self.disc_count[own.index()] -= 1 + record.flipped.len();
        self.disc_count[opp.index()] += record.flipped.len();
        self.disc_count[Cell::Empty.index()] += 1;

        self.side_to_move = record.mover;
        self.legal_moves = record.prev_legal_moves;
    }

    /// パス: 手番側に合法手がないときだけ許される
    ///
    /// If the opponent has no legal move either, the game ends and the side
    /// with more discs wins.
    pub fn pass(&mut self) -> Result<(), BoardError> {
        if self.outcome.is_some() {
            return Err(BoardError::GameOver);
        }
        if !self.legal_moves.is_empty() {
            return Err(BoardError::PassWithLegalMoves);
        }

        self.side_to_move = self.side_to_move.opponent();
        self.legal_moves = logic::legal_moves(&self.cells, self.side_to_move);
        if self.legal_moves.is_empty() {
            self.outcome = Some(self.majority());
        }
        Ok(())
    }

    pub fn status(&self) -> TurnStatus {
        if let Some(outcome) = self.outcome {
            return TurnStatus::Finished(outcome);
        }
        if !self.legal_moves.is_empty() {
            TurnStatus::Move
        } else if logic::mobility(&self.cells, self.side_to_move.opponent()) > 0 {
            TurnStatus::MustPass
        } else {
            TurnStatus::Finished(self.majority())
        }
    }

    fn majority(&self) -> Outcome {
        let black = self.count(Cell::Black);
        let white = self.count(Cell::White);
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Outcome::Winner(Color::Black),
            std::cmp::Ordering::Less => Outcome::Winner(Color::White),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

fn count_cells(cells: &Grid) -> [usize; 3] {
    let mut counts = [0; 3];
    for row in cells.iter() {
        for cell in row.iter() {
            counts[cell.index()] += 1;
        }
    }
    debug_assert_eq!(counts.iter().sum::<usize>(), NUM_CELLS);
    counts
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;
        for (row, line) in self.cells.iter().enumerate() {
            write!(f, "{} ", row)?;
            for cell in line.iter() {
                write!(f, " {}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "X:{} O:{} to move: {}",
            self.count(Cell::Black),
            self.count(Cell::White),
            self.side_to_move
        )
    }
}
