//! Position file format
//!
//! ```text
//! <side: 1|2>
//! <64 cell codes, row-major, 0=empty 1=black 2=white>
//! <n> <row col> * n
//! ```
//! All tokens are whitespace separated; line breaks carry no meaning.

use super::board::Board;
use super::types::{Cell, Color, Position, BOARD_SIZE};
use crate::logic::Grid;
use std::fmt;
use std::io::Write;
use std::str::SplitWhitespace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnexpectedEof { expected: &'static str },
    InvalidInteger(String),
    InvalidSide(i64),
    InvalidCell { row: usize, col: usize, value: i64 },
    InvalidMoveCount(i64),
    InvalidCoordinate { row: i64, col: i64 },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input, expected {}", expected)
            }
            ParseError::InvalidInteger(token) => write!(f, "not an integer: {:?}", token),
            ParseError::InvalidSide(v) => write!(f, "side must be 1 or 2, got {}", v),
            ParseError::InvalidCell { row, col, value } => {
                write!(f, "cell ({}, {}) has invalid state {}", row, col, value)
            }
            ParseError::InvalidMoveCount(n) => write!(f, "invalid legal move count {}", n),
            ParseError::InvalidCoordinate { row, col } => {
                write!(f, "coordinate ({}, {}) is off the board", row, col)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// 入力ファイルの内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSnapshot {
    /// The side the engine chooses a move for; also the side to move.
    pub side: Color,
    pub cells: Grid,
    /// Authoritative legal moves for `side`.
    pub legal_moves: Vec<Position>,
}

impl PositionSnapshot {
    pub fn from_board(board: &Board) -> Self {
        PositionSnapshot {
            side: board.side_to_move(),
            cells: *board.cells(),
            legal_moves: board.legal_moves().to_vec(),
        }
    }

    pub fn to_board(&self) -> Board {
        Board::from_snapshot(self.cells, self.side, self.legal_moves.clone())
    }
}

impl fmt::Display for PositionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.side.code())?;
        for row in self.cells.iter() {
            let line: Vec<String> = row.iter().map(|c| c.code().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        writeln!(f, "{}", self.legal_moves.len())?;
        for pos in &self.legal_moves {
            writeln!(f, "{} {}", pos.row, pos.col)?;
        }
        Ok(())
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn next_int(&mut self, expected: &'static str) -> Result<i64, ParseError> {
        let token = self
            .inner
            .next()
            .ok_or(ParseError::UnexpectedEof { expected })?;
        token
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidInteger(token.to_string()))
    }
}

/// 入力ファイルの解析
///
/// Trailing tokens after the last legal move are ignored.
pub fn parse_position(input: &str) -> Result<PositionSnapshot, ParseError> {
    let mut tokens = Tokens {
        inner: input.split_whitespace(),
    };

    let side_code = tokens.next_int("side to move")?;
    let side = Color::from_code(side_code).ok_or(ParseError::InvalidSide(side_code))?;

    let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    for (row, line) in cells.iter_mut().enumerate() {
        for (col, cell) in line.iter_mut().enumerate() {
            let value = tokens.next_int("board cell")?;
            *cell = Cell::from_code(value).ok_or(ParseError::InvalidCell { row, col, value })?;
        }
    }

    let n = tokens.next_int("legal move count")?;
    if n < 0 || n as usize > BOARD_SIZE * BOARD_SIZE {
        return Err(ParseError::InvalidMoveCount(n));
    }
    let mut legal_moves = Vec::with_capacity(n as usize);
    for _ in 0..n {
        let row = tokens.next_int("legal move row")?;
        let col = tokens.next_int("legal move column")?;
        let pos = Position::try_new(row, col).ok_or(ParseError::InvalidCoordinate { row, col })?;
        legal_moves.push(pos);
    }

    Ok(PositionSnapshot {
        side,
        cells,
        legal_moves,
    })
}

/// 出力: `row col` の一行を書き、すぐに flush する
pub fn write_move<W: Write>(out: &mut W, mv: Position) -> std::io::Result<()> {
    writeln!(out, "{} {}", mv.row, mv.col)?;
    out.flush()
}
