use crate::core::{Cell, Color, Position, BOARD_SIZE};

/// 8x8 のマス配列
pub type Grid = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// The eight compass directions as `(d_row, d_col)`.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn cell_at(grid: &Grid, pos: Position) -> Cell {
    grid[pos.row][pos.col]
}

/// 一方向の走査
///
/// Walks from `origin` along `(dr, dc)` and returns the number of opponent
/// discs that would be bracketed by `mover`, or `None` if the direction does
/// not qualify (no opponent run, or the run hits an empty cell / the edge).
pub fn scan_run(grid: &Grid, origin: Position, (dr, dc): (i32, i32), mover: Color) -> Option<usize> {
    let own = mover.to_cell();
    let opp = mover.opponent().to_cell();

    let mut run = 0;
    let mut curr = origin;
    while let Some(next) = curr.offset(dr, dc) {
        match cell_at(grid, next) {
            c if c == opp => {
                run += 1;
                curr = next;
            }
            c if c == own => return if run > 0 { Some(run) } else { None },
            _ => return None,
        }
    }
    None
}

/// 合法手判定
pub fn is_legal(grid: &Grid, pos: Position, mover: Color) -> bool {
    if !pos.is_on_board() || cell_at(grid, pos) != Cell::Empty {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&dir| scan_run(grid, pos, dir, mover).is_some())
}

/// Every disc `mover` would flip by playing at `pos`, over all qualifying
/// directions. Empty when the move is illegal.
pub fn flips_for(grid: &Grid, pos: Position, mover: Color) -> Vec<Position> {
    let mut flips = Vec::new();
    if !pos.is_on_board() || cell_at(grid, pos) != Cell::Empty {
        return flips;
    }

    for &(dr, dc) in DIRECTIONS.iter() {
        if let Some(run) = scan_run(grid, pos, (dr, dc), mover) {
            let mut curr = pos;
            for _ in 0..run {
                // scan_run already proved these steps are on the board
                if let Some(next) = curr.offset(dr, dc) {
                    flips.push(next);
                    curr = next;
                }
            }
        }
    }
    flips
}

/// 合法手生成 (行優先の走査順)
pub fn legal_moves(grid: &Grid, mover: Color) -> Vec<Position> {
    Position::all()
        .filter(|&pos| is_legal(grid, pos, mover))
        .collect()
}

/// Number of legal moves for `mover`.
pub fn mobility(grid: &Grid, mover: Color) -> usize {
    Position::all()
        .filter(|&pos| is_legal(grid, pos, mover))
        .count()
}
