//! Four-in-a-row detection.
//!
//! Every cell is tried as the start of a run in each [`Direction`], row-major
//! and in [`Direction::ALL`] order. The first run found is the one reported,
//! so simultaneous lines always resolve the same way.

use super::board::{Board, Cell, Coord, LINE_LEN};
use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Horizontal,
    Vertical,
    DiagonalDownRight,
    DiagonalDownLeft,
}

impl Direction {
    /// Scan order used to break ties between simultaneous lines.
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDownRight,
        Direction::DiagonalDownLeft,
    ];

    /// (row, col) step
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDownRight => (1, 1),
            Direction::DiagonalDownLeft => (1, -1),
        }
    }
}

/// Four same-player cells, ordered from the scan start along `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct WinningLine {
    pub direction: Direction,
    pub cells: [Coord; LINE_LEN],
}

impl WinningLine {
    pub fn cells(&self) -> &[Coord; LINE_LEN] {
        &self.cells
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.cells.contains(&at)
    }
}

/// Cells of the run starting at `start`, or `None` if it leaves the board.
fn run_from(board: &Board, start: Coord, direction: Direction) -> Option<[Coord; LINE_LEN]> {
    let (dy, dx) = direction.delta();
    let mut cells = [start; LINE_LEN];
    for (step, slot) in cells.iter_mut().enumerate() {
        let step = step as isize;
        let row = start.row.checked_add_signed(dy * step)?;
        let col = start.col.checked_add_signed(dx * step)?;
        let at = Coord::new(row, col);
        if !board.contains(at) {
            return None;
        }
        *slot = at;
    }
    Some(cells)
}

/// First winning line held by `player`, scanning the whole board.
pub fn find_winning_line(board: &Board, player: Player) -> Option<WinningLine> {
    let target = Cell::Occupied(player);
    for row in 0..board.height() {
        for col in 0..board.width() {
            if board.get(row, col) != target {
                continue;
            }
            for direction in Direction::ALL {
                let Some(cells) = run_from(board, Coord::new(row, col), direction) else {
                    continue;
                };
                if cells.iter().all(|&at| board.cell(at) == Some(target)) {
                    return Some(WinningLine { direction, cells });
                }
            }
        }
    }
    None
}
