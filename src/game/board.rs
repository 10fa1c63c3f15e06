use std::fmt;

use super::player::Player;
use crate::error::{DimensionError, MoveError};

/// Default board width (columns).
pub const COLS: usize = 7;
/// Default board height (rows).
pub const ROWS: usize = 6;
/// Number of aligned pieces needed to win.
pub const LINE_LEN: usize = 4;
/// Largest number of cells a board may have.
pub const MAX_CELLS: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(into = "u8")]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Player holding this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}

/// Empty cells serialize as 0, occupied cells as the owner's id.
impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        cell.player().map_or(0, Player::id)
    }
}

/// A board position. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Row-major grid of cells with fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    #[serde(skip)]
    heights: Vec<usize>,
    #[serde(skip)]
    filled: usize,
}

impl Board {
    /// Create an empty board of the given size
    pub fn new(width: usize, height: usize) -> Result<Self, DimensionError> {
        let cells = match width.checked_mul(height) {
            Some(n) if n > 0 && n <= MAX_CELLS => n,
            _ => return Err(DimensionError::InvalidDimensions { width, height }),
        };
        Ok(Board {
            width,
            height,
            cells: vec![Cell::Empty; cells],
            heights: vec![0; width],
            filled: 0,
        })
    }

    /// Create an empty 7x6 board
    pub fn standard() -> Self {
        Board {
            width: COLS,
            height: ROWS,
            cells: vec![Cell::Empty; COLS * ROWS],
            heights: vec![0; COLS],
            filled: 0,
        }
    }

    /// Empty board with the same dimensions
    pub fn empty_like(&self) -> Self {
        Board {
            width: self.width,
            height: self.height,
            cells: vec![Cell::Empty; self.cells.len()],
            heights: vec![0; self.width],
            filled: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at a specific position.
    ///
    /// Panics if the position is outside the board; see [`Board::cell`] for a
    /// checked lookup.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.height && col < self.width,
            "({row}, {col}) outside {}x{} board",
            self.width,
            self.height
        );
        self.cells[row * self.width + col]
    }

    /// Checked lookup by coordinate
    pub fn cell(&self, at: Coord) -> Option<Cell> {
        self.contains(at).then(|| self.cells[at.row * self.width + at.col])
    }

    pub fn contains(&self, at: Coord) -> bool {
        at.row < self.height && at.col < self.width
    }

    /// Number of pieces stacked in a column (0 for columns off the board)
    pub fn column_height(&self, col: usize) -> usize {
        self.heights.get(col).copied().unwrap_or(0)
    }

    /// Check if a column is full. Columns off the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= self.width || self.heights[col] == self.height
    }

    /// Drop a piece in a column, returns the cell where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<Coord, MoveError> {
        if col >= self.width {
            return Err(MoveError::InvalidColumn {
                column: col,
                width: self.width,
            });
        }
        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull { column: col });
        }

        let row = self.height - 1 - self.heights[col];
        self.cells[row * self.width + col] = player.to_cell();
        self.heights[col] += 1;
        self.filled += 1;
        Ok(Coord::new(row, col))
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.filled == self.cells.len()
    }

    /// Total number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.filled
    }

    /// Whether a four-in-a-row fits on this board in any direction.
    pub fn can_hold_line(&self) -> bool {
        self.width >= LINE_LEN || self.height >= LINE_LEN
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => ".".to_string(),
                    Cell::Occupied(player) => player.id().to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        let footer: Vec<String> = (0..self.width).map(|col| (col % 10).to_string()).collect();
        write!(f, "{}", footer.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::standard();
        assert_eq!(board.width(), COLS);
        assert_eq!(board.height(), ROWS);
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        assert_eq!(
            Board::new(0, 6),
            Err(DimensionError::InvalidDimensions { width: 0, height: 6 })
        );
        assert_eq!(
            Board::new(7, 0),
            Err(DimensionError::InvalidDimensions { width: 7, height: 0 })
        );
        assert!(Board::new(1, 1).is_ok());
    }

    #[test]
    fn test_rejects_overflowing_dimensions() {
        assert_eq!(
            Board::new(usize::MAX, 2),
            Err(DimensionError::InvalidDimensions {
                width: usize::MAX,
                height: 2,
            })
        );
        assert!(Board::new(1 << 16, 1 << 16).is_err());
        assert!(Board::new(MAX_CELLS + 1, 1).is_err());
        assert!(Board::new(1, MAX_CELLS).is_ok());
    }

    #[test]
    fn test_coord_display() {
        assert_eq!(Coord::new(5, 0).to_string(), "(5, 0)");
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::standard();

        // Drop first piece in column 3
        let at = board.drop_piece(3, Player::One).unwrap();
        assert_eq!(at, Coord::new(5, 3)); // Should land at bottom
        assert_eq!(board.get(5, 3), Cell::Occupied(Player::One));

        // Drop second piece in same column
        let at = board.drop_piece(3, Player::Two).unwrap();
        assert_eq!(at, Coord::new(4, 3)); // Should land on top of first piece
        assert_eq!(board.get(4, 3), Cell::Occupied(Player::Two));
        assert_eq!(board.column_height(3), 2);
        assert_eq!(board.column_height(0), 0);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::standard();

        // Fill column 0
        for _ in 0..ROWS {
            board.drop_piece(0, Player::One).unwrap();
        }

        assert!(board.is_column_full(0));
        let before = board.clone();
        assert_eq!(
            board.drop_piece(0, Player::Two),
            Err(MoveError::ColumnFull { column: 0 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::standard();
        assert_eq!(
            board.drop_piece(7, Player::One),
            Err(MoveError::InvalidColumn { column: 7, width: 7 })
        );
        assert!(board.is_column_full(7));
        assert_eq!(board.column_height(7), 0);
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new(4, 4).unwrap();
        for col in 0..4 {
            assert!(!board.is_full());
            for _ in 0..4 {
                board.drop_piece(col, Player::One).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.filled_count(), 16);
    }

    #[test]
    fn test_checked_cell_lookup() {
        let board = Board::new(5, 4).unwrap();
        assert_eq!(board.cell(Coord::new(3, 4)), Some(Cell::Empty));
        assert_eq!(board.cell(Coord::new(4, 0)), None);
        assert_eq!(board.cell(Coord::new(0, 5)), None);
    }

    #[test]
    fn test_can_hold_line() {
        assert!(Board::standard().can_hold_line());
        assert!(Board::new(4, 1).unwrap().can_hold_line());
        assert!(Board::new(1, 4).unwrap().can_hold_line());
        assert!(!Board::new(3, 3).unwrap().can_hold_line());
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(4, 2).unwrap();
        board.drop_piece(1, Player::One).unwrap();
        board.drop_piece(1, Player::Two).unwrap();
        board.drop_piece(3, Player::One).unwrap();
        assert_eq!(board.to_string(), ". 2 . .\n. 1 . 1\n0 1 2 3");
    }

    #[test]
    fn test_serializes_cells_as_ids() {
        let mut board = Board::new(2, 1).unwrap();
        board.drop_piece(1, Player::Two).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"{"width":2,"height":1,"cells":[0,2]}"#);
    }
}
