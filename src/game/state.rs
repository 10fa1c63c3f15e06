use tracing::{debug, info, instrument, trace, warn};

use super::board::{Board, Coord};
use super::line::{find_winning_line, WinningLine};
use super::player::Player;
use crate::error::{DimensionError, MoveError};

/// Where a game stands. `Won` and `Draw` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameState {
    InProgress,
    Won { winner: Player, line: WinningLine },
    Draw,
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameState::InProgress)
    }
}

/// Coarse classification of a [`MoveResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Continue,
    Win,
    Draw,
    Rejected,
}

/// What happened to a single `apply_move` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveResult {
    /// Piece placed, game goes on with `next_player` to move.
    Continue { filled_cell: Coord, next_player: Player },
    /// Piece placed and completed a line.
    Win {
        filled_cell: Coord,
        winner: Player,
        winning_line: WinningLine,
    },
    /// Piece placed in the last empty cell without completing a line.
    Draw { filled_cell: Coord },
    /// Move refused; nothing changed.
    Rejected { reason: MoveError },
}

impl MoveResult {
    pub fn outcome(&self) -> Outcome {
        match self {
            MoveResult::Continue { .. } => Outcome::Continue,
            MoveResult::Win { .. } => Outcome::Win,
            MoveResult::Draw { .. } => Outcome::Draw,
            MoveResult::Rejected { .. } => Outcome::Rejected,
        }
    }

    /// Cell the piece landed in; `None` when rejected
    pub fn filled_cell(&self) -> Option<Coord> {
        match *self {
            MoveResult::Continue { filled_cell, .. }
            | MoveResult::Win { filled_cell, .. }
            | MoveResult::Draw { filled_cell } => Some(filled_cell),
            MoveResult::Rejected { .. } => None,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match *self {
            MoveResult::Win { winner, .. } => Some(winner),
            _ => None,
        }
    }

    pub fn winning_line(&self) -> Option<&WinningLine> {
        match self {
            MoveResult::Win { winning_line, .. } => Some(winning_line),
            _ => None,
        }
    }

    pub fn rejection(&self) -> Option<MoveError> {
        match *self {
            MoveResult::Rejected { reason } => Some(reason),
            _ => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.rejection().is_none()
    }

    /// `Err` for rejected moves, so callers can use `?`.
    pub fn into_result(self) -> Result<MoveResult, MoveError> {
        match self {
            MoveResult::Rejected { reason } => Err(reason),
            accepted => Ok(accepted),
        }
    }
}

/// One game of Connect Four: board, player to move, and outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    current_player: Player,
    state: GameState,
}

impl GameEngine {
    /// Start a game on a `width` x `height` board.
    ///
    /// Boards narrower and shorter than four are accepted, but no line can
    /// ever form on them, so such games can only end in a draw.
    pub fn new(width: usize, height: usize) -> Result<Self, DimensionError> {
        let board = Board::new(width, height)?;
        if !board.can_hold_line() {
            warn!(width, height, "board too small for four in a row; game can only draw");
        }
        Ok(Self::with_board(board))
    }

    /// Start a game on the standard 7x6 board
    pub fn standard() -> Self {
        Self::with_board(Board::standard())
    }

    fn with_board(board: Board) -> Self {
        GameEngine {
            board,
            current_player: Player::One, // Player 1 starts
            state: GameState::InProgress,
        }
    }

    /// Discard the current game and start over with the same dimensions
    pub fn reset(&mut self) {
        *self = Self::with_board(self.board.empty_like());
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Snapshot of the game state
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Read-only view of the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Owned copy of the board, detached from the engine
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Number of occupied cells in `column` (0 for columns off the board)
    pub fn column_height(&self, column: usize) -> usize {
        self.board.column_height(column)
    }

    pub fn moves_played(&self) -> usize {
        self.board.filled_count()
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..self.board.width())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Rejections leave the engine untouched. The player to move changes only
    /// when the result is [`MoveResult::Continue`].
    #[instrument(level = "debug", skip(self), fields(player = self.current_player.id()))]
    pub fn apply_move(&mut self, column: usize) -> MoveResult {
        if self.is_terminal() {
            trace!("rejected: game already over");
            return MoveResult::Rejected {
                reason: MoveError::GameAlreadyOver,
            };
        }

        let mover = self.current_player;
        let filled_cell = match self.board.drop_piece(column, mover) {
            Ok(at) => at,
            Err(reason) => {
                trace!(%reason, "rejected");
                return MoveResult::Rejected { reason };
            }
        };
        debug!(cell = %filled_cell, "piece placed");

        if let Some(line) = find_winning_line(&self.board, mover) {
            info!(winner = mover.id(), direction = ?line.direction, "game won");
            self.state = GameState::Won {
                winner: mover,
                line,
            };
            return MoveResult::Win {
                filled_cell,
                winner: mover,
                winning_line: line,
            };
        }

        if self.board.is_full() {
            info!(moves = self.moves_played(), "game drawn");
            self.state = GameState::Draw;
            return MoveResult::Draw { filled_cell };
        }

        self.current_player = mover.other();
        MoveResult::Continue {
            filled_cell,
            next_player: self.current_player,
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::standard()
    }
}
