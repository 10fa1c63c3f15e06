//! Core Connect Four rules: board, players, line detection, and the game
//! engine state machine.

mod board;
mod line;
mod player;
mod state;

pub use board::{Board, Cell, Coord, COLS, LINE_LEN, MAX_CELLS, ROWS};
pub use line::{find_winning_line, Direction, WinningLine};
pub use player::Player;
pub use state::{GameEngine, GameState, MoveResult, Outcome};
