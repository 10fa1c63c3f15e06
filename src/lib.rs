//! # Connect Four
//!
//! A two-player Connect Four rules engine with a terminal front end built on
//! Ratatui. The engine reports structured results for every move and leaves
//! all rendering and timing to its caller.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, win detection, engine
//! - [`ui`]: Terminal UI: interactive game view
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;

pub use error::{ConfigError, DimensionError, MoveError};
pub use game::{GameEngine, GameState, MoveResult};
