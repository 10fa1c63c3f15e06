use crate::config::AppConfig;
use crate::error::{DimensionError, MoveError};
use crate::game::{GameEngine, MoveResult, WinningLine};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// A message held back until `due`, so the winning line can be seen first.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingAnnouncement {
    due: Instant,
    text: String,
}

pub struct App {
    engine: GameEngine,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    highlight: Option<WinningLine>,
    pending: Option<PendingAnnouncement>,
    announce_delay: Duration,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self, DimensionError> {
        let engine = GameEngine::new(config.board.width, config.board.height)?;
        Ok(App {
            selected_column: engine.width() / 2, // Start in middle
            engine,
            should_quit: false,
            message: None,
            highlight: None,
            pending: None,
            announce_delay: config.ui.announce_delay(),
        })
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.tick(Instant::now());
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, Instant::now());
                }
            }
        }
        Ok(())
    }

    /// Release a held-back announcement once its delay has passed
    fn tick(&mut self, now: Instant) {
        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            self.message = self.pending.take().map(|p| p.text);
        }
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Clear message on any key press, unless an announcement is pending
        if self.pending.is_none() {
            self.message = None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.engine.width() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(now);
            }
            KeyCode::Char('r') => {
                self.engine.reset();
                self.selected_column = self.engine.width() / 2;
                self.highlight = None;
                self.pending = None;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self, now: Instant) {
        match self.engine.apply_move(self.selected_column) {
            MoveResult::Continue { .. } => {}
            MoveResult::Win {
                winner,
                winning_line,
                ..
            } => {
                self.highlight = Some(winning_line);
                self.pending = Some(PendingAnnouncement {
                    due: now + self.announce_delay,
                    text: format!("{} won!!!", winner.name()),
                });
            }
            MoveResult::Draw { .. } => {
                self.message = Some("DRAW".to_string());
            }
            MoveResult::Rejected { reason } => match reason {
                MoveError::ColumnFull { .. } => {
                    self.message = Some("Column is full!".to_string());
                }
                MoveError::GameAlreadyOver if self.pending.is_none() => {
                    self.message = Some("Game over! Press 'r' to restart.".to_string());
                }
                // Selection is clamped to the board, and a pending
                // announcement keeps the screen for itself.
                MoveError::GameAlreadyOver | MoveError::InvalidColumn { .. } => {}
            },
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.engine,
            self.selected_column,
            self.highlight.as_ref(),
            &self.message,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(&AppConfig::default()).unwrap()
    }

    /// Press Left/Right until `col` is selected, then drop.
    fn drop_at(app: &mut App, col: usize, now: Instant) {
        while app.selected_column > col {
            app.handle_key(key(KeyCode::Left), now);
        }
        while app.selected_column < col {
            app.handle_key(key(KeyCode::Right), now);
        }
        app.handle_key(key(KeyCode::Enter), now);
    }

    #[test]
    fn test_starts_in_middle_column() {
        assert_eq!(app().selected_column, 3);
    }

    #[test]
    fn test_selection_stays_on_board() {
        let mut app = app();
        let now = Instant::now();
        for _ in 0..10 {
            app.handle_key(key(KeyCode::Right), now);
        }
        assert_eq!(app.selected_column, 6);
        for _ in 0..10 {
            app.handle_key(key(KeyCode::Left), now);
        }
        assert_eq!(app.selected_column, 0);
    }

    #[test]
    fn test_win_is_highlighted_before_announcement() {
        let mut app = app();
        let start = Instant::now();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            drop_at(&mut app, col, start);
        }

        assert!(app.highlight.is_some());
        assert_eq!(app.message, None);

        app.tick(start + Duration::from_millis(100));
        assert_eq!(app.message, None);

        app.tick(start + Duration::from_millis(500));
        assert_eq!(app.message.as_deref(), Some("Player 1 won!!!"));
        assert!(app.pending.is_none());
    }

    #[test]
    fn test_full_column_message() {
        let mut app = app();
        let now = Instant::now();
        for _ in 0..6 {
            drop_at(&mut app, 2, now);
        }
        drop_at(&mut app, 2, now);
        assert_eq!(app.message.as_deref(), Some("Column is full!"));
        assert_eq!(app.engine.moves_played(), 6);
    }

    #[test]
    fn test_restart_clears_game() {
        let mut app = app();
        let now = Instant::now();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            drop_at(&mut app, col, now);
        }
        app.handle_key(key(KeyCode::Char('r')), now);

        assert_eq!(app.engine.moves_played(), 0);
        assert!(!app.engine.is_terminal());
        assert!(app.highlight.is_none());
        assert!(app.pending.is_none());
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('q')), Instant::now());
        assert!(app.should_quit);
    }
}
