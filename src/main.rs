use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use connect_four::config::AppConfig;
use connect_four::ui::App;
use connect_four::GameEngine;

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml")]
    config: PathBuf,

    /// Override board width
    #[arg(long)]
    width: Option<usize>,

    /// Override board height
    #[arg(long)]
    height: Option<usize>,

    /// Play the given moves without a UI and print each result as JSON
    #[arg(long)]
    headless: bool,

    /// Comma-separated columns to play in headless mode, e.g. 3,3,4
    #[arg(long, value_delimiter = ',', requires = "headless")]
    moves: Vec<usize>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(width) = cli.width {
        config.board.width = width;
    }
    if let Some(height) = cli.height {
        config.board.height = height;
    }
    config.validate().context("invalid board size")?;

    if cli.headless {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
        run_headless(&config, &cli.moves, &mut io::stdout().lock())
    } else {
        run_tui(&config)
    }
}

/// Apply `moves` in order, writing one JSON result per line, then the final
/// board and the final state.
fn run_headless<W: Write>(config: &AppConfig, moves: &[usize], out: &mut W) -> Result<()> {
    let mut engine = GameEngine::new(config.board.width, config.board.height)?;

    for &column in moves {
        let result = engine.apply_move(column);
        writeln!(out, "{}", serde_json::to_string(&result)?)?;
    }

    writeln!(out, "{}", engine.board())?;
    writeln!(out, "{}", serde_json::to_string(&engine.state())?)?;
    Ok(())
}

fn run_tui(config: &AppConfig) -> Result<()> {
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal even when the UI loop failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("terminal UI failed")
}
