use std::io;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

mod app;
mod screen;
mod settings;
mod stats;

/// Desktop minesweeper for the terminal.
#[derive(Debug, Parser)]
#[command(name = "minefield", version, about)]
struct Cli {
    /// Path of the append-only stats log
    #[arg(long, default_value = "stats.txt")]
    stats: PathBuf,

    /// Path of the persisted menu settings
    #[arg(long, default_value = "minefield.json")]
    settings: PathBuf,

    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity<clap_verbosity_flag::WarnLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .init();

    let mut terminal = setup_terminal()?;
    let result = app::run(&mut terminal, app::Context::new(cli.stats, cli.settings));
    restore_terminal()?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("failed to enter raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(io::stdout())).context("failed to create terminal")
}

fn restore_terminal() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    disable_raw_mode().context("failed to leave raw mode")?;
    Ok(())
}
