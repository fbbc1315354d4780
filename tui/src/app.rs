use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::screen::{Screen, Transition, menu::MenuScreen};

/// Draw/input cadence; also bounds how stale the end-of-game countdown can be.
const TICK: Duration = Duration::from_millis(100);

/// Paths shared by every screen.
#[derive(Clone, Debug)]
pub struct Context {
    pub stats_path: PathBuf,
    pub settings_path: PathBuf,
}

impl Context {
    pub fn new(stats_path: PathBuf, settings_path: PathBuf) -> Self {
        Self {
            stats_path,
            settings_path,
        }
    }
}

/// Top-level driver. Owns the current screen and applies the transition each
/// screen returns; screens never reference each other directly.
pub fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, ctx: Context) -> Result<()> {
    let mut screen = Screen::Menu(MenuScreen::new(&ctx));

    loop {
        terminal.draw(|frame| screen.draw(frame))?;

        let mut transition = Transition::Stay;
        if event::poll(TICK)? {
            let raw_event = event::read()?;
            if !matches!(raw_event, Event::Resize(..)) {
                transition = screen.handle_event(&raw_event, &ctx);
            }
        }
        if matches!(transition, Transition::Stay) {
            transition = screen.tick(&ctx);
        }

        match transition {
            Transition::Stay => {}
            Transition::Switch(next) => screen = next,
            Transition::Quit => break,
        }
    }

    Ok(())
}
