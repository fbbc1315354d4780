use crossterm::event::Event;
use ratatui::Frame;

use crate::app::Context;

pub mod game;
pub mod menu;
pub mod scores;
pub mod submit;

use game::GameScreen;
use menu::MenuScreen;
use scores::ScoresScreen;
use submit::SubmitScreen;

/// What a screen wants the driver to do after an update step.
pub enum Transition {
    Stay,
    Switch(Screen),
    Quit,
}

/// The four screens of the application, dispatched as a tagged enum so the
/// driver owns the whole state machine.
pub enum Screen {
    Menu(MenuScreen),
    Game(GameScreen),
    Submit(SubmitScreen),
    Scores(ScoresScreen),
}

impl Screen {
    pub fn draw(&mut self, frame: &mut Frame) {
        match self {
            Self::Menu(screen) => screen.draw(frame),
            Self::Game(screen) => screen.draw(frame),
            Self::Submit(screen) => screen.draw(frame),
            Self::Scores(screen) => screen.draw(frame),
        }
    }

    pub fn handle_event(&mut self, event: &Event, ctx: &Context) -> Transition {
        match self {
            Self::Menu(screen) => screen.handle_event(event, ctx),
            Self::Game(screen) => screen.handle_event(event, ctx),
            Self::Submit(screen) => screen.handle_event(event, ctx),
            Self::Scores(screen) => screen.handle_event(event, ctx),
        }
    }

    /// Called once per tick when no input arrived.
    pub fn tick(&mut self, ctx: &Context) -> Transition {
        match self {
            Self::Game(screen) => screen.tick(ctx),
            _ => Transition::Stay,
        }
    }
}
