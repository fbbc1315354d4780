use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Row, Table};

use crate::app::Context;
use crate::screen::{Screen, Transition, menu::MenuScreen};
use crate::stats::StatsRecord;

/// Table of all recorded sessions, newest first.
pub struct ScoresScreen {
    records: Vec<StatsRecord>,
    offset: usize,
}

impl ScoresScreen {
    pub fn new(mut records: Vec<StatsRecord>) -> Self {
        records.reverse();
        Self { records, offset: 0 }
    }

    pub fn handle_event(&mut self, event: &Event, ctx: &Context) -> Transition {
        let Event::Key(key) = event else {
            return Transition::Stay;
        };
        if key.kind != KeyEventKind::Press {
            return Transition::Stay;
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.offset = (self.offset + 1).min(self.records.len().saturating_sub(1));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.offset = self.offset.saturating_sub(1);
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                return Transition::Switch(Screen::Menu(MenuScreen::new(ctx)));
            }
            _ => {}
        }

        Transition::Stay
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let header = Row::new([
            "Date", "Name", "Win", "Time", "Moves", "Width", "Height", "Mines",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self.records.iter().skip(self.offset).map(|record| {
            Row::new([
                record.timestamp.clone(),
                record.name.clone(),
                if record.is_win { "yes".to_owned() } else { "no".to_owned() },
                record.time.clone(),
                record.moves.to_string(),
                record.width.to_string(),
                record.height.to_string(),
                record.mines.to_string(),
            ])
        });

        let widths = [
            Constraint::Length(19),
            Constraint::Length(16),
            Constraint::Length(4),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
        ];

        let table = Table::new(rows, widths).header(header).block(
            Block::default()
                .title(" Game stats ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(table, frame.area());
    }
}
