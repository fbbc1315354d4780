use crossterm::event::{Event, KeyCode, KeyEventKind};
use minefield_core::GameConfig;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::Context;
use crate::screen::{Screen, Transition, game::GameScreen, scores::ScoresScreen};
use crate::{settings, stats};

const FIELD_LABELS: [&str; 3] = ["Width", "Height", "Mines"];
const MAX_FIELD_LEN: usize = 5;

/// Start screen: board parameters, stats, quit.
pub struct MenuScreen {
    fields: [String; 3],
    focus: usize,
    error: Option<String>,
}

impl MenuScreen {
    pub fn new(ctx: &Context) -> Self {
        let saved = settings::load(&ctx.settings_path);
        Self {
            fields: [
                saved.width.to_string(),
                saved.height.to_string(),
                saved.mines.to_string(),
            ],
            focus: 0,
            error: None,
        }
    }

    /// Caller-side validation: the engine never sees non-positive input.
    fn parse_config(&self) -> Result<GameConfig, String> {
        let width: u16 = parse_positive(&self.fields[0])?;
        let height: u16 = parse_positive(&self.fields[1])?;
        let mines: u32 = parse_positive(&self.fields[2])?;
        Ok(GameConfig::new(width, height, mines))
    }

    fn start_game(&mut self, ctx: &Context) -> Transition {
        match self.parse_config() {
            Ok(config) => {
                let saved = settings::BoardSettings {
                    width: config.width,
                    height: config.height,
                    mines: config.mines,
                };
                if let Err(err) = settings::save(&ctx.settings_path, &saved) {
                    log::warn!("Could not save settings: {err}");
                }
                Transition::Switch(Screen::Game(GameScreen::new(config)))
            }
            Err(message) => {
                self.error = Some(message);
                Transition::Stay
            }
        }
    }

    fn show_scores(&mut self, ctx: &Context) -> Transition {
        match stats::load(&ctx.stats_path) {
            Ok(Some(records)) if !records.is_empty() => {
                Transition::Switch(Screen::Scores(ScoresScreen::new(records)))
            }
            Ok(_) => {
                self.error = Some("No stats detected yet!".to_owned());
                Transition::Stay
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Transition::Stay
            }
        }
    }

    pub fn handle_event(&mut self, event: &Event, ctx: &Context) -> Transition {
        let Event::Key(key) = event else {
            return Transition::Stay;
        };
        if key.kind != KeyEventKind::Press {
            return Transition::Stay;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = (self.focus + 1) % self.fields.len(),
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + self.fields.len() - 1) % self.fields.len()
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let field = &mut self.fields[self.focus];
                if field.len() < MAX_FIELD_LEN {
                    field.push(c);
                    self.error = None;
                }
            }
            KeyCode::Backspace => {
                self.fields[self.focus].pop();
            }
            KeyCode::Enter => return self.start_game(ctx),
            KeyCode::Char('s') => return self.show_scores(ctx),
            KeyCode::Char('q') | KeyCode::Esc => return Transition::Quit,
            _ => {}
        }

        Transition::Stay
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let block = Block::default()
            .title(" Minefield ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(frame.area());
        frame.render_widget(block, frame.area());

        let [_, title_area, fields_area, error_area, help_area, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new("Set up a new minefield").centered(),
            title_area,
        );

        self.draw_fields(frame, fields_area);

        if let Some(message) = &self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    message.clone(),
                    Style::default().fg(Color::Red),
                ))
                .centered(),
                error_area,
            );
        }

        frame.render_widget(
            Paragraph::new("tab next field | enter start | s stats | q quit")
                .style(Style::default().fg(Color::DarkGray))
                .centered(),
            help_area,
        );
    }

    fn draw_fields(&self, frame: &mut Frame, area: Rect) {
        let columns =
            Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas::<3>(area);

        for (i, column) in columns.into_iter().enumerate() {
            let focused = i == self.focus;
            let marker = if focused { "> " } else { "  " };
            let value_style = if focused {
                Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow)
            } else {
                Style::default()
            };

            let lines = vec![
                Line::from(Span::styled(
                    format!("{}{}", marker, FIELD_LABELS[i]),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(Span::styled(format!("  {}_", self.fields[i]), value_style)),
            ];
            frame.render_widget(Paragraph::new(lines), column);
        }
    }
}

fn parse_positive<T: std::str::FromStr + PartialOrd + From<u8>>(
    field: &str,
) -> Result<T, String> {
    match field.trim().parse::<T>() {
        Ok(value) if value >= T::from(1u8) => Ok(value),
        _ => Err("Input value must be a positive number!".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_numbers_parse() {
        assert_eq!(parse_positive::<u16>("9"), Ok(9));
        assert_eq!(parse_positive::<u32>(" 40 "), Ok(40));
    }

    #[test]
    fn zero_negative_and_garbage_are_rejected() {
        assert!(parse_positive::<u16>("0").is_err());
        assert!(parse_positive::<u16>("-3").is_err());
        assert!(parse_positive::<u16>("ten").is_err());
        assert!(parse_positive::<u16>("").is_err());
    }
}
