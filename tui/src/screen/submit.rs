use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::Context;
use crate::screen::{Screen, Transition, game::SessionReport, menu::MenuScreen};
use crate::stats::{self, StatsRecord};

const MAX_NAME_LEN: usize = 24;

/// Post-game screen: result message plus name entry for the stats log.
pub struct SubmitScreen {
    report: SessionReport,
    name: String,
    error: Option<String>,
}

impl SubmitScreen {
    pub fn new(report: SessionReport) -> Self {
        Self {
            report,
            name: String::new(),
            error: None,
        }
    }

    fn submit(&mut self, ctx: &Context) -> Transition {
        let record = StatsRecord::from_report(&self.name, &self.report);
        match stats::append(&ctx.stats_path, &record) {
            Ok(()) => Transition::Switch(Screen::Menu(MenuScreen::new(ctx))),
            Err(err) => {
                log::warn!("Could not write stats record: {err}");
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
            KeyCode::Char(c) if !c.is_control() && self.name.len() < MAX_NAME_LEN => {
                self.name.push(c);
            }
            KeyCode::Backspace => {
                self.name.pop();
            }
            KeyCode::Enter => return self.submit(ctx),
            KeyCode::Esc => {
                // Skip recording this session.
                return Transition::Switch(Screen::Menu(MenuScreen::new(ctx)));
            }
            _ => {}
        }

        Transition::Stay
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let (title, message, color) = if self.report.is_win {
            (" You won! ", "Congratulations, you won!", Color::Green)
        } else {
            (" You lost ", "You blew up.", Color::Red)
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let inner = block.inner(frame.area());
        frame.render_widget(block, frame.area());

        let [_, message_area, summary_area, prompt_area, name_area, error_area, help_area, _] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .areas(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(
                message,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .centered(),
            message_area,
        );

        let config = self.report.config;
        frame.render_widget(
            Paragraph::new(format!(
                "{} on a {}x{} board with {} mines, {} moves",
                stats::format_duration(self.report.elapsed),
                config.width,
                config.height,
                config.mines,
                self.report.moves,
            ))
            .centered(),
            summary_area,
        );

        frame.render_widget(Paragraph::new("Input your name.").centered(), prompt_area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("{}_", self.name),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .centered(),
            name_area,
        );

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
            Paragraph::new("enter submit | esc skip")
                .style(Style::default().fg(Color::DarkGray))
                .centered(),
            help_area,
        );
    }
}
