use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use minefield_core::{
    Board, CellView, ClickAction, Coord2, GameConfig, RandomMinePlacer,
};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::Context;
use crate::screen::{Screen, Transition, menu::MenuScreen, submit::SubmitScreen};
use crate::stats;

/// Rendered width of one cell in terminal columns.
const CELL_WIDTH: u16 = 3;

/// Cosmetic pause between the final click and the submit screen.
const END_DELAY: Duration = Duration::from_secs(2);

/// Everything the submit screen needs to record one finished session.
#[derive(Copy, Clone, Debug)]
pub struct SessionReport {
    pub is_win: bool,
    pub elapsed: Duration,
    pub moves: u32,
    pub config: GameConfig,
}

/// One game of minesweeper: a board, a timer, and input forwarding.
pub struct GameScreen {
    board: Board,
    cursor: Coord2,
    started: Instant,
    ended_at: Option<Instant>,
    /// Where the grid was last drawn; used to map mouse clicks to cells.
    grid_area: Rect,
}

impl GameScreen {
    pub fn new(config: GameConfig) -> Self {
        let board = Board::new(config, Box::new(RandomMinePlacer::from_entropy()));
        Self {
            board,
            cursor: (config.width / 2, config.height / 2),
            started: Instant::now(),
            ended_at: None,
            grid_area: Rect::default(),
        }
    }

    fn elapsed(&self) -> Duration {
        match self.ended_at {
            Some(end) => end.duration_since(self.started),
            None => self.started.elapsed(),
        }
    }

    fn report(&self) -> SessionReport {
        SessionReport {
            is_win: !self.board.has_failed(),
            elapsed: self.elapsed(),
            moves: self.board.move_count(),
            config: self.board.config(),
        }
    }

    /// Forwards one click to the board. Input is latched off once the game
    /// has ended; the board itself would reject it anyway.
    fn click(&mut self, coords: Coord2, action: ClickAction) {
        if self.board.has_ended() {
            return;
        }

        match self.board.click(coords, action) {
            Ok(outcome) => {
                log::trace!("Click {:?} {:?} -> {:?}", coords, action, outcome);
                if self.board.has_ended() && self.ended_at.is_none() {
                    self.ended_at = Some(Instant::now());
                }
            }
            Err(err) => log::debug!("Click {:?} ignored: {err}", coords),
        }
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) {
        let (width, height) = self.board.size();
        let x = (self.cursor.0 as i32 + dx).clamp(0, width as i32 - 1);
        let y = (self.cursor.1 as i32 + dy).clamp(0, height as i32 - 1);
        self.cursor = (x as u16, y as u16);
    }

    /// Maps a terminal position to a cell, clamped to board bounds so the
    /// engine only ever sees valid coordinates.
    fn cell_under(&self, column: u16, row: u16) -> Option<Coord2> {
        let area = self.grid_area;
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }

        let (width, height) = self.board.size();
        let x = ((column - area.x) / CELL_WIDTH).min(width - 1);
        let y = (row - area.y).min(height - 1);
        Some((x, y))
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => ClickAction::Reveal,
            MouseEventKind::Down(MouseButton::Right) => ClickAction::Flag,
            _ => return,
        };

        if let Some(coords) = self.cell_under(mouse.column, mouse.row) {
            self.cursor = coords;
            self.click(coords, action);
        }
    }

    pub fn handle_event(&mut self, event: &Event, ctx: &Context) -> Transition {
        match event {
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                Transition::Stay
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    // Abandoning mid-game records nothing.
                    Transition::Switch(Screen::Menu(MenuScreen::new(ctx)))
                }
                KeyCode::Char(' ') | KeyCode::Enter if self.board.has_ended() => {
                    // Skip the rest of the end countdown.
                    Transition::Switch(Screen::Submit(SubmitScreen::new(self.report())))
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    self.click(self.cursor, ClickAction::Reveal);
                    Transition::Stay
                }
                KeyCode::Char('f') => {
                    self.click(self.cursor, ClickAction::Flag);
                    Transition::Stay
                }
                KeyCode::Char('h') | KeyCode::Left => {
                    self.move_cursor(-1, 0);
                    Transition::Stay
                }
                KeyCode::Char('l') | KeyCode::Right => {
                    self.move_cursor(1, 0);
                    Transition::Stay
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.move_cursor(0, -1);
                    Transition::Stay
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    self.move_cursor(0, 1);
                    Transition::Stay
                }
                _ => Transition::Stay,
            },
            _ => Transition::Stay,
        }
    }

    pub fn tick(&mut self, _ctx: &Context) -> Transition {
        if let Some(end) = self.ended_at {
            if end.elapsed() >= END_DELAY {
                return Transition::Switch(Screen::Submit(SubmitScreen::new(self.report())));
            }
        }
        Transition::Stay
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let [board_area, info_area, help_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.draw_board(frame, board_area);
        self.draw_info(frame, info_area);
        frame.render_widget(
            Paragraph::new("arrows/hjkl move | space reveal | f flag | mouse click | esc menu")
                .style(Style::default().fg(Color::DarkGray)),
            help_area,
        );
    }

    fn draw_board(&mut self, frame: &mut Frame, area: Rect) {
        let config = self.board.config();
        let (title, border_color) = if !self.board.has_ended() {
            (
                format!(
                    " W:{} H:{} M:{} ",
                    config.width, config.height, config.mines
                ),
                Color::Cyan,
            )
        } else if self.board.has_failed() {
            (" You blew up ".to_owned(), Color::Red)
        } else {
            (" You won! ".to_owned(), Color::Green)
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (width, height) = self.board.size();
        let grid_width = width.saturating_mul(CELL_WIDTH).min(inner.width);
        let grid_height = height.min(inner.height);
        self.grid_area = Rect {
            x: inner.x + inner.width.saturating_sub(width.saturating_mul(CELL_WIDTH)) / 2,
            y: inner.y + inner.height.saturating_sub(height) / 2,
            width: grid_width,
            height: grid_height,
        };

        for y in 0..grid_height {
            let spans: Vec<Span> = (0..width)
                .map(|x| self.cell_span((x, y)))
                .collect();
            let row_area = Rect {
                x: self.grid_area.x,
                y: self.grid_area.y + y,
                width: grid_width,
                height: 1,
            };
            frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
        }
    }

    fn cell_span(&self, coords: Coord2) -> Span<'static> {
        let (text, mut style) = match self.board.view_at(coords) {
            CellView::Hidden => (
                " \u{00b7} ".to_owned(),
                Style::default().fg(Color::DarkGray),
            ),
            CellView::Flagged => (" \u{2691} ".to_owned(), Style::default().fg(Color::Red)),
            CellView::Mine => (
                " * ".to_owned(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            CellView::Blank => ("   ".to_owned(), Style::default()),
            CellView::Numbered(count) => (
                format!(" {count} "),
                Style::default()
                    .fg(number_color(count))
                    .add_modifier(Modifier::BOLD),
            ),
        };

        if coords == self.cursor {
            style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
        }

        Span::styled(text, style)
    }

    fn draw_info(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::raw("Mines left: "),
            Span::styled(
                self.board.mines_left().to_string(),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  Moves: "),
            Span::styled(
                self.board.move_count().to_string(),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  Time: "),
            Span::styled(
                stats::format_duration(self.elapsed()),
                Style::default().fg(Color::Yellow),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn number_color(count: u8) -> Color {
    match count {
        1 => Color::Blue,
        2 => Color::Green,
        3 => Color::Red,
        4 => Color::Magenta,
        5 => Color::Yellow,
        6 => Color::Cyan,
        7 => Color::Gray,
        _ => Color::DarkGray,
    }
}
