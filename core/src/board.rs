use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{
    Cell, CellCount, CellView, Coord2, GameConfig, GameError, MinePlacer, Result, neighbors,
    to_index,
};

/// Valid transitions:
/// - Unarmed -> Playing (first click arms the board)
/// - Playing -> Won
/// - Playing -> Lost
///
/// Terminal states accept no further mutating clicks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    Unarmed,
    Playing,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_unarmed(self) -> bool {
        matches!(self, Self::Unarmed)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::Unarmed
    }
}

/// Button kind delivered by the input source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickAction {
    Reveal,
    Flag,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    NoChange,
    Updated,
    Won,
    Lost,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// What revealing one cell asks of the flood loop.
enum RevealStep {
    /// Already visible or flagged; nothing happened.
    Skip,
    /// Revealed a numbered cell; no propagation.
    Opened,
    /// Revealed a mine; the game is lost.
    Mine,
    /// Revealed a zero-neighbor cell; propagate to its neighbors.
    Flood,
}

/// The minefield: a rectangular grid of cells plus the state machine that
/// drives a game from the first click to a win or a loss.
///
/// Arming is deferred until the first click so that click is guaranteed safe.
/// The board owns the single authoritative count of visible cells; only its
/// own reveal path updates it.
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    placer: Box<dyn MinePlacer>,
    visible_count: CellCount,
    move_count: u32,
    state: BoardState,
}

impl Board {
    pub fn new(config: GameConfig, placer: Box<dyn MinePlacer>) -> Self {
        Self {
            config,
            cells: Array2::default((config.width as usize, config.height as usize)),
            placer,
            visible_count: 0,
            move_count: 0,
            state: BoardState::default(),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn has_ended(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn has_failed(&self) -> bool {
        self.state == BoardState::Lost
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn visible_count(&self) -> CellCount {
        self.visible_count
    }

    /// How many mines have not been flagged yet. Negative when the player has
    /// placed more flags than there are mines.
    pub fn mines_left(&self) -> i64 {
        let flagged = self
            .cells
            .iter()
            .filter(|cell| cell.is_flagged && !cell.is_visible)
            .count();
        self.config.mines as i64 - flagged as i64
    }

    pub fn view_at(&self, coords: Coord2) -> CellView {
        self.cells[to_index(coords)].view()
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.cells[to_index(coords)].is_mine
    }

    /// Processes one click event. Coordinates outside the board are rejected,
    /// and a finished board accepts no further moves.
    ///
    /// The first click arms the board with the clicked coordinate excluded
    /// from the mine pool, whichever button it came from. A flag click
    /// toggles the flag and counts as a move; a reveal click on a flagged
    /// cell is ignored without counting. After any processed click the win
    /// condition is checked, unless this same click lost the game.
    pub fn click(&mut self, coords: Coord2, action: ClickAction) -> Result<ClickOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.state.is_terminal() {
            return Err(GameError::AlreadyEnded);
        }

        if self.cell(coords).is_visible {
            return Ok(ClickOutcome::NoChange);
        }

        if self.state.is_unarmed() {
            self.arm(coords);
        }

        let outcome = match action {
            ClickAction::Flag => {
                let cell = &mut self.cells[to_index(coords)];
                cell.is_flagged = !cell.is_flagged;
                self.move_count += 1;
                ClickOutcome::Updated
            }
            ClickAction::Reveal if self.cell(coords).is_flagged => ClickOutcome::NoChange,
            ClickAction::Reveal => {
                self.move_count += 1;
                self.reveal_from(coords);
                if self.state == BoardState::Lost {
                    ClickOutcome::Lost
                } else {
                    ClickOutcome::Updated
                }
            }
        };

        // A loss in this same call takes precedence and is never overwritten.
        if self.state != BoardState::Lost && self.check_win() {
            self.finish(true);
            return Ok(ClickOutcome::Won);
        }

        Ok(outcome)
    }

    /// All safe cells visible, and no mine was revealed along the way.
    pub fn check_win(&self) -> bool {
        self.visible_count == self.config.safe_cells()
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.config.size();
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    fn cell(&self, coords: Coord2) -> &Cell {
        &self.cells[to_index(coords)]
    }

    /// Places mines (the clicked coordinate excluded from the candidate
    /// pool), then computes every cell's neighbor count. Runs exactly once
    /// per board.
    fn arm(&mut self, safe: Coord2) {
        debug_assert!(self.state.is_unarmed());

        let mask = self.placer.place(self.config, safe);
        for (index, &is_mine) in mask.indexed_iter() {
            let cell = &mut self.cells[index];
            cell.is_mine = is_mine;
            cell.flood_claimed = false;
        }

        let (width, height) = self.config.size();
        for x in 0..width {
            for y in 0..height {
                let count = neighbors((x, y), (width, height))
                    .filter(|&pos| self.cells[to_index(pos)].is_mine)
                    .count() as u8;
                self.cells[to_index((x, y))].neighbor_count = count;
            }
        }

        self.state = BoardState::Playing;
        log::debug!(
            "Armed {}x{} board with {} mines, safe cell {:?}",
            width,
            height,
            self.config.mines,
            safe
        );
    }

    /// Iterative flood-fill over an explicit stack; recursion depth stays
    /// constant regardless of board size. Each cell enters the stack at most
    /// once because floodable neighbors are claimed at collection time, so
    /// the traversal is O(cells).
    fn reveal_from(&mut self, start: Coord2) {
        let mut stack = vec![start];

        while let Some(coords) = stack.pop() {
            match self.reveal_one(coords) {
                RevealStep::Skip | RevealStep::Opened => {}
                RevealStep::Mine => {
                    log::debug!("Revealed mine at {:?}", coords);
                    self.finish(false);
                    break;
                }
                RevealStep::Flood => {
                    let eligible = self.collect_floodable(coords);
                    log::trace!("Flood from {:?} claims {} neighbors", coords, eligible.len());
                    stack.extend(eligible);
                }
            }
        }
    }

    fn reveal_one(&mut self, coords: Coord2) -> RevealStep {
        let cell = self.cell(coords);
        if cell.is_visible || cell.is_flagged {
            return RevealStep::Skip;
        }

        self.set_visible(coords);

        let cell = self.cell(coords);
        if cell.is_mine {
            RevealStep::Mine
        } else if cell.neighbor_count == 0 {
            RevealStep::Flood
        } else {
            RevealStep::Opened
        }
    }

    /// Neighbors eligible to join an in-progress flood: in bounds, not yet
    /// claimed, hidden, unflagged, and not a mine. Each is claimed here so two
    /// flood sources in the same pass cannot enqueue it twice.
    fn collect_floodable(&mut self, coords: Coord2) -> Vec<Coord2> {
        let mut eligible = Vec::new();

        for pos in neighbors(coords, self.config.size()) {
            let cell = &mut self.cells[to_index(pos)];
            if cell.flood_claimed || cell.is_visible || cell.is_flagged || cell.is_mine {
                continue;
            }
            cell.flood_claimed = true;
            eligible.push(pos);
        }

        eligible
    }

    fn set_visible(&mut self, coords: Coord2) {
        let cell = &mut self.cells[to_index(coords)];
        debug_assert!(!cell.is_visible);
        cell.is_visible = true;
        self.visible_count += 1;
    }

    /// Ends the game either way: the whole board is shown so the player sees
    /// the full state, then the terminal flag is set.
    fn finish(&mut self, won: bool) {
        for cell in self.cells.iter_mut() {
            if !cell.is_visible {
                cell.is_visible = true;
                self.visible_count += 1;
            }
        }
        self.state = if won { BoardState::Won } else { BoardState::Lost };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedMinePlacer, RandomMinePlacer};

    fn fixed_board(width: u16, height: u16, mines: &[Coord2]) -> Board {
        let config = GameConfig::new(width, height, mines.len() as CellCount);
        Board::new(config, Box::new(FixedMinePlacer::new(mines)))
    }

    fn count_visible(board: &Board) -> CellCount {
        board.cells.iter().filter(|cell| cell.is_visible).count() as CellCount
    }

    #[test]
    fn arming_places_exact_count_and_spares_first_click() {
        let config = GameConfig::new(9, 9, 10);
        let mut board = Board::new(config, Box::new(RandomMinePlacer::seeded(42)));

        board.click((4, 4), ClickAction::Reveal).unwrap();

        let mine_count = board.cells.iter().filter(|cell| cell.is_mine).count();
        assert_eq!(mine_count, 10);
        assert!(!board.has_mine_at((4, 4)));
        assert!(!board.state().is_unarmed());
    }

    #[test]
    fn neighbor_counts_match_a_recount() {
        let config = GameConfig::new(8, 8, 12);
        let mut board = Board::new(config, Box::new(RandomMinePlacer::seeded(5)));
        board.click((0, 0), ClickAction::Reveal).unwrap();

        for x in 0..8 {
            for y in 0..8 {
                let expected = neighbors((x, y), (8, 8))
                    .filter(|&pos| board.has_mine_at(pos))
                    .count() as u8;
                assert_eq!(board.cells[to_index((x, y))].neighbor_count, expected);
            }
        }
    }

    #[test]
    fn flood_reveals_connected_zero_region_and_its_border() {
        // 3x3, one mine in the corner: clicking the opposite corner floods
        // every safe cell in a single call and wins.
        let mut board = fixed_board(3, 3, &[(2, 2)]);

        let outcome = board.click((0, 0), ClickAction::Reveal).unwrap();

        assert_eq!(outcome, ClickOutcome::Won);
        assert_eq!(board.state(), BoardState::Won);
        assert_eq!(board.view_at((0, 0)), CellView::Blank);
        assert_eq!(board.view_at((1, 1)), CellView::Numbered(1));
        // The finished board shows everything, the mine included.
        assert_eq!(board.view_at((2, 2)), CellView::Mine);
    }

    #[test]
    fn visible_counter_matches_live_count_after_every_click() {
        let mut board = fixed_board(4, 4, &[(0, 1), (3, 3)]);

        for (coords, action) in [
            ((0, 0), ClickAction::Reveal),
            ((1, 0), ClickAction::Flag),
            ((2, 0), ClickAction::Reveal),
            ((1, 0), ClickAction::Flag),
            ((3, 0), ClickAction::Reveal),
        ] {
            let _ = board.click(coords, action).unwrap();
            assert_eq!(board.visible_count(), count_visible(&board));
        }
    }

    #[test]
    fn revealing_a_mine_loses_and_shows_the_whole_board() {
        let mut board = fixed_board(2, 2, &[(1, 1)]);

        board.click((0, 0), ClickAction::Reveal).unwrap();
        let outcome = board.click((1, 1), ClickAction::Reveal).unwrap();

        assert_eq!(outcome, ClickOutcome::Lost);
        assert!(board.has_ended());
        assert!(board.has_failed());
        assert_eq!(count_visible(&board), 4);
        assert_eq!(board.view_at((1, 1)), CellView::Mine);
    }

    #[test]
    fn terminal_board_rejects_further_clicks() {
        let mut board = fixed_board(2, 2, &[(1, 1)]);
        board.click((0, 0), ClickAction::Reveal).unwrap();
        board.click((1, 1), ClickAction::Reveal).unwrap();

        assert_eq!(
            board.click((0, 1), ClickAction::Reveal),
            Err(GameError::AlreadyEnded)
        );
        assert_eq!(
            board.click((0, 1), ClickAction::Flag),
            Err(GameError::AlreadyEnded)
        );
    }

    #[test]
    fn win_requires_all_safe_cells_and_no_mine() {
        let mut board = fixed_board(2, 2, &[(0, 0)]);

        assert_eq!(
            board.click((1, 1), ClickAction::Reveal).unwrap(),
            ClickOutcome::Updated
        );
        assert_eq!(
            board.click((1, 0), ClickAction::Reveal).unwrap(),
            ClickOutcome::Updated
        );
        let outcome = board.click((0, 1), ClickAction::Reveal).unwrap();

        assert_eq!(outcome, ClickOutcome::Won);
        assert!(board.has_ended());
        assert!(!board.has_failed());
        assert_eq!(board.view_at((0, 0)), CellView::Mine);
    }

    #[test]
    fn double_flag_returns_to_hidden_and_counts_two_moves() {
        let mut board = fixed_board(3, 3, &[(2, 2)]);

        board.click((0, 0), ClickAction::Flag).unwrap();
        assert_eq!(board.view_at((0, 0)), CellView::Flagged);

        board.click((0, 0), ClickAction::Flag).unwrap();
        assert_eq!(board.view_at((0, 0)), CellView::Hidden);
        assert_eq!(board.move_count(), 2);
        assert_eq!(board.visible_count(), 0);
    }

    #[test]
    fn reveal_on_flagged_cell_is_ignored_without_counting() {
        let mut board = fixed_board(3, 3, &[(2, 2)]);

        board.click((2, 2), ClickAction::Flag).unwrap();
        let outcome = board.click((2, 2), ClickAction::Reveal).unwrap();

        assert_eq!(outcome, ClickOutcome::NoChange);
        assert_eq!(board.view_at((2, 2)), CellView::Flagged);
        assert_eq!(board.move_count(), 1);
        assert!(!board.has_ended());
    }

    #[test]
    fn click_on_visible_cell_is_a_no_op_for_both_actions() {
        let mut board = fixed_board(3, 3, &[(0, 2), (2, 0), (2, 2)]);

        board.click((0, 0), ClickAction::Reveal).unwrap();
        assert!(board.cell((0, 0)).is_visible);
        let moves = board.move_count();

        assert_eq!(
            board.click((0, 0), ClickAction::Reveal).unwrap(),
            ClickOutcome::NoChange
        );
        assert_eq!(
            board.click((0, 0), ClickAction::Flag).unwrap(),
            ClickOutcome::NoChange
        );
        assert_eq!(board.move_count(), moves);
    }

    #[test]
    fn first_click_may_be_a_flag_and_still_arms() {
        let mut board = fixed_board(3, 3, &[(2, 2)]);

        board.click((0, 0), ClickAction::Flag).unwrap();

        assert_eq!(board.state(), BoardState::Playing);
        assert_eq!(board.view_at((0, 0)), CellView::Flagged);
        assert!(!board.has_mine_at((0, 0)));
    }

    #[test]
    fn flood_stops_at_flagged_cells() {
        // Flag a cell inside the would-be flood region; it must stay hidden.
        let mut board = fixed_board(3, 3, &[(2, 2)]);

        board.click((0, 1), ClickAction::Flag).unwrap();
        let outcome = board.click((0, 0), ClickAction::Reveal).unwrap();

        assert_eq!(outcome, ClickOutcome::Updated);
        assert_eq!(board.view_at((0, 1)), CellView::Flagged);
        assert!(!board.has_ended());
    }

    #[test]
    fn out_of_bounds_coordinates_are_rejected() {
        let mut board = fixed_board(3, 3, &[(2, 2)]);

        assert_eq!(
            board.click((3, 0), ClickAction::Reveal),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            board.click((0, 7), ClickAction::Flag),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn mines_left_tracks_flags() {
        let mut board = fixed_board(3, 3, &[(2, 2), (2, 1)]);

        assert_eq!(board.mines_left(), 2);
        board.click((1, 0), ClickAction::Flag).unwrap();
        board.click((2, 2), ClickAction::Flag).unwrap();
        board.click((0, 2), ClickAction::Flag).unwrap();
        assert_eq!(board.mines_left(), -1);
    }
}
