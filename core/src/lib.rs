use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use placer::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod placer;
mod types;

/// Board parameters as requested by the player.
///
/// The constructor clamps rather than rejects: dimensions are raised to at
/// least 1 and the mine count is capped at `width * height - 1`, so at least
/// one safe cell always exists and the first click can be made safe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let max_mines = mult(width, height) - 1;
        if mines > max_mines {
            log::warn!(
                "Requested {} mines on a {}x{} board, clamped to {}",
                mines,
                width,
                height,
                max_mines
            );
        }
        Self {
            width,
            height,
            mines: mines.min(max_mines),
        }
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// Number of cells that must become visible to win.
    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_mines_to_leave_one_safe_cell() {
        let config = GameConfig::new(2, 2, 3);
        assert_eq!(config.mines, 3);

        let config = GameConfig::new(2, 2, 9);
        assert_eq!(config.mines, 3);
        assert_eq!(config.safe_cells(), 1);
    }

    #[test]
    fn config_raises_degenerate_dimensions() {
        let config = GameConfig::new(0, 5, 2);
        assert_eq!(config.size(), (1, 5));
        assert_eq!(config.mines, 2);
    }
}
