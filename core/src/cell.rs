use serde::{Deserialize, Serialize};

/// State of a single grid position. Cells are owned exclusively by a
/// [`Board`](crate::Board) and never exist on their own.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) is_flagged: bool,
    pub(crate) is_visible: bool,
    /// Transient marker used during one flood traversal to keep a cell from
    /// being enqueued twice; cleared at arm time.
    pub(crate) flood_claimed: bool,
    /// Mines among the up-to-8 in-bounds neighbors, computed once after arming.
    pub(crate) neighbor_count: u8,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub const fn neighbor_count(&self) -> u8 {
        self.neighbor_count
    }

    /// What the rendering layer should show for this cell.
    pub const fn view(&self) -> CellView {
        if !self.is_visible {
            if self.is_flagged {
                CellView::Flagged
            } else {
                CellView::Hidden
            }
        } else if self.is_mine {
            CellView::Mine
        } else if self.neighbor_count == 0 {
            CellView::Blank
        } else {
            CellView::Numbered(self.neighbor_count)
        }
    }
}

/// Per-cell visual state consumed by the rendering surface; the engine itself
/// never draws.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Mine,
    Blank,
    Numbered(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_flag_takes_priority_over_contents() {
        let cell = Cell {
            is_mine: true,
            is_flagged: true,
            ..Default::default()
        };
        assert_eq!(cell.view(), CellView::Flagged);
    }

    #[test]
    fn visible_cells_show_their_contents() {
        let mut cell = Cell {
            is_visible: true,
            neighbor_count: 3,
            ..Default::default()
        };
        assert_eq!(cell.view(), CellView::Numbered(3));

        cell.neighbor_count = 0;
        assert_eq!(cell.view(), CellView::Blank);

        cell.is_mine = true;
        assert_eq!(cell.view(), CellView::Mine);
    }
}
