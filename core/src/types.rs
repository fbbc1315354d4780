/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u16;

/// Two-dimensional coordinates `(x, y)`, 0-indexed.
pub type Coord2 = (Coord, Coord);

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

pub(crate) const fn mult(a: Coord, b: Coord) -> CellCount {
    a as CellCount * b as CellCount
}

pub(crate) const fn to_index((x, y): Coord2) -> [usize; 2] {
    [x as usize, y as usize]
}

const DISPLACEMENTS: [(i16, i16); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i16, i16), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Iterator over the up-to-8 in-bounds neighbors of a coordinate.
pub fn neighbors(center: Coord2, bounds: Coord2) -> NeighborIter {
    NeighborIter {
        center,
        bounds,
        index: 0,
    }
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let found: Vec<_> = neighbors((1, 1), (3, 3)).collect();
        assert_eq!(found.len(), 8);
        assert!(!found.contains(&(1, 1)));
    }

    #[test]
    fn corner_cell_has_three_neighbors() {
        let mut found: Vec<_> = neighbors((0, 0), (3, 3)).collect();
        found.sort_unstable();
        assert_eq!(found, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(neighbors((0, 0), (1, 1)).count(), 0);
    }
}
