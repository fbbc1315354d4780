use ndarray::Array2;
use rand::prelude::*;

use crate::{Coord2, GameConfig, to_index};

/// Mine-placement strategy, injected into the board so tests can substitute a
/// deterministic source for the production RNG.
///
/// Implementations must never place a mine on `safe` and should place exactly
/// `config.mines` mines; the config has already clamped the count so that at
/// least one cell stays free.
pub trait MinePlacer {
    fn place(&mut self, config: GameConfig, safe: Coord2) -> Array2<bool>;
}

/// Uniform random placement without replacement over all coordinates minus the
/// safe cell.
#[derive(Clone, Debug)]
pub struct RandomMinePlacer {
    rng: SmallRng,
}

impl RandomMinePlacer {
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place(&mut self, config: GameConfig, safe: Coord2) -> Array2<bool> {
        let mut mines: Array2<bool> = Array2::default((
            config.width as usize,
            config.height as usize,
        ));

        // Reserve the safe cell so the sampler below cannot pick it.
        mines[to_index(safe)] = true;
        let mut free_cells = config.total_cells() - 1;
        let mut mines_placed = 0;

        {
            let cells = mines.as_slice_mut().expect("layout should be standard");
            while mines_placed < config.mines && free_cells > 0 {
                // Pick the nth free cell; occupied cells shift the target right.
                let mut target = self.rng.random_range(0..free_cells) as usize;
                for (i, cell) in cells.iter_mut().enumerate() {
                    if *cell {
                        target += 1;
                    }
                    if i == target {
                        *cell = true;
                        mines_placed += 1;
                        free_cells -= 1;
                        break;
                    }
                }
            }
        }

        mines[to_index(safe)] = false;

        let count = mines.iter().filter(|&&cell| cell).count();
        if count != config.mines as usize {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                count,
                config.mines
            );
        }
        mines
    }
}

/// Places mines at an explicit coordinate list. Out-of-bounds coordinates and
/// the safe coordinate are skipped. Intended for tests and scripted boards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMinePlacer {
    mines: Vec<Coord2>,
}

impl FixedMinePlacer {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MinePlacer for FixedMinePlacer {
    fn place(&mut self, config: GameConfig, safe: Coord2) -> Array2<bool> {
        let mut mines: Array2<bool> = Array2::default((
            config.width as usize,
            config.height as usize,
        ));

        for &coords in &self.mines {
            if coords == safe || coords.0 >= config.width || coords.1 >= config.height {
                log::warn!("Skipping fixed mine at unusable position {:?}", coords);
                continue;
            }
            mines[to_index(coords)] = true;
        }

        mines
    }
}
