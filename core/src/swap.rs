use core::time::Duration;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

pub const SWAP_FIRST_DELAY: Duration = Duration::from_secs(3);
pub const SWAP_INTERVAL: Duration = Duration::from_secs(6);

/// Letters of two cells were exchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    pub a: Coord2,
    pub b: Coord2,
    /// Either cell was one of the grid's target coordinates, so the selection was dropped.
    pub touched_target: bool,
}

/// Periodically exchanges the letters of two random cells of the live grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPerturber {
    timer: RepeatingTimer,
}

impl SwapPerturber {
    pub fn new(first_delay: Duration, interval: Duration) -> Self {
        Self {
            timer: RepeatingTimer::new(first_delay, interval),
        }
    }

    /// Rolls the level's swap feature once; swaps only run for this word when it succeeds.
    pub fn arm<R: Rng + ?Sized>(
        feature: &Feature,
        rng: &mut R,
        first_delay: Duration,
        interval: Duration,
    ) -> Option<Self> {
        if feature.roll(rng) {
            log::debug!(
                "Swaps armed, first in {:?} then every {:?}",
                first_delay,
                interval
            );
            Some(Self::new(first_delay, interval))
        } else {
            None
        }
    }

    pub fn until_next(&self) -> Duration {
        self.timer.until_next()
    }

    /// Advances the schedule, returning how many swaps are due.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.timer.advance(dt)
    }

    /// Swaps two distinct cells picked uniformly from the whole grid. Obstacles and
    /// target membership do not matter. A grid with a single cell never swaps.
    pub fn perturb<R: Rng + ?Sized>(rng: &mut R, engine: &mut SelectionEngine) -> Option<Swap> {
        let size = usize::from(engine.grid().size());
        let total = usize::from(engine.grid().total_cells());
        if total < 2 {
            return None;
        }

        let first = rng.random_range(0..total);
        let second = (first + rng.random_range(1..total)) % total;
        let to_coords = |index: usize| ((index % size) as Coord, (index / size) as Coord);

        Self::swap_cells(engine, to_coords(first), to_coords(second)).ok()
    }

    /// Exchanges the letters at `a` and `b` and drops the selection if a target
    /// coordinate was involved.
    pub fn swap_cells(engine: &mut SelectionEngine, a: Coord2, b: Coord2) -> Result<Swap> {
        let a = engine.grid().validate_coords(a)?;
        let b = engine.grid().validate_coords(b)?;

        engine.grid_mut().swap_letters(a, b);
        let touched_target = engine.grid().is_target_coord(a) || engine.grid().is_target_coord(b);
        if touched_target {
            engine.reset_selection();
        }

        log::debug!(
            "Swapped letters of {:?} and {:?} (target touched: {})",
            a,
            b,
            touched_target
        );
        Ok(Swap {
            a,
            b,
            touched_target,
        })
    }
}
