use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Accepting taps.
    #[default]
    Active,
    /// The word was spelled, waiting for the transition to the next word.
    Completed,
    /// The level countdown ran out.
    TimedOut,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::TimedOut)
    }
}

/// Turns taps into a path over the grid and checks it against the target word.
///
/// Owns the grid for one word attempt. Every tap goes through [`SelectionEngine::tap`],
/// which applies one transition and reports it as a [`TapOutcome`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionEngine {
    grid: Grid,
    target: String,
    path: Vec<Coord2>,
    state: EngineState,
    gated: bool,
}

impl SelectionEngine {
    pub fn new(grid: Grid, target: impl Into<String>) -> Self {
        let mut target = target.into();
        target.make_ascii_uppercase();
        Self {
            grid,
            target,
            path: Vec::new(),
            state: EngineState::default(),
            gated: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn path(&self) -> &[Coord2] {
        &self.path
    }

    /// Letters currently spelled by the path.
    pub fn current_letters(&self) -> String {
        self.grid.letters_at(&self.path)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_input_locked(&self) -> bool {
        self.gated || self.state.is_finished()
    }

    /// Holds taps back regardless of state, e.g. while a tutorial is on screen.
    pub fn lock_input(&mut self) {
        self.gated = true;
    }

    pub fn unlock_input(&mut self) {
        self.gated = false;
    }

    /// Locks the engine for good after the level timer ran out. Returns `false` when the
    /// word was already completed or timed out.
    pub fn expire(&mut self) -> bool {
        if self.state.is_finished() {
            return false;
        }
        self.reset_selection();
        self.state = EngineState::TimedOut;
        true
    }

    pub fn tap(&mut self, coords: Coord2) -> Result<TapOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.is_input_locked() {
            log::trace!("Tap at {:?} ignored, input locked", coords);
            return Ok(TapOutcome::InputLocked);
        }

        if self.path.last() == Some(&coords) {
            return Ok(TapOutcome::NoChange);
        }

        // a masked cell spends the tap on unmasking
        let cell = &mut self.grid[coords];
        if cell.is_hazardous() && !cell.is_hazard_revealed() {
            cell.reveal_hazard();
            log::trace!("Hazard unmasked at {:?}", coords);
            return Ok(TapOutcome::Unmasked(Unmask::Hazard));
        }
        if cell.is_hidden() && !cell.is_revealed() {
            cell.reveal_hidden();
            log::trace!("Hidden cell unmasked at {:?}", coords);
            return Ok(TapOutcome::Unmasked(Unmask::Hidden));
        }

        if cell.is_locked() {
            log::trace!("Locked cell at {:?}, selection reset", coords);
            self.reset_selection();
            return Ok(TapOutcome::Reset(ResetCause::Locked));
        }

        if self.path.contains(&coords) {
            return Ok(TapOutcome::NoChange);
        }

        if let Some(&tail) = self.path.last() {
            let direction = Direction::between(tail, coords);
            if self.grid[tail].blocked().blocks(direction)
                || self.grid[coords].blocked().blocks(direction.opposite())
            {
                log::trace!(
                    "Move {:?} from {:?} to {:?} is blocked",
                    direction,
                    tail,
                    coords
                );
                self.reset_selection();
                return Ok(TapOutcome::Reset(ResetCause::BlockedDirection(direction)));
            }
        }

        self.path.push(coords);
        self.grid[coords].set_selected(true);

        // hazards stay unsafe after being unmasked
        if self.grid[coords].is_hazardous() {
            log::trace!("Hazard selected at {:?}, selection reset", coords);
            self.reset_selection();
            return Ok(TapOutcome::Reset(ResetCause::Hazard));
        }

        let current = self.current_letters();
        if !self.target.starts_with(current.as_str()) {
            log::trace!("{:?} is not a prefix of {:?}", current, self.target);
            let stale_path = core::mem::take(&mut self.path);
            for &pos in &stale_path {
                self.grid[pos].set_selected(false);
            }
            return Ok(TapOutcome::Rejected { stale_path });
        }

        if current == self.target {
            log::debug!("Word {:?} completed", self.target);
            self.state = EngineState::Completed;
            Ok(TapOutcome::Completed)
        } else {
            Ok(TapOutcome::Partial)
        }
    }

    /// Empties the path and clears every selection mark.
    pub fn reset_selection(&mut self) {
        for &coords in &self.path {
            self.grid[coords].set_selected(false);
        }
        self.path.clear();
    }

    /// Leaves the completed state so the next word can be loaded.
    pub(crate) fn finish_transition(&mut self) -> Result<()> {
        if self.state != EngineState::Completed {
            return Err(GameError::NoTransitionPending);
        }
        self.reset_selection();
        self.state = EngineState::Active;
        Ok(())
    }
}
