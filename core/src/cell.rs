use serde::{Deserialize, Serialize};

use crate::*;

/// Obstacle features rolled for a cell when its grid is built.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacles {
    pub locked: bool,
    pub hidden: bool,
    pub hazardous: bool,
    pub blocked: Directions,
}

impl Obstacles {
    pub const NONE: Self = Self {
        locked: false,
        hidden: false,
        hazardous: false,
        blocked: Directions::empty(),
    };

    pub const fn locked() -> Self {
        Self {
            locked: true,
            ..Self::NONE
        }
    }

    pub const fn hidden() -> Self {
        Self {
            hidden: true,
            ..Self::NONE
        }
    }

    pub const fn hazardous() -> Self {
        Self {
            hazardous: true,
            ..Self::NONE
        }
    }

    pub const fn blocked(blocked: Directions) -> Self {
        Self {
            blocked,
            ..Self::NONE
        }
    }

    pub const fn is_empty(&self) -> bool {
        !self.locked && !self.hidden && !self.hazardous && self.blocked.is_empty()
    }
}

/// What a presentation layer is allowed to show for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellFace {
    /// Hazard that has not been tapped yet, its letter stays masked.
    Hazard,
    /// Hazard that was already unmasked by a tap.
    HazardLetter(char),
    Locked,
    /// Hidden cell that has not been tapped yet.
    Masked,
    Letter(char),
}

/// A single slot of the letter grid.
///
/// Coordinates, obstacle flags and target membership are fixed when the grid is built.
/// Only the letter (placement and swaps), the two reveal latches and the transient
/// selection mark change afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    coords: Coord2,
    letter: char,
    target: bool,
    locked: bool,
    hidden: bool,
    revealed: bool,
    hazardous: bool,
    hazard_revealed: bool,
    blocked: Directions,
    selected: bool,
}

impl Cell {
    pub fn new(coords: Coord2, letter: char, target: bool, obstacles: Obstacles) -> Self {
        Self {
            coords,
            letter: letter.to_ascii_uppercase(),
            target,
            locked: obstacles.locked,
            hidden: obstacles.hidden,
            revealed: !obstacles.hidden,
            hazardous: obstacles.hazardous,
            hazard_revealed: false,
            blocked: obstacles.blocked,
            selected: false,
        }
    }

    pub fn coords(&self) -> Coord2 {
        self.coords
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn is_target(&self) -> bool {
        self.target
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_hazardous(&self) -> bool {
        self.hazardous
    }

    pub fn is_hazard_revealed(&self) -> bool {
        self.hazard_revealed
    }

    pub fn blocked(&self) -> Directions {
        self.blocked
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn obstacles(&self) -> Obstacles {
        Obstacles {
            locked: self.locked,
            hidden: self.hidden,
            hazardous: self.hazardous,
            blocked: self.blocked,
        }
    }

    pub fn face(&self) -> CellFace {
        if self.hazardous {
            if self.hazard_revealed {
                CellFace::HazardLetter(self.letter)
            } else {
                CellFace::Hazard
            }
        } else if self.locked {
            CellFace::Locked
        } else if self.hidden && !self.revealed {
            CellFace::Masked
        } else {
            CellFace::Letter(self.letter)
        }
    }

    pub(crate) fn set_letter(&mut self, letter: char) {
        self.letter = letter;
    }

    pub(crate) fn set_target(&mut self, target: bool) {
        self.target = target;
    }

    pub(crate) fn apply_obstacles(&mut self, obstacles: Obstacles) {
        self.locked = obstacles.locked;
        self.hidden = obstacles.hidden;
        self.revealed = !obstacles.hidden;
        self.hazardous = obstacles.hazardous;
        self.blocked = obstacles.blocked;
    }

    /// Unmasks a hazard; returns whether this call changed anything.
    pub(crate) fn reveal_hazard(&mut self) -> bool {
        let changed = self.hazardous && !self.hazard_revealed;
        self.hazard_revealed |= self.hazardous;
        changed
    }

    /// Unmasks a hidden cell; returns whether this call changed anything.
    pub(crate) fn reveal_hidden(&mut self) -> bool {
        let changed = !self.revealed;
        self.revealed = true;
        changed
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_cells_start_unrevealed() {
        let plain = Cell::new((0, 0), 'a', false, Obstacles::NONE);
        let hidden = Cell::new((1, 0), 'B', false, Obstacles::hidden());

        assert_eq!(plain.letter(), 'A');
        assert!(plain.is_revealed());
        assert!(!hidden.is_revealed());
        assert_eq!(hidden.face(), CellFace::Masked);
    }

    #[test]
    fn face_prefers_hazard_over_other_masks() {
        let mut cell = Cell::new(
            (0, 0),
            'Q',
            false,
            Obstacles {
                locked: true,
                hidden: true,
                hazardous: true,
                blocked: Directions::UP,
            },
        );

        assert_eq!(cell.face(), CellFace::Hazard);
        assert!(cell.reveal_hazard());
        assert!(!cell.reveal_hazard());
        assert_eq!(cell.face(), CellFace::HazardLetter('Q'));
        assert!(cell.is_hazardous());
    }

    #[test]
    fn locked_face_hides_letter() {
        let cell = Cell::new((2, 3), 'Z', false, Obstacles::locked());

        assert_eq!(cell.face(), CellFace::Locked);
        assert_eq!(cell.coords(), (2, 3));
    }
}
