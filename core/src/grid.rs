use alloc::string::String;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// How the target coordinates of a grid were chosen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Consecutive letters are within [`REACH`] of each other.
    Chained,
    /// Fallback used when no chained path was found: distinct but unconstrained cells.
    Scattered,
    /// Hand-built layout.
    Fixed,
}

/// Obstacle kinds, used to look up an example cell (e.g. for a tutorial callout).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Locked,
    Hidden,
    Hazard,
    DirectionBlock,
}

impl ObstacleKind {
    pub const ALL: [Self; 4] = [
        Self::Locked,
        Self::Hidden,
        Self::Hazard,
        Self::DirectionBlock,
    ];
}

/// Square letter grid for a single word attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    target_coords: Vec<Coord2>,
    placement: Placement,
}

impl Grid {
    pub(crate) fn filled(size: Coord, mut letter_at: impl FnMut(Coord2) -> char) -> Self {
        let cells = Array2::from_shape_fn((size.into(), size.into()), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            Cell::new(coords, letter_at(coords), false, Obstacles::NONE)
        });
        Self {
            cells,
            target_coords: Vec::new(),
            placement: Placement::Fixed,
        }
    }

    /// Builds a grid from rows of letters (`rows[y]`, one char per column) and the
    /// coordinates that carry the target word, in word order.
    pub fn from_rows(rows: &[&str], target_coords: &[Coord2]) -> Result<Self> {
        let size = rows.len();
        if size == 0 || size > usize::from(MAX_GRID_SIZE) {
            return Err(GameError::InvalidCoords);
        }

        let letters: Vec<Vec<char>> = rows.iter().map(|row| row.chars().collect()).collect();
        let well_formed = letters
            .iter()
            .all(|row| row.len() == size && row.iter().all(char::is_ascii_alphabetic));
        if !well_formed {
            return Err(GameError::InvalidWord);
        }

        let mut grid = Self::filled(size as Coord, |(x, y)| {
            letters[usize::from(y)][usize::from(x)]
        });
        grid.mark_targets(target_coords, Placement::Fixed)?;
        Ok(grid)
    }

    /// Attaches obstacle features to one cell of a hand-built grid.
    pub fn with_obstacles(mut self, coords: Coord2, obstacles: Obstacles) -> Result<Self> {
        let coords = self.validate_coords(coords)?;
        self[coords].apply_obstacles(obstacles);
        Ok(self)
    }

    pub(crate) fn mark_targets(
        &mut self,
        target_coords: &[Coord2],
        placement: Placement,
    ) -> Result<()> {
        for (i, &coords) in target_coords.iter().enumerate() {
            self.validate_coords(coords)?;
            if target_coords[..i].contains(&coords) {
                return Err(GameError::InvalidCoords);
            }
        }

        for cell in self.cells.iter_mut() {
            cell.set_target(false);
        }
        for &coords in target_coords {
            self[coords].set_target(true);
        }
        self.target_coords = target_coords.to_vec();
        self.placement = placement;
        Ok(())
    }

    pub fn size(&self) -> Coord {
        self.cells.dim().0 as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.validate_coords(coords).ok().map(|coords| &self[coords])
    }

    /// Coordinates that received the target word at generation, in word order.
    ///
    /// Swaps move letters, not membership, so these may no longer spell the word.
    pub fn target_coords(&self) -> &[Coord2] {
        &self.target_coords
    }

    pub fn is_target_coord(&self, coords: Coord2) -> bool {
        self.target_coords.contains(&coords)
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Cells in row-major order (`y` outer, `x` inner), the order they are drawn in.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = &Cell>> {
        let size = self.size();
        (0..size).map(move |y| (0..size).map(move |x| &self[(x, y)]))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Letters found at `path`, in order.
    pub fn letters_at(&self, path: &[Coord2]) -> String {
        path.iter().map(|&coords| self[coords].letter()).collect()
    }

    /// First cell (row-major) carrying the given obstacle.
    pub fn first_with(&self, kind: ObstacleKind) -> Option<Coord2> {
        self.rows().flatten().find_map(|cell| {
            let has = match kind {
                ObstacleKind::Locked => cell.is_locked(),
                ObstacleKind::Hidden => cell.is_hidden(),
                ObstacleKind::Hazard => cell.is_hazardous(),
                ObstacleKind::DirectionBlock => !cell.blocked().is_empty(),
            };
            has.then(|| cell.coords())
        })
    }

    /// Exchanges the letters of two cells. Everything else stays in place.
    pub(crate) fn swap_letters(&mut self, a: Coord2, b: Coord2) {
        let letter_a = self[a].letter();
        let letter_b = self[b].letter();
        self[a].set_letter(letter_b);
        self[b].set_letter(letter_a);
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_indexes_by_column_then_row() {
        let grid = Grid::from_rows(&["ABC", "DEF", "GHI"], &[(2, 0), (1, 1)]).unwrap();

        assert_eq!(grid.size(), 3);
        assert_eq!(grid[(2, 0)].letter(), 'C');
        assert_eq!(grid[(0, 2)].letter(), 'G');
        assert_eq!(grid.letters_at(grid.target_coords()), "CE");
        assert!(grid[(1, 1)].is_target());
        assert!(!grid[(0, 0)].is_target());
        assert_eq!(grid.placement(), Placement::Fixed);
    }

    #[test]
    fn from_rows_rejects_ragged_or_duplicate_input() {
        assert_eq!(
            Grid::from_rows(&["AB", "C"], &[]),
            Err(GameError::InvalidWord)
        );
        assert_eq!(
            Grid::from_rows(&["AB", "CD"], &[(0, 0), (0, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            Grid::from_rows(&["AB", "CD"], &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn swap_moves_letters_but_not_membership() {
        let mut grid = Grid::from_rows(&["DX", "YZ"], &[(0, 0)]).unwrap();

        grid.swap_letters((0, 0), (1, 1));

        assert_eq!(grid[(0, 0)].letter(), 'Z');
        assert_eq!(grid[(1, 1)].letter(), 'D');
        assert!(grid[(0, 0)].is_target());
        assert!(!grid[(1, 1)].is_target());
        assert_eq!(grid.target_coords(), &[(0, 0)]);
    }

    #[test]
    fn first_with_finds_obstacle_in_row_major_order() {
        let grid = Grid::from_rows(&["ABC", "DEF", "GHI"], &[])
            .unwrap()
            .with_obstacles((2, 1), Obstacles::locked())
            .unwrap()
            .with_obstacles((0, 2), Obstacles::locked())
            .unwrap();

        assert_eq!(grid.first_with(ObstacleKind::Locked), Some((2, 1)));
        assert_eq!(grid.first_with(ObstacleKind::Hazard), None);
    }
}
