use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid size and positions.
pub type Coord = u8;

/// Count type used for total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`. `x` grows to the right, `y` grows downward.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Largest per-axis offset between two consecutive letters of a chained placement.
pub const REACH: Coord = 2;

const REACH_SPAN: u8 = 2 * REACH + 1;
const REACH_CENTER: u8 = REACH_SPAN * REACH_SPAN / 2;

/// Cardinal direction of a move between two cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Dominant cardinal direction of the move `from -> to`.
    ///
    /// Any horizontal difference wins over a vertical one, so a diagonal move counts as
    /// `Left` or `Right`. Identical coordinates resolve to `Up`.
    pub const fn between(from: Coord2, to: Coord2) -> Self {
        if to.0 != from.0 {
            if to.0 > from.0 { Self::Right } else { Self::Left }
        } else if to.1 > from.1 {
            Self::Down
        } else {
            Self::Up
        }
    }

    pub const fn as_flag(self) -> Directions {
        match self {
            Self::Up => Directions::UP,
            Self::Down => Directions::DOWN,
            Self::Left => Directions::LEFT,
            Self::Right => Directions::RIGHT,
        }
    }
}

bitflags! {
    /// Set of directions a cell refuses to be entered from or left towards.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Directions: u8 {
        const UP    = 1;
        const DOWN  = 1 << 1;
        const LEFT  = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl Directions {
    pub const fn blocks(self, direction: Direction) -> bool {
        self.contains(direction.as_flag())
    }

    pub const fn count(self) -> u32 {
        self.bits().count_ones()
    }
}

impl From<Direction> for Directions {
    fn from(direction: Direction) -> Self {
        direction.as_flag()
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
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

/// Iterates every in-bounds coordinate within [`REACH`] of a center on both axes,
/// excluding the center itself. Offsets are visited column by column (`dx` outer).
#[derive(Debug)]
pub struct ReachIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl ReachIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for ReachIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let reach = REACH as i8;
        loop {
            if self.index >= REACH_SPAN * REACH_SPAN {
                return None;
            }

            let index = self.index;
            self.index += 1;
            if index == REACH_CENTER {
                continue;
            }

            let dx = (index / REACH_SPAN) as i8 - reach;
            let dy = (index % REACH_SPAN) as i8 - reach;
            if let Some(next_item) = apply_delta(self.center, (dx, dy), self.bounds) {
                return Some(next_item);
            }
        }
    }
}

/// Whether `a` and `b` are within [`REACH`] of each other on both axes.
pub const fn within_reach(a: Coord2, b: Coord2) -> bool {
    a.0.abs_diff(b.0) <= REACH && a.1.abs_diff(b.1) <= REACH
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn reach_iter_covers_full_window_in_open_space() {
        let around: Vec<_> = ReachIter::new((5, 5), (10, 10)).collect();

        assert_eq!(around.len(), 24);
        assert!(!around.contains(&(5, 5)));
        assert!(around.contains(&(3, 3)));
        assert!(around.contains(&(7, 7)));
        assert!(around.iter().all(|&pos| within_reach((5, 5), pos)));
    }

    #[test]
    fn reach_iter_clips_at_corner() {
        let around: Vec<_> = ReachIter::new((0, 0), (3, 3)).collect();

        assert_eq!(around.len(), 8);
        assert_eq!(around.first(), Some(&(0, 1)));
        assert_eq!(around.last(), Some(&(2, 2)));
    }

    #[test]
    fn dominant_direction_prefers_horizontal() {
        assert_eq!(Direction::between((1, 1), (2, 0)), Direction::Right);
        assert_eq!(Direction::between((2, 2), (0, 4)), Direction::Left);
        assert_eq!(Direction::between((2, 2), (2, 4)), Direction::Down);
        assert_eq!(Direction::between((2, 2), (2, 0)), Direction::Up);
    }

    #[test]
    fn direction_set_tracks_members() {
        let set = Directions::UP | Directions::from(Direction::Right);

        assert!(set.blocks(Direction::Up));
        assert!(set.blocks(Direction::Right));
        assert!(!set.blocks(Direction::Left));
        assert_eq!(set.count(), 2);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
    }
}
