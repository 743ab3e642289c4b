use crate::*;
pub use random::*;

mod random;

/// Number of chained placements tried before falling back to scattered cells.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Letters used to fill the grid around the target word.
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub trait GridGenerator {
    fn generate(self, config: &LevelConfig, word: &str) -> Result<GeneratedGrid>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedGrid {
    pub grid: Grid,
    /// One target cell to flash briefly as a starting hint.
    pub hint: Coord2,
}
