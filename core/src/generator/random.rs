use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashSet;
use rand::prelude::*;
use smallvec::SmallVec;

use super::*;

/// Generation strategy that chains the target word through nearby cells and rolls every
/// other cell's obstacles independently. Fully determined by its seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomGridGenerator {
    seed: u64,
    max_attempts: u32,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: &LevelConfig, word: &str) -> Result<GeneratedGrid> {
        let size = config.size.clamp(1, MAX_GRID_SIZE);
        let letters: Vec<char> = word.chars().map(|c| c.to_ascii_uppercase()).collect();
        if letters.is_empty() || !letters.iter().all(char::is_ascii_alphabetic) {
            return Err(GameError::InvalidWord);
        }
        let cells = mult(size, size);
        if letters.len() > usize::from(cells) {
            return Err(GameError::WordTooLong {
                len: letters.len(),
                cells,
            });
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut grid = Grid::filled(size, |_| random_letter(&mut rng));

        let (path, placement) = match chain_path(&mut rng, size, letters.len(), self.max_attempts)
        {
            Some(path) => (path, Placement::Chained),
            None => {
                log::warn!(
                    "Could not chain {:?} through a {}x{} grid in {} attempts, scattering it",
                    word,
                    size,
                    size,
                    self.max_attempts
                );
                (scatter_path(&mut rng, size, letters.len()), Placement::Scattered)
            }
        };

        for (&coords, &letter) in path.iter().zip(&letters) {
            grid[coords].set_letter(letter);
        }
        grid.mark_targets(&path, placement)?;

        roll_obstacles(&mut rng, &mut grid, &config.features);

        let hint = path[rng.random_range(0..path.len())];
        log::debug!(
            "Generated {}x{} grid for {:?}, placement {:?} at {:?}",
            size,
            size,
            word,
            placement,
            path
        );
        Ok(GeneratedGrid { grid, hint })
    }
}

fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(ALPHABET[rng.random_range(0..ALPHABET.len())])
}

/// Tries to walk `len` distinct cells where each step stays within [`REACH`] of the last.
fn chain_path<R: Rng + ?Sized>(
    rng: &mut R,
    size: Coord,
    len: usize,
    max_attempts: u32,
) -> Option<Vec<Coord2>> {
    let bounds = (size, size);

    for attempt in 1..=max_attempts {
        let start = (rng.random_range(0..size), rng.random_range(0..size));
        let mut path = vec![start];
        let mut used: HashSet<Coord2> = HashSet::from_iter([start]);

        while path.len() < len {
            let tail = path[path.len() - 1];
            let candidates: SmallVec<[Coord2; 24]> = ReachIter::new(tail, bounds)
                .filter(|pos| !used.contains(pos))
                .collect();
            let Some(&next) = candidates.choose(rng) else {
                log::trace!(
                    "Placement attempt {} stuck at {:?} after {} letters",
                    attempt,
                    tail,
                    path.len()
                );
                break;
            };
            used.insert(next);
            path.push(next);
        }

        if path.len() == len {
            log::trace!("Chained placement found on attempt {}", attempt);
            return Some(path);
        }
    }

    None
}

/// Picks `len` distinct cells uniformly, with no adjacency constraint.
fn scatter_path<R: Rng + ?Sized>(rng: &mut R, size: Coord, len: usize) -> Vec<Coord2> {
    let side = usize::from(size);
    rand::seq::index::sample(rng, side * side, len)
        .into_iter()
        .map(|index| ((index % side) as Coord, (index / side) as Coord))
        .collect()
}

fn roll_obstacles<R: Rng + ?Sized>(rng: &mut R, grid: &mut Grid, features: &Features) {
    for cell in grid.iter_mut().filter(|cell| !cell.is_target()) {
        // independent trials, a cell may end up with any combination
        let mut obstacles = Obstacles {
            locked: features.locked.roll(rng),
            hidden: features.hidden.roll(rng),
            hazardous: features.hazard.roll(rng),
            blocked: Directions::empty(),
        };
        if features.direction_block.roll(rng) {
            obstacles.blocked = random_directions(rng);
        }

        if !obstacles.is_empty() {
            log::trace!("Obstacles at {:?}: {:?}", cell.coords(), obstacles);
            cell.apply_obstacles(obstacles);
        }
    }
}

/// One to three distinct directions, drawn without replacement.
fn random_directions<R: Rng + ?Sized>(rng: &mut R) -> Directions {
    let count = rng.random_range(1..=3);
    Direction::ALL
        .choose_multiple(rng, count)
        .fold(Directions::empty(), |set, &direction| set | direction.as_flag())
}
