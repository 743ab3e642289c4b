#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use campaign::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use presenter::*;
pub use selection::*;
pub use session::*;
pub use swap::*;
pub use timer::*;
pub use types::*;

mod campaign;
mod cell;
mod error;
mod generator;
mod grid;
mod presenter;
mod selection;
mod session;
mod swap;
mod timer;
mod types;

/// Largest supported grid side.
pub const MAX_GRID_SIZE: Coord = 16;

/// An optional level feature and the chance it applies to each eligible roll.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub enabled: bool,
    pub probability: f64,
}

impl Feature {
    pub const fn on(probability: f64) -> Self {
        Self {
            enabled: true,
            probability,
        }
    }

    pub const fn off(probability: f64) -> Self {
        Self {
            enabled: false,
            probability,
        }
    }

    fn normalized(self) -> Self {
        let probability = if self.probability.is_nan() {
            0.0
        } else {
            self.probability.clamp(0.0, 1.0)
        };
        Self {
            enabled: self.enabled,
            probability,
        }
    }

    /// Bernoulli trial at the configured probability, always `false` while disabled.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        self.enabled && rng.random_bool(self.normalized().probability)
    }
}

/// Per-level feature toggles.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    /// Whether the swap timer is armed for a word, rolled once per word load.
    pub swap: Feature,
    pub locked: Feature,
    pub hidden: Feature,
    pub hazard: Feature,
    pub direction_block: Feature,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            swap: Feature::off(1.0),
            locked: Feature::off(0.1),
            hidden: Feature::off(0.15),
            hazard: Feature::off(0.1),
            direction_block: Feature::off(0.07),
        }
    }
}

impl Features {
    fn normalized(self) -> Self {
        Self {
            swap: self.swap.normalized(),
            locked: self.locked.normalized(),
            hidden: self.hidden.normalized(),
            hazard: self.hazard.normalized(),
            direction_block: self.direction_block.normalized(),
        }
    }
}

/// Everything the core needs to know about a level. Read-only to the core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub name: String,
    pub size: Coord,
    /// Countdown length in seconds, `None` for an untimed level.
    pub timer_secs: Option<f32>,
    pub features: Features,
    pub words: Vec<String>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            size: 6,
            timer_secs: None,
            features: Features::default(),
            words: Vec::new(),
        }
    }
}

impl LevelConfig {
    pub fn new<W: Into<String>>(size: Coord, words: impl IntoIterator<Item = W>) -> Self {
        Self {
            size,
            words: words.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_timer(mut self, secs: f32) -> Self {
        self.timer_secs = Some(secs);
        self
    }

    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// Normalizes the config and checks the preconditions the core relies on.
    ///
    /// The size is clamped into `1..=MAX_GRID_SIZE`, probabilities into `[0, 1]` and words
    /// are upper-cased. A level must have at least one word, and every word must be made of
    /// ASCII letters and fit in the grid.
    pub fn validated(mut self) -> Result<Self> {
        let size = self.size.clamp(1, MAX_GRID_SIZE);
        if size != self.size {
            log::warn!(
                "Grid size {} out of range, clamped to {}",
                self.size,
                size
            );
            self.size = size;
        }

        self.features = self.features.normalized();

        if let Some(secs) = self.timer_secs {
            if !secs.is_finite() || secs <= 0.0 {
                log::warn!("Ignoring invalid timer of {} seconds", secs);
                self.timer_secs = None;
            }
        }

        if self.words.is_empty() {
            return Err(GameError::EmptyLevel);
        }

        let cells = mult(self.size, self.size);
        for word in self.words.iter_mut() {
            if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(GameError::InvalidWord);
            }
            if word.len() > usize::from(cells) {
                return Err(GameError::WordTooLong {
                    len: word.len(),
                    cells,
                });
            }
            word.make_ascii_uppercase();
        }

        Ok(self)
    }

    pub fn word(&self, index: usize) -> Result<&str> {
        self.words
            .get(index)
            .map(String::as_str)
            .ok_or(GameError::InvalidWordIndex(index))
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn timer(&self) -> Option<Duration> {
        self.timer_secs
            .and_then(|secs| Duration::try_from_secs_f32(secs).ok())
            .filter(|duration| !duration.is_zero())
    }
}

/// What a first tap on a masked cell uncovered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unmask {
    Hazard,
    Hidden,
}

/// Why a tap threw the current path away.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetCause {
    Locked,
    /// The move between the path tail and the tapped cell crosses a blocked edge.
    BlockedDirection(Direction),
    Hazard,
}

/// Result of feeding one tap to the [`SelectionEngine`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapOutcome {
    /// Input is locked, nothing was looked at.
    InputLocked,
    NoChange,
    Unmasked(Unmask),
    Reset(ResetCause),
    /// The letters no longer formed a prefix of the target word. Carries the discarded path.
    Rejected { stale_path: Vec<Coord2> },
    /// The path is a strict prefix of the target word.
    Partial,
    Completed,
}

impl TapOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::InputLocked | Self::NoChange)
    }

    /// Whether the path is empty after this outcome
    pub const fn clears_path(&self) -> bool {
        matches!(self, Self::Reset(_) | Self::Rejected { .. })
    }
}
