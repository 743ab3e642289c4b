use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Position of the player in a [`Campaign`]. This is what gets persisted between runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub level: usize,
    pub word: usize,
}

/// Ordered level catalog plus a cursor into it. Never empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Campaign {
    levels: Vec<LevelConfig>,
    progress: Progress,
}

/// Catalog as written on disk, before validation.
#[derive(Deserialize)]
struct Catalog {
    levels: Vec<LevelConfig>,
    #[serde(default)]
    progress: Progress,
}

impl Campaign {
    /// Validates every level and starts at the first word of the first level.
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self> {
        if levels.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        let levels = levels
            .into_iter()
            .map(LevelConfig::validated)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            levels,
            progress: Progress::default(),
        })
    }

    /// Parses a catalog of the form `{"levels": [...], "progress": {...}}`, the format
    /// [`Campaign`] serializes to. The progress is optional and clamped into the catalog.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        let mut campaign = Self::new(catalog.levels)?;
        campaign.restore(catalog.progress);
        log::debug!("Loaded campaign with {} levels", campaign.levels.len());
        Ok(campaign)
    }

    pub fn levels(&self) -> &[LevelConfig] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Result<&LevelConfig> {
        self.levels.get(index).ok_or(GameError::InvalidLevel(index))
    }

    pub fn current(&self) -> &LevelConfig {
        &self.levels[self.progress.level]
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Jumps to an exact level and word, rejecting anything out of range.
    pub fn select(&mut self, level: usize, word: usize) -> Result<&LevelConfig> {
        let config = self.level(level)?;
        if word >= config.word_count() {
            return Err(GameError::InvalidWordIndex(word));
        }
        self.progress = Progress { level, word };
        Ok(&self.levels[level])
    }

    /// Applies saved progress, clamping both indices into the catalog.
    pub fn restore(&mut self, saved: Progress) -> Progress {
        let level = saved.level.min(self.levels.len() - 1);
        let word = saved.word.min(self.levels[level].word_count() - 1);
        if (level, word) != (saved.level, saved.word) {
            log::warn!(
                "Saved progress {:?} out of range, clamped to level {} word {}",
                saved,
                level,
                word
            );
        }
        self.progress = Progress { level, word };
        self.progress
    }

    /// Records that the session moved to another word of the current level.
    pub fn set_word(&mut self, word: usize) -> Result<()> {
        if word >= self.current().word_count() {
            return Err(GameError::InvalidWordIndex(word));
        }
        self.progress.word = word;
        Ok(())
    }

    /// Moves to the first word of the following level. `None` once every level is done,
    /// in which case the cursor stays on the last level.
    pub fn next_level(&mut self) -> Option<&LevelConfig> {
        let next = self.progress.level + 1;
        if next >= self.levels.len() {
            log::debug!("All {} levels completed", self.levels.len());
            return None;
        }
        self.progress = Progress {
            level: next,
            word: 0,
        };
        Some(&self.levels[next])
    }
}
