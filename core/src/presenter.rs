use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Color state of the line drawn through the selected cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathColor {
    InProgress,
    Complete,
    Rejected,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sound {
    CellClick,
    Success,
    Defeat,
    TimerTick,
}

/// Outbound notifications from the core to whatever draws and plays the game.
///
/// Every method is a fire-and-forget notification with a no-op default, so a front end
/// only implements what it renders. The core never waits on any of them.
pub trait Presenter {
    /// A new grid replaced the previous one.
    fn on_grid_ready(&mut self, _grid: &Grid) {}

    fn draw_path(&mut self, _path: &[Coord2]) {}

    fn clear_path(&mut self) {}

    fn set_path_color(&mut self, _color: PathColor) {}

    /// Briefly highlight one target cell.
    fn flash_hint(&mut self, _coords: Coord2) {}

    /// Highlight every target cell, one after the other, in word order.
    fn flash_word(&mut self, _coords: &[Coord2]) {}

    fn show_direction_warning(&mut self) {}

    fn play_sound(&mut self, _sound: Sound) {}

    /// A hidden or hazardous cell showed its letter.
    fn on_cell_unmasked(&mut self, _coords: Coord2) {}

    /// Decorative effect between the last two cells of a growing path. `variant` picks one
    /// of the configured effect kinds.
    fn spawn_segment_effect(&mut self, _from: Coord2, _to: Coord2, _variant: usize) {}

    fn mark_word_complete(&mut self, _index: usize) {}

    fn on_word_completed(&mut self) {}

    fn on_level_completed(&mut self) {}

    fn on_swap(&mut self, _a: Coord2, _b: Coord2) {}

    fn on_timer_warning(&mut self, _remaining: Duration) {}

    fn on_time_expired(&mut self) {}
}

/// Presenter that ignores everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// One recorded [`Presenter`] notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresenterEvent {
    GridReady { size: Coord },
    DrawPath(Vec<Coord2>),
    ClearPath,
    PathColor(PathColor),
    FlashHint(Coord2),
    FlashWord(Vec<Coord2>),
    DirectionWarning,
    Sound(Sound),
    CellUnmasked(Coord2),
    SegmentEffect { from: Coord2, to: Coord2, variant: usize },
    WordMarked(usize),
    WordCompleted,
    LevelCompleted,
    Swap(Coord2, Coord2),
    TimerWarning(Duration),
    TimeExpired,
}

/// Presenter that records every notification in order, for tests and replays.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<PresenterEvent>,
}

impl EventLog {
    pub fn events(&self) -> &[PresenterEvent] {
        &self.events
    }

    pub fn take(&mut self) -> Vec<PresenterEvent> {
        core::mem::take(&mut self.events)
    }

    pub fn contains(&self, event: &PresenterEvent) -> bool {
        self.events.contains(event)
    }

    fn push(&mut self, event: PresenterEvent) {
        log::trace!("presenter: {:?}", event);
        self.events.push(event);
    }
}

impl Presenter for EventLog {
    fn on_grid_ready(&mut self, grid: &Grid) {
        self.push(PresenterEvent::GridReady { size: grid.size() });
    }

    fn draw_path(&mut self, path: &[Coord2]) {
        self.push(PresenterEvent::DrawPath(path.to_vec()));
    }

    fn clear_path(&mut self) {
        self.push(PresenterEvent::ClearPath);
    }

    fn set_path_color(&mut self, color: PathColor) {
        self.push(PresenterEvent::PathColor(color));
    }

    fn flash_hint(&mut self, coords: Coord2) {
        self.push(PresenterEvent::FlashHint(coords));
    }

    fn flash_word(&mut self, coords: &[Coord2]) {
        self.push(PresenterEvent::FlashWord(coords.to_vec()));
    }

    fn show_direction_warning(&mut self) {
        self.push(PresenterEvent::DirectionWarning);
    }

    fn play_sound(&mut self, sound: Sound) {
        self.push(PresenterEvent::Sound(sound));
    }

    fn on_cell_unmasked(&mut self, coords: Coord2) {
        self.push(PresenterEvent::CellUnmasked(coords));
    }

    fn spawn_segment_effect(&mut self, from: Coord2, to: Coord2, variant: usize) {
        self.push(PresenterEvent::SegmentEffect { from, to, variant });
    }

    fn mark_word_complete(&mut self, index: usize) {
        self.push(PresenterEvent::WordMarked(index));
    }

    fn on_word_completed(&mut self) {
        self.push(PresenterEvent::WordCompleted);
    }

    fn on_level_completed(&mut self) {
        self.push(PresenterEvent::LevelCompleted);
    }

    fn on_swap(&mut self, a: Coord2, b: Coord2) {
        self.push(PresenterEvent::Swap(a, b));
    }

    fn on_timer_warning(&mut self, remaining: Duration) {
        self.push(PresenterEvent::TimerWarning(remaining));
    }

    fn on_time_expired(&mut self) {
        self.push(PresenterEvent::TimeExpired);
    }
}
