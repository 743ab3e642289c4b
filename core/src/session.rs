use core::time::Duration;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Timing knobs of a [`Session`] that are not part of the level itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    pub swap_first_delay: Duration,
    pub swap_interval: Duration,
    /// The countdown warns once when the remaining time drops to this value.
    pub low_time_warning: Duration,
    /// Number of decorative segment effect variants, `0` disables them.
    pub segment_effects: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            swap_first_delay: SWAP_FIRST_DELAY,
            swap_interval: SWAP_INTERVAL,
            low_time_warning: Duration::from_secs(10),
            segment_effects: 3,
        }
    }
}

/// Where [`Session::advance`] went after a completed word.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advance {
    /// The next word of the level is loaded, carries its index.
    NextWord(usize),
    /// That was the last word of the level.
    LevelCompleted,
}

/// What happened during one [`Session::tick`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub swaps: SmallVec<[Swap; 2]>,
    pub countdown: Option<CountdownEvent>,
}

impl TickReport {
    pub fn has_update(&self) -> bool {
        !self.swaps.is_empty() || self.countdown.is_some()
    }
}

struct WordSetup {
    engine: SelectionEngine,
    hint: Option<Coord2>,
    perturber: Option<SwapPerturber>,
    countdown: Option<Countdown>,
}

/// One level being played: owns the live grid, its timers and the presenter.
///
/// Everything is driven from outside through [`tap`](Session::tap) and
/// [`tick`](Session::tick), so a session can run under any game loop or none at all.
pub struct Session<P> {
    options: SessionOptions,
    rng: SmallRng,
    level: LevelConfig,
    word_index: usize,
    engine: SelectionEngine,
    perturber: Option<SwapPerturber>,
    countdown: Option<Countdown>,
    /// Set once the last word was advanced past, cleared by the next word load.
    level_completed: bool,
    presenter: P,
}

impl<P: Presenter> Session<P> {
    /// Validates `level` and loads the word at `word_index` on a freshly generated grid.
    pub fn start(
        level: LevelConfig,
        word_index: usize,
        seed: u64,
        options: SessionOptions,
        presenter: P,
    ) -> Result<Self> {
        let level = level.validated()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let setup = setup_word(&mut rng, &options, &level, word_index, None)?;
        Ok(Self::assemble(
            options, rng, level, word_index, setup, presenter,
        ))
    }

    /// Like [`start`](Session::start), but plays the first word on a hand-built grid.
    /// Later words are generated as usual.
    pub fn start_with_grid(
        level: LevelConfig,
        word_index: usize,
        grid: Grid,
        seed: u64,
        options: SessionOptions,
        presenter: P,
    ) -> Result<Self> {
        let level = level.validated()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let setup = setup_word(&mut rng, &options, &level, word_index, Some(grid))?;
        Ok(Self::assemble(
            options, rng, level, word_index, setup, presenter,
        ))
    }

    fn assemble(
        options: SessionOptions,
        rng: SmallRng,
        level: LevelConfig,
        word_index: usize,
        setup: WordSetup,
        presenter: P,
    ) -> Self {
        let mut session = Self {
            options,
            rng,
            level,
            word_index,
            engine: setup.engine,
            perturber: setup.perturber,
            countdown: setup.countdown,
            level_completed: false,
            presenter,
        };
        session.announce(setup.hint);
        session
    }

    /// Replaces the running level. On error the current level keeps running untouched.
    pub fn apply_level(&mut self, level: LevelConfig, word_index: usize) -> Result<()> {
        let level = level.validated()?;
        let setup = setup_word(&mut self.rng, &self.options, &level, word_index, None)?;
        log::debug!("Applying level {:?} at word {}", level.name, word_index);
        self.level = level;
        self.install(word_index, setup);
        Ok(())
    }

    /// Regenerates the grid of the current word and restarts its timers.
    pub fn restart(&mut self) -> Result<()> {
        self.load_word(self.word_index)
    }

    fn load_word(&mut self, word_index: usize) -> Result<()> {
        let setup = setup_word(&mut self.rng, &self.options, &self.level, word_index, None)?;
        self.install(word_index, setup);
        Ok(())
    }

    fn install(&mut self, word_index: usize, setup: WordSetup) {
        // replacing the timers cancels whatever was scheduled for the old grid
        self.word_index = word_index;
        self.engine = setup.engine;
        self.perturber = setup.perturber;
        self.countdown = setup.countdown;
        self.level_completed = false;
        self.announce(setup.hint);
    }

    fn announce(&mut self, hint: Option<Coord2>) {
        self.presenter.clear_path();
        self.presenter.on_grid_ready(self.engine.grid());
        if let Some(hint) = hint {
            self.presenter.flash_hint(hint);
        }
    }

    pub fn tap(&mut self, coords: Coord2) -> Result<TapOutcome> {
        let outcome = self.engine.tap(coords)?;

        if outcome != TapOutcome::InputLocked {
            self.presenter.play_sound(Sound::CellClick);
        }

        match &outcome {
            TapOutcome::InputLocked | TapOutcome::NoChange => {}
            TapOutcome::Unmasked(_) => self.presenter.on_cell_unmasked(coords),
            TapOutcome::Reset(ResetCause::BlockedDirection(_)) => {
                self.presenter.show_direction_warning();
                self.presenter.clear_path();
            }
            TapOutcome::Reset(_) => self.presenter.clear_path(),
            TapOutcome::Rejected { stale_path } => {
                self.presenter.draw_path(stale_path);
                self.presenter.set_path_color(PathColor::Rejected);
            }
            TapOutcome::Partial => {
                self.presenter.draw_path(self.engine.path());
                self.presenter.set_path_color(PathColor::InProgress);
                self.spawn_segment_effect();
            }
            TapOutcome::Completed => {
                self.presenter.draw_path(self.engine.path());
                self.presenter.set_path_color(PathColor::Complete);
                if let Some(countdown) = &mut self.countdown {
                    countdown.stop();
                }
                self.presenter.play_sound(Sound::Success);
                self.presenter.mark_word_complete(self.word_index);
                self.presenter.on_word_completed();
            }
        }

        Ok(outcome)
    }

    fn spawn_segment_effect(&mut self) {
        let variants = self.options.segment_effects;
        let path = self.engine.path();
        if variants == 0 || path.len() < 2 {
            return;
        }
        let (from, to) = (path[path.len() - 2], path[path.len() - 1]);
        let variant = self.rng.random_range(0..variants);
        self.presenter.spawn_segment_effect(from, to, variant);
    }

    /// Moves the swap schedule and the countdown forward by `dt`.
    ///
    /// Swaps are held back while input is locked, so the board never changes under a
    /// tutorial overlay or after the word is done.
    pub fn tick(&mut self, dt: Duration) -> TickReport {
        let mut report = TickReport::default();

        if !self.engine.is_input_locked() {
            if let Some(perturber) = &mut self.perturber {
                for _ in 0..perturber.advance(dt) {
                    let Some(swap) = SwapPerturber::perturb(&mut self.rng, &mut self.engine)
                    else {
                        continue;
                    };
                    if swap.touched_target {
                        self.presenter.clear_path();
                    }
                    self.presenter.on_swap(swap.a, swap.b);
                    report.swaps.push(swap);
                }
            }
        }

        let event = self
            .countdown
            .as_mut()
            .and_then(|countdown| countdown.advance(dt));
        match event {
            Some(CountdownEvent::LowTime(remaining)) => {
                self.presenter.play_sound(Sound::TimerTick);
                self.presenter.on_timer_warning(remaining);
            }
            Some(CountdownEvent::Expired) => self.on_time_expired(),
            None => {}
        }
        report.countdown = event;

        report
    }

    /// Ends the word as lost. Does nothing once the word is completed or already lost.
    pub fn on_time_expired(&mut self) {
        if !self.engine.expire() {
            return;
        }
        log::debug!("Time expired on word {}", self.word_index);
        if let Some(countdown) = &mut self.countdown {
            countdown.stop();
        }
        self.presenter.clear_path();
        self.presenter.play_sound(Sound::Defeat);
        self.presenter.on_time_expired();
    }

    /// Moves on from a completed word to the next one, or finishes the level.
    ///
    /// After the last word the finished grid stays locked until another level is applied
    /// or the word is restarted, so the level completes only once.
    pub fn advance(&mut self) -> Result<Advance> {
        if self.level_completed || self.engine.state() != EngineState::Completed {
            return Err(GameError::NoTransitionPending);
        }

        let next = self.word_index + 1;
        if next < self.level.word_count() {
            self.engine.finish_transition()?;
            self.presenter.clear_path();
            self.load_word(next)?;
            Ok(Advance::NextWord(next))
        } else {
            log::debug!("Level {:?} completed", self.level.name);
            self.engine.reset_selection();
            self.presenter.clear_path();
            self.level_completed = true;
            self.perturber = None;
            self.countdown = None;
            self.presenter.on_level_completed();
            Ok(Advance::LevelCompleted)
        }
    }

    /// Flashes every target cell in word order.
    pub fn request_hint(&mut self) {
        self.presenter.flash_word(self.engine.grid().target_coords());
    }

    pub fn lock_input(&mut self) {
        self.engine.lock_input();
    }

    pub fn unlock_input(&mut self) {
        self.engine.unlock_input();
    }

    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn word(&self) -> &str {
        self.engine.target()
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn is_level_completed(&self) -> bool {
        self.level_completed
    }

    pub fn swaps_armed(&self) -> bool {
        self.perturber.is_some()
    }

    pub fn until_next_swap(&self) -> Option<Duration> {
        self.perturber.as_ref().map(SwapPerturber::until_next)
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }
}

fn setup_word(
    rng: &mut SmallRng,
    options: &SessionOptions,
    level: &LevelConfig,
    word_index: usize,
    grid: Option<Grid>,
) -> Result<WordSetup> {
    let word = level.word(word_index)?;
    let (grid, hint) = match grid {
        Some(grid) => {
            let hint = grid.target_coords().first().copied();
            (grid, hint)
        }
        None => {
            let generated = RandomGridGenerator::new(rng.next_u64()).generate(level, word)?;
            (generated.grid, Some(generated.hint))
        }
    };

    let perturber = SwapPerturber::arm(
        &level.features.swap,
        rng,
        options.swap_first_delay,
        options.swap_interval,
    );
    let countdown = level
        .timer()
        .map(|duration| Countdown::start(duration, options.low_time_warning));

    log::debug!(
        "Loaded word {} {:?} (swaps: {}, timer: {:?})",
        word_index,
        word,
        perturber.is_some(),
        level.timer()
    );
    Ok(WordSetup {
        engine: SelectionEngine::new(grid, word),
        hint,
        perturber,
        countdown,
    })
}
