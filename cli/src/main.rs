use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use synapse_core::*;
use web_time::{Instant, SystemTime, UNIX_EPOCH};

use command::{Command, HELP};
use terminal::{TerminalPresenter, render};

mod command;
mod terminal;

const BUNDLED_LEVELS: &str = include_str!("../levels/levels.json");

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Level catalog to play instead of the bundled one
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Start at this level (0-based)
    #[arg(long, default_value_t = 0)]
    level: usize,

    /// Start at this word of the level (0-based)
    #[arg(long, default_value_t = 0)]
    word: usize,
}

fn load_campaign(path: Option<&PathBuf>) -> anyhow::Result<Campaign> {
    let Some(path) = path else {
        return Campaign::from_json(BUNDLED_LEVELS).context("Bundled level catalog is invalid");
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    Campaign::from_json(&json).with_context(|| format!("Could not load {}", path.display()))
}

fn random_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

struct Game {
    campaign: Campaign,
    session: Session<TerminalPresenter>,
}

impl Game {
    fn announce_level(&self) {
        let progress = self.campaign.progress();
        let level = self.campaign.current();
        println!(
            "== Level {}: {} ({} words) ==",
            progress.level + 1,
            level.name,
            level.word_count()
        );
        if let Some(timer) = level.timer() {
            println!("You have {}s per word", timer.as_secs());
        }
    }

    fn show(&mut self) {
        for line in self.session.presenter_mut().drain() {
            println!("{line}");
        }
        let word = self.session.word();
        let spelled = self.session.engine().current_letters();
        print!("{}", render(self.session.grid()));
        println!(
            "Word {}/{}: {} letters, spelled {:?} ({} found so far)",
            self.session.word_index() + 1,
            self.session.level().word_count(),
            word.len(),
            spelled,
            self.session.presenter().completed_words().len()
        );
    }

    /// Returns `false` once the last level is done.
    fn advance(&mut self) -> anyhow::Result<bool> {
        match self.session.advance()? {
            Advance::NextWord(word) => self.campaign.set_word(word)?,
            Advance::LevelCompleted => {
                let Some(level) = self.campaign.next_level() else {
                    println!("All levels completed!");
                    return Ok(false);
                };
                let level = level.clone();
                self.session.apply_level(level, 0)?;
                self.announce_level();
            }
        }
        Ok(true)
    }

    fn handle(&mut self, command: Command) -> anyhow::Result<bool> {
        match command {
            Command::Tap(coords) => match self.session.tap(coords) {
                Ok(TapOutcome::Completed) => {
                    for line in self.session.presenter_mut().drain() {
                        println!("{line}");
                    }
                    return self.advance();
                }
                Ok(TapOutcome::InputLocked) => println!("Input is locked"),
                Ok(outcome) if outcome.has_update() => {
                    log::debug!("tap {:?}: {:?}", coords, outcome)
                }
                Ok(_) => {}
                Err(err) => println!("{err}"),
            },
            Command::Hint => self.session.request_hint(),
            Command::Restart => self.session.restart()?,
            Command::Show => {}
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn run(&mut self) -> anyhow::Result<()> {
        self.announce_level();
        self.show();

        let mut last_tick = Instant::now();
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("> ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            let now = Instant::now();
            let report = self.session.tick(now - last_tick);
            last_tick = now;
            if report.has_update() {
                log::debug!("tick: {:?}", report);
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    println!("{err:#}");
                    continue;
                }
            };
            if !self.handle(command)? {
                break;
            }
            self.show();
        }

        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    let mut campaign = load_campaign(args.levels.as_ref())?;
    campaign
        .select(args.level, args.word)
        .context("Invalid starting point")?;

    let seed = args.seed.unwrap_or_else(random_seed);
    log::debug!("seed: {}", seed);
    println!("Seed {seed}, type `help` for commands");

    let session = Session::start(
        campaign.current().clone(),
        campaign.progress().word,
        seed,
        SessionOptions::default(),
        TerminalPresenter::default(),
    )
    .context("Could not start the session")?;

    Game { campaign, session }.run()
}
