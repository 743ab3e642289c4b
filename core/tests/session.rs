use std::time::Duration;

use synapse_core::*;

const CATALOG: &str = r#"{
    "levels": [
        { "name": "First steps", "size": 5, "words": ["cat", "dog", "owl"] },
        {
            "name": "Shifting",
            "size": 6,
            "timer_secs": 30.0,
            "features": { "swap": { "enabled": true, "probability": 1.0 } },
            "words": ["axon", "glia"]
        }
    ]
}"#;

fn secs(secs: u64) -> Duration {
    Duration::from_secs(secs)
}

fn spell(session: &mut Session<EventLog>) -> TapOutcome {
    let targets = session.grid().target_coords().to_vec();
    let mut outcome = TapOutcome::NoChange;
    for coords in targets {
        outcome = session.tap(coords).unwrap();
    }
    outcome
}

#[test]
fn cat_scenario_through_a_session() {
    let level = LevelConfig::new(5, ["CAT"]);
    let grid = Grid::from_rows(
        &["XXTXX", "XCXXX", "XXAXX", "XXXXX", "XXXXX"],
        &[(1, 1), (2, 2), (2, 0)],
    )
    .unwrap();
    let mut session = Session::start_with_grid(
        level,
        0,
        grid,
        0,
        SessionOptions::default(),
        EventLog::default(),
    )
    .unwrap();

    assert_eq!(session.tap((1, 1)).unwrap(), TapOutcome::Partial);
    assert_eq!(session.engine().current_letters(), "C");
    assert_eq!(session.tap((2, 2)).unwrap(), TapOutcome::Partial);
    assert_eq!(session.engine().current_letters(), "CA");
    assert_eq!(session.tap((2, 0)).unwrap(), TapOutcome::Completed);

    let log = session.presenter();
    assert!(log.contains(&PresenterEvent::PathColor(PathColor::Complete)));
    assert!(log.contains(&PresenterEvent::WordMarked(0)));
    assert_eq!(
        log.events().last(),
        Some(&PresenterEvent::WordCompleted)
    );

    assert_eq!(session.advance().unwrap(), Advance::LevelCompleted);
}

#[test]
fn swaps_fire_after_three_seconds_then_every_six() {
    let features = Features {
        swap: Feature::on(1.0),
        ..Features::default()
    };
    let level = LevelConfig::new(6, ["SYNAPSE"]).with_features(features);
    let mut session =
        Session::start(level, 0, 5, SessionOptions::default(), EventLog::default()).unwrap();

    assert_eq!(session.until_next_swap(), Some(secs(3)));
    assert!(session.tick(Duration::from_millis(2999)).swaps.is_empty());
    assert_eq!(session.tick(Duration::from_millis(1)).swaps.len(), 1);
    assert!(session.tick(Duration::from_millis(5999)).swaps.is_empty());
    assert_eq!(session.tick(Duration::from_millis(1)).swaps.len(), 1);
    assert_eq!(session.tick(secs(12)).swaps.len(), 2);

    let swaps = session
        .presenter()
        .events()
        .iter()
        .filter(|event| matches!(event, PresenterEvent::Swap(..)))
        .count();
    assert_eq!(swaps, 4);
}

#[test]
fn swap_touching_a_target_clears_the_drawn_path() {
    let features = Features {
        swap: Feature::on(1.0),
        ..Features::default()
    };
    let level = LevelConfig::new(2, ["ABC"]).with_features(features);
    let mut session =
        Session::start(level, 0, 3, SessionOptions::default(), EventLog::default()).unwrap();
    let first = session.grid().target_coords()[0];
    session.tap(first).unwrap();
    session.presenter_mut().take();

    // three of the four cells are targets, any pair touches one
    let report = session.tick(secs(3));

    assert_eq!(report.swaps.len(), 1);
    assert!(report.swaps[0].touched_target);
    assert!(session.engine().path().is_empty());
    let events = session.presenter_mut().take();
    assert_eq!(events[0], PresenterEvent::ClearPath);
    assert!(matches!(events[1], PresenterEvent::Swap(..)));
}

#[test]
fn same_seed_replays_the_same_session() {
    let play = |seed| {
        let campaign = Campaign::from_json(CATALOG).unwrap();
        let level = campaign.level(1).unwrap().clone();
        let mut session =
            Session::start(level, 0, seed, SessionOptions::default(), EventLog::default())
                .unwrap();
        session.tick(secs(10));
        let corner = session.tap((0, 0)).unwrap();
        (corner, session.grid().clone(), session.into_presenter())
    };

    assert_eq!(play(17), play(17));
}

#[test]
fn countdown_restarts_for_every_word() {
    let campaign = Campaign::from_json(CATALOG).unwrap();
    let mut level = campaign.level(1).unwrap().clone();
    level.features.swap = Feature::off(1.0);
    let mut session =
        Session::start(level, 0, 8, SessionOptions::default(), EventLog::default()).unwrap();

    session.tick(secs(25));
    assert_eq!(
        session.countdown().map(Countdown::remaining),
        Some(secs(5))
    );

    assert_eq!(spell(&mut session), TapOutcome::Completed);
    assert_eq!(session.advance().unwrap(), Advance::NextWord(1));
    assert_eq!(
        session.countdown().map(Countdown::remaining),
        Some(secs(30))
    );
    assert_eq!(session.word(), "GLIA");
}

#[test]
fn timing_out_locks_the_word_until_restart() {
    let campaign = Campaign::from_json(CATALOG).unwrap();
    let level = campaign.level(1).unwrap().clone();
    let mut session =
        Session::start(level, 0, 2, SessionOptions::default(), EventLog::default()).unwrap();

    let report = session.tick(secs(31));

    assert_eq!(report.countdown, Some(CountdownEvent::Expired));
    assert!(session.presenter().contains(&PresenterEvent::Sound(Sound::Defeat)));
    assert_eq!(session.tap((0, 0)).unwrap(), TapOutcome::InputLocked);
    assert!(session.tick(secs(60)).swaps.is_empty());
    assert_eq!(session.advance(), Err(GameError::NoTransitionPending));

    session.restart().unwrap();
    assert_eq!(session.engine().state(), EngineState::Active);
    assert_eq!(spell(&mut session), TapOutcome::Completed);
}

#[test]
fn campaign_drives_sessions_to_the_end() {
    let mut campaign = Campaign::from_json(CATALOG).unwrap();
    let mut session = Session::start(
        campaign.current().clone(),
        campaign.progress().word,
        11,
        SessionOptions::default(),
        EventLog::default(),
    )
    .unwrap();
    let mut words = Vec::new();

    loop {
        words.push(String::from(session.word()));
        assert_eq!(spell(&mut session), TapOutcome::Completed);
        match session.advance().unwrap() {
            Advance::NextWord(word) => campaign.set_word(word).unwrap(),
            Advance::LevelCompleted => match campaign.next_level() {
                Some(level) => session.apply_level(level.clone(), 0).unwrap(),
                None => break,
            },
        }
    }

    assert_eq!(words, ["CAT", "DOG", "OWL", "AXON", "GLIA"]);
    assert_eq!(campaign.progress(), Progress { level: 1, word: 1 });
    let marked: Vec<usize> = session
        .presenter()
        .events()
        .iter()
        .filter_map(|event| match event {
            PresenterEvent::WordMarked(index) => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(marked, [0, 1, 2, 0, 1]);
}
