use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use throwback_game::{
    DifficultyTier, EngineError, GameConfig, GameEngine, MemoryLedger, MemoryRecordStore,
    NextRound, RecordDraft, RoundError, RoundPhase, ScoreLedger, SessionError, SessionLoad,
};

fn meme_draft(media_ref: &str, year: i32, month: u8, label: &str, country: &str) -> RecordDraft {
    RecordDraft {
        media_ref: media_ref.to_string(),
        year,
        month: Some(month),
        primary_label: label.to_string(),
        secondary: BTreeMap::from([("country".to_string(), country.to_string())]),
        description: None,
    }
}

fn history_draft(media_ref: &str, year: i32, label: &str, powers: &[(&str, &str)]) -> RecordDraft {
    RecordDraft {
        media_ref: media_ref.to_string(),
        year,
        month: None,
        primary_label: label.to_string(),
        secondary: powers
            .iter()
            .map(|(region, power)| ((*region).to_string(), (*power).to_string()))
            .collect(),
        description: Some("A scene".to_string()),
    }
}

/// Ledger that records every write.
#[derive(Clone, Default)]
struct RecordingLedger {
    value: Rc<Cell<f64>>,
    writes: Rc<RefCell<Vec<f64>>>,
}

impl ScoreLedger for RecordingLedger {
    type Error = std::convert::Infallible;

    fn get(&self) -> Result<f64, Self::Error> {
        Ok(self.value.get())
    }

    fn set(&self, score: f64) -> Result<(), Self::Error> {
        self.value.set(score);
        self.writes.borrow_mut().push(score);
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("quota exceeded")]
struct QuotaExceeded;

struct FullLedger;

impl ScoreLedger for FullLedger {
    type Error = QuotaExceeded;

    fn get(&self) -> Result<f64, Self::Error> {
        Ok(0.0)
    }

    fn set(&self, _score: f64) -> Result<(), Self::Error> {
        Err(QuotaExceeded)
    }
}

#[test]
fn meme_session_plays_through_the_snapshot() {
    let ledger = RecordingLedger::default();
    let engine = GameEngine::new(GameConfig::memes(), MemoryRecordStore::new(), ledger.clone());
    for draft in [
        meme_draft("dQw4w9WgXcQ", 2007, 5, "Rickroll", "us"),
        meme_draft("9bZkp7q19f0", 2012, 7, "Gangnam Style", "kr"),
        meme_draft("8UFIYGkROII", 2013, 2, "Harlem Shake", "au"),
    ] {
        engine.add_record(&draft).unwrap();
    }

    let mut session = engine.load_session(2024).into_result().unwrap();
    let mut seen = BTreeSet::new();
    for round in 0..9 {
        let current = session.state().current.clone();
        seen.insert(current.id.clone());
        assert_eq!(session.state().phase, RoundPhase::Guessing);

        session.set_year(current.time_point.year).unwrap();
        session.set_month(current.time_point.month).unwrap();
        session
            .select_origin(current.secondary_label("country").map(str::to_string))
            .unwrap();
        session
            .select_option(Some(current.primary_label.clone()))
            .unwrap();
        let evaluation = session.submit().unwrap();
        // medium tier every round: 3.0 + 2 + 1
        assert!((evaluation.points - 6.0).abs() < 1e-9, "round {round}");

        assert_eq!(session.next_round().unwrap(), NextRound::Advanced);
        assert_ne!(session.state().current.id, current.id);
    }

    assert_eq!(seen.len(), 3);
    let writes = ledger.writes.borrow();
    assert_eq!(writes.len(), 9);
    assert!(writes.windows(2).all(|pair| pair[1] >= pair[0]));
    assert!((session.score() - 54.0).abs() < 1e-9);
}

#[test]
fn history_session_respects_regions_and_tiers() {
    let engine = GameEngine::new(
        GameConfig::history(),
        MemoryRecordStore::new(),
        MemoryLedger::starting_at(-12.0),
    );
    engine
        .add_record(&history_draft(
            "Zp0-Lk9YtRw",
            1492,
            "Fall of Granada",
            &[("europe", "Spanish Empire"), ("americas", "Aztec Empire")],
        ))
        .unwrap();

    let mut session = engine.load_session(0).into_result().unwrap();
    assert!(session.score().abs() < f64::EPSILON);

    session.set_difficulty(DifficultyTier::Expert).unwrap();
    session.set_year(1500).unwrap();
    session.set_axis(Some("americas".to_string())).unwrap();
    assert!(session.options().contains(&"Aztec Empire".to_string()));
    session.select_option(Some("Aztec Empire".to_string())).unwrap();

    // moving out of the Aztec span drops the stale pick
    session.set_year(1600).unwrap();
    assert_eq!(session.state().guess.secondary, None);
    assert!(matches!(
        session.submit(),
        Err(EngineError::Round(RoundError::MissingSelection))
    ));

    session.set_year(1495).unwrap();
    session.select_option(Some("Aztec Empire".to_string())).unwrap();
    let evaluation = session.submit().unwrap();
    // expert: tolerance 10, five points each
    assert!((evaluation.points - 10.0).abs() < 1e-9);
    assert_eq!(
        evaluation.feedback,
        "Close! Off by 3 years. Correct! Aztec Empire ruled The Americas. You earned 10 points!"
    );
    assert!((engine.ledger().value() - 10.0).abs() < 1e-9);

    assert!(matches!(
        session.set_difficulty(DifficultyTier::Easy),
        Err(EngineError::Round(RoundError::AlreadyRevealed))
    ));
    assert_eq!(session.next_round().unwrap(), NextRound::NoMoreRounds);
    assert_eq!(session.state().phase, RoundPhase::Revealed);
}

#[test]
fn ledger_write_failure_is_reported() {
    let engine = GameEngine::new(GameConfig::memes(), MemoryRecordStore::new(), FullLedger);
    engine
        .add_record(&meme_draft("dQw4w9WgXcQ", 2007, 5, "Rickroll", "us"))
        .unwrap();
    let mut session = engine.load_session(1).into_result().unwrap();
    session.set_year(2007).unwrap();
    session.select_option(Some("Rickroll".to_string())).unwrap();
    let err = session.submit().unwrap_err();
    assert_eq!(err.to_string(), "score ledger error: quota exceeded");
    assert_eq!(session.state().phase, RoundPhase::Revealed);
}

#[test]
fn reloading_is_the_retry_path() {
    let store = MemoryRecordStore::new();
    let engine = GameEngine::new(GameConfig::memes(), store, MemoryLedger::new());
    assert!(matches!(engine.load_session(3), SessionLoad::Empty));
    assert!(matches!(
        engine.load_session(3).into_result(),
        Err(SessionError::EmptyCollection)
    ));

    engine
        .add_record(&meme_draft("QH2-TGUlwu4", 2009, 4, "Nyan Cat", "jp"))
        .unwrap();
    assert!(matches!(engine.load_session(3), SessionLoad::Ready(_)));
}

#[test]
fn same_seed_replays_the_same_rounds() {
    let build = || {
        let engine = GameEngine::new(GameConfig::memes(), MemoryRecordStore::new(), MemoryLedger::new());
        for (i, label) in ["Rickroll", "Keyboard Cat", "Nyan Cat", "Double Rainbow"]
            .iter()
            .enumerate()
        {
            let year = 2007 + i32::try_from(i).unwrap();
            engine
                .add_record(&meme_draft("dQw4w9WgXcQ", year, 1, label, "us"))
                .unwrap();
        }
        engine
    };
    let order = |engine: &GameEngine<MemoryRecordStore, MemoryLedger>| {
        let mut session = engine.load_session(77).into_result().unwrap();
        let mut ids = Vec::new();
        for _ in 0..6 {
            ids.push(session.state().current.id.clone());
            session.select_option(session.options().first().cloned()).unwrap();
            session.submit().unwrap();
            session.next_round().unwrap();
        }
        ids
    };
    assert_eq!(order(&build()), order(&build()));
}
