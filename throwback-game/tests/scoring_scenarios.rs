use std::collections::BTreeMap;

use throwback_game::{
    DifficultyTable, DifficultyTier, Guess, GuessableRecord, NewRecord, RecordId, ScoringEngine,
    ScoringModel, TimePoint, TimeVerdict, adjusted_months_off, meme_options, power_options,
};
use throwback_game::constants::{NO_MEME_OPTIONS, NO_POWER_OPTIONS};

fn meme(year: i32, month: u8) -> GuessableRecord {
    NewRecord {
        media_ref: "9bZkp7q19f0".to_string(),
        time_point: TimePoint::year_month(year, month),
        primary_label: "Gangnam Style".to_string(),
        secondary: BTreeMap::from([("country".to_string(), "kr".to_string())]),
        description: None,
    }
    .into_record(RecordId::new("meme"), 1)
}

fn era(year: i32) -> GuessableRecord {
    NewRecord {
        media_ref: "Vb3nQ8wErTy".to_string(),
        time_point: TimePoint::year(year),
        primary_label: "Battle".to_string(),
        secondary: BTreeMap::from([("europe".to_string(), "Holy Roman Empire".to_string())]),
        description: None,
    }
    .into_record(RecordId::new("era"), 1)
}

#[test]
fn perfect_timing_bonus_holds_on_every_tier() {
    let engine = ScoringEngine::new(ScoringModel::MonthWindow);
    let table = DifficultyTable::memes();
    let truth = meme(2012, 7);
    for (tier, profile) in table.iter() {
        let guess = Guess::at(TimePoint::year_month(2012, 7));
        let evaluation = engine.evaluate(&guess, &truth, profile);
        let expected = f64::from(profile.points) * 1.5;
        assert_eq!(evaluation.breakdown.time, TimeVerdict::Perfect, "{tier}");
        assert!((evaluation.breakdown.time_points - expected).abs() < 1e-9, "{tier}");
        assert!((evaluation.points - expected).abs() < 1e-9, "{tier}");
    }
}

#[test]
fn wrap_rule_folds_only_around_twelve() {
    assert_eq!(adjusted_months_off(13), 1);
    assert_eq!(adjusted_months_off(1), 1);
    assert_eq!(adjusted_months_off(12), 0);
    assert_eq!(adjusted_months_off(6), 6);
    assert_eq!(adjusted_months_off(14), 2);
    assert_eq!(adjusted_months_off(30), 18);
    assert_ne!(adjusted_months_off(5), adjusted_months_off(24 - 5));
}

#[test]
fn label_awards_ignore_time_guess() {
    let engine = ScoringEngine::new(ScoringModel::MonthWindow);
    let table = DifficultyTable::memes();
    let profile = table.profile(DifficultyTier::Hard);
    let truth = meme(2012, 7);
    let mut awards = Vec::new();
    for time in [
        TimePoint::year_month(2012, 7),
        TimePoint::year_month(2012, 1),
        TimePoint::year_month(2001, 3),
        TimePoint::year_month(2024, 12),
    ] {
        let guess = Guess::at(time)
            .with_primary("Gangnam Style")
            .with_secondary("us");
        let breakdown = engine.evaluate(&guess, &truth, profile).breakdown;
        awards.push((breakdown.primary_points, breakdown.secondary_points));
    }
    assert!(awards.iter().all(|award| *award == (3.0, 0.0)));
}

#[test]
fn regional_year_tolerance_is_inclusive() {
    let engine = ScoringEngine::new(ScoringModel::RegionalYear);
    let table = DifficultyTable::history();
    for (tier, profile) in table.iter() {
        let tolerance = i32::try_from(profile.year_tolerance).unwrap();
        let truth = era(1500);
        let at_edge = engine.evaluate(&Guess::at(TimePoint::year(1500 + tolerance)), &truth, profile);
        assert!(
            (at_edge.points - f64::from(profile.points)).abs() < 1e-9,
            "{tier}: {}",
            at_edge.feedback
        );
        let past_edge =
            engine.evaluate(&Guess::at(TimePoint::year(1500 - tolerance - 1)), &truth, profile);
        assert!(past_edge.points.abs() < f64::EPSILON, "{tier}");
        assert!(past_edge.feedback.starts_with("The actual year was 1500 AD."));
    }
}

#[test]
fn resolvers_never_return_empty_lists() {
    assert_eq!(meme_options(1850, Some(1)), vec![NO_MEME_OPTIONS.to_string()]);
    assert_eq!(power_options(-2999, "europe"), vec![NO_POWER_OPTIONS.to_string()]);
    for year in 1999..=2025 {
        assert!(!meme_options(year, None).is_empty());
    }
    for year in (-3000..=2023).step_by(50) {
        assert!(!power_options(year, "middleEast").is_empty());
    }
}

#[test]
fn evaluation_is_repeatable() {
    let engine = ScoringEngine::for_variant(throwback_game::GameVariant::History);
    let profile = DifficultyTable::history().easy;
    let guess = Guess::at(TimePoint::year(1450))
        .with_axis("europe")
        .with_secondary("Holy Roman Empire");
    let first = engine.evaluate(&guess, &era(1500), &profile);
    let second = engine.evaluate(&guess, &era(1500), &profile);
    assert_eq!(first, second);
    assert_eq!(first.feedback, "Close! Off by 50 years. Correct! Holy Roman Empire ruled Europe. You earned 2 points!");
}

#[test]
fn concrete_scenarios() {
    let memes = DifficultyTable::memes();
    let month_window = ScoringEngine::new(ScoringModel::MonthWindow);

    let exact = Guess::at(TimePoint::year_month(2015, 6))
        .with_primary("Gangnam Style")
        .with_secondary("kr");
    let evaluation = month_window.evaluate(&exact, &meme(2015, 6), &memes.medium);
    assert!((evaluation.points - 6.0).abs() < 1e-9);
    assert!(evaluation.feedback.ends_with("You earned 6.0 points!"));

    let close = Guess::at(TimePoint::year_month(2014, 8));
    let evaluation = month_window.evaluate(&close, &meme(2015, 6), &memes.medium);
    assert_eq!(evaluation.breakdown.time, TimeVerdict::Close { off: 2 });
    assert!((evaluation.breakdown.time_points - 1.9).abs() < 1e-9);

    let history = DifficultyTable::history();
    let regional = ScoringEngine::new(ScoringModel::RegionalYear);
    let guess = Guess::at(TimePoint::year(1510))
        .with_axis("europe")
        .with_secondary("Ottoman Empire");
    let evaluation = regional.evaluate(&guess, &era(1500), &history.hard);
    assert!((evaluation.points - 3.0).abs() < 1e-9);
    assert!(evaluation.feedback.contains("The ruling power in Europe was Holy Roman Empire."));
}

#[test]
fn missing_region_label_degrades_to_unknown() {
    let engine = ScoringEngine::new(ScoringModel::RegionalYear);
    let profile = DifficultyTable::history().medium;
    let guess = Guess::at(TimePoint::year(1500))
        .with_axis("africa")
        .with_secondary("Unknown");
    let evaluation = engine.evaluate(&guess, &era(1500), &profile);
    assert!((evaluation.points - 2.0).abs() < 1e-9);
    assert!(evaluation.feedback.contains("The ruling power in Africa was Unknown."));
}
