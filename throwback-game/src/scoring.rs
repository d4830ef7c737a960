//! Guess evaluation: date proximity with tolerance bands plus categorical bonuses.
//!
//! Two tolerance models share one engine. [`ScoringModel::MonthWindow`] scores
//! a year+month guess against a meme record with a name and a country of
//! origin. [`ScoringModel::RegionalYear`] scores a year-only guess against the
//! power that ruled the selected region.
//!
//! Evaluation is a pure function of its inputs. Persisting the award is the
//! caller's job.

use serde::{Deserialize, Serialize};

use crate::constants::{
    GLOBAL_REGION, MONTHS_PER_YEAR, ORIGIN_AXIS, ORIGIN_MATCH_MULT, PERFECT_TIMING_MULT,
    RIGHT_ERA_MULT, UNKNOWN_LABEL,
};
use crate::difficulty::DifficultyProfile;
use crate::numbers::{round_to_tenth, u32_to_f64, year_distance};
use crate::record::{GuessableRecord, TimePoint};
use crate::tables::{country_name, format_year, month_name, region_display_name};
use crate::variant::GameVariant;

/// Tolerance model applied by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringModel {
    /// Month-granular time plus a primary label and a country of origin.
    MonthWindow,
    /// Year-only time plus a label keyed by the selected region.
    RegionalYear,
}

impl ScoringModel {
    #[must_use]
    pub const fn for_variant(variant: GameVariant) -> Self {
        match variant {
            GameVariant::Memes => Self::MonthWindow,
            GameVariant::History => Self::RegionalYear,
        }
    }
}

/// A submitted guess. Unselected categorical answers are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub time: TimePoint,
    /// Primary label, e.g. the meme name.
    #[serde(default)]
    pub primary: Option<String>,
    /// Selected axis, e.g. a history region. Month-window scoring always
    /// uses the country axis and ignores this.
    #[serde(default)]
    pub axis: Option<String>,
    /// Label guessed for the axis, e.g. a country code or a ruling power.
    #[serde(default)]
    pub secondary: Option<String>,
}

impl Guess {
    #[must_use]
    pub const fn at(time: TimePoint) -> Self {
        Self {
            time,
            primary: None,
            axis: None,
            secondary: None,
        }
    }

    #[must_use]
    pub fn with_primary(mut self, label: impl Into<String>) -> Self {
        self.primary = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_axis(mut self, axis: impl Into<String>) -> Self {
        self.axis = Some(axis.into());
        self
    }

    #[must_use]
    pub fn with_secondary(mut self, label: impl Into<String>) -> Self {
        self.secondary = Some(label.into());
        self
    }
}

/// How the time component of a guess landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TimeVerdict {
    Perfect,
    /// Within tolerance; `off` is months for month-window scoring, years otherwise.
    Close { off: u32 },
    /// Year within tolerance but month too far off.
    RightEra,
    Miss,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub time: TimeVerdict,
    pub time_points: f64,
    pub primary_points: f64,
    pub secondary_points: f64,
}

/// Points and feedback produced for a guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub points: f64,
    pub feedback: String,
    pub breakdown: ScoreBreakdown,
}

/// Evaluates guesses under one tolerance model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringEngine {
    model: ScoringModel,
}

impl ScoringEngine {
    #[must_use]
    pub const fn new(model: ScoringModel) -> Self {
        Self { model }
    }

    #[must_use]
    pub const fn for_variant(variant: GameVariant) -> Self {
        Self::new(ScoringModel::for_variant(variant))
    }

    #[must_use]
    pub const fn model(&self) -> ScoringModel {
        self.model
    }

    /// Score `guess` against `truth` under `difficulty`. Never fails and never
    /// awards negative points.
    #[must_use]
    pub fn evaluate(
        &self,
        guess: &Guess,
        truth: &GuessableRecord,
        difficulty: &DifficultyProfile,
    ) -> Evaluation {
        let evaluation = match self.model {
            ScoringModel::MonthWindow => evaluate_month_window(guess, truth, difficulty),
            ScoringModel::RegionalYear => evaluate_regional_year(guess, truth, difficulty),
        };
        log::debug!(
            "evaluated record {} under {:?}: {:?} -> {}",
            truth.id,
            self.model,
            evaluation.breakdown.time,
            evaluation.points
        );
        evaluation
    }
}

/// Months off after folding the December/January wrap:
/// `min(total, |total - 12|)`.
#[must_use]
pub const fn adjusted_months_off(total_months_off: u32) -> u32 {
    let wrapped = total_months_off.abs_diff(MONTHS_PER_YEAR);
    if wrapped < total_months_off {
        wrapped
    } else {
        total_months_off
    }
}

/// Human-readable "June 2015" (or just "2015" without a month).
#[must_use]
pub fn describe_time_point(time: TimePoint) -> String {
    match time.month.and_then(month_name) {
        Some(month) => format!("{month} {}", time.year),
        None => time.year.to_string(),
    }
}

const fn plural(count: u32) -> &'static str {
    if count == 1 { "" } else { "s" }
}

fn month_distance(guess: Option<u8>, truth: Option<u8>) -> u32 {
    match (guess, truth) {
        (Some(g), Some(t)) => u32::from(g.abs_diff(t)),
        _ => 0,
    }
}

fn score_month_window_time(
    guess: TimePoint,
    truth: TimePoint,
    difficulty: &DifficultyProfile,
) -> (TimeVerdict, f64, String) {
    let points = u32_to_f64(difficulty.points);
    let year_diff = year_distance(guess.year, truth.year);
    let month_diff = month_distance(guess.month, truth.month);
    let total_months_off = year_diff
        .saturating_mul(MONTHS_PER_YEAR)
        .saturating_add(month_diff);
    let adjusted = adjusted_months_off(total_months_off);

    if year_diff == 0 && month_diff == 0 {
        return (
            TimeVerdict::Perfect,
            points * PERFECT_TIMING_MULT,
            "Perfect timing guess! ".to_string(),
        );
    }

    if year_diff > difficulty.year_tolerance {
        return (
            TimeVerdict::Miss,
            0.0,
            format!(
                "The meme was actually from {}. ",
                describe_time_point(truth)
            ),
        );
    }

    if adjusted <= difficulty.month_tolerance {
        let max_months_off = difficulty
            .year_tolerance
            .saturating_mul(MONTHS_PER_YEAR)
            .saturating_add(difficulty.month_tolerance);
        let accuracy = if max_months_off == 0 {
            1.0
        } else {
            1.0 - u32_to_f64(adjusted) / u32_to_f64(max_months_off)
        };
        (
            TimeVerdict::Close { off: adjusted },
            round_to_tenth(points * accuracy),
            format!(
                "Close! Off by about {adjusted} month{}. ",
                plural(adjusted)
            ),
        )
    } else {
        (
            TimeVerdict::RightEra,
            points * RIGHT_ERA_MULT,
            format!(
                "Right era, wrong month. The meme was from {}. ",
                describe_time_point(truth)
            ),
        )
    }
}

fn evaluate_month_window(
    guess: &Guess,
    truth: &GuessableRecord,
    difficulty: &DifficultyProfile,
) -> Evaluation {
    let points = u32_to_f64(difficulty.points);
    let (time, time_points, time_feedback) =
        score_month_window_time(guess.time, truth.time_point, difficulty);

    let (primary_points, primary_feedback) =
        if guess.primary.as_deref() == Some(truth.primary_label.as_str()) {
            (points, "You got the meme name right! ".to_string())
        } else {
            (0.0, format!("This was the \"{}\" meme. ", truth.primary_label))
        };

    let origin = truth.secondary_label(ORIGIN_AXIS);
    let (secondary_points, secondary_feedback) = match origin {
        Some(code) if guess.secondary.as_deref() == Some(code) => (
            points * ORIGIN_MATCH_MULT,
            "Correct country of origin! ".to_string(),
        ),
        Some(code) => (
            0.0,
            format!("It originated from {}. ", country_name(code).unwrap_or(code)),
        ),
        None => (0.0, format!("It originated from {UNKNOWN_LABEL}. ")),
    };

    let total = time_points + primary_points + secondary_points;
    Evaluation {
        points: total,
        feedback: format!(
            "{time_feedback}{primary_feedback}{secondary_feedback}You earned {total:.1} points!"
        ),
        breakdown: ScoreBreakdown {
            time,
            time_points,
            primary_points,
            secondary_points,
        },
    }
}

fn evaluate_regional_year(
    guess: &Guess,
    truth: &GuessableRecord,
    difficulty: &DifficultyProfile,
) -> Evaluation {
    let points = u32_to_f64(difficulty.points);
    let year_diff = year_distance(guess.time.year, truth.time_point.year);

    let (time, time_points, time_feedback) = if year_diff > difficulty.year_tolerance {
        (
            TimeVerdict::Miss,
            0.0,
            format!(
                "The actual year was {}. ",
                format_year(truth.time_point.year)
            ),
        )
    } else if year_diff == 0 {
        (TimeVerdict::Perfect, points, "Perfect year guess! ".to_string())
    } else {
        (
            TimeVerdict::Close { off: year_diff },
            points,
            format!("Close! Off by {year_diff} year{}. ", plural(year_diff)),
        )
    };

    let region = guess.axis.as_deref().unwrap_or(GLOBAL_REGION);
    let region_name = region_display_name(region);
    let correct = truth.secondary_label(region);
    let (secondary_points, secondary_feedback) = match correct {
        Some(label) if guess.secondary.as_deref() == Some(label) => {
            (points, format!("Correct! {label} ruled {region_name}. "))
        }
        _ => (
            0.0,
            format!(
                "The ruling power in {region_name} was {}. ",
                correct.unwrap_or(UNKNOWN_LABEL)
            ),
        ),
    };

    let total = time_points + secondary_points;
    Evaluation {
        points: total,
        feedback: format!("{time_feedback}{secondary_feedback}You earned {total:.0} points!"),
        breakdown: ScoreBreakdown {
            time,
            time_points,
            primary_points: 0.0,
            secondary_points,
        },
    }
}
