//! Round controller: the single owner and mutator of round state.
//!
//! A round starts in [`RoundPhase::Guessing`] with a record drawn from the
//! session snapshot. Submitting flips it to [`RoundPhase::Revealed`] for good;
//! only `next_round` brings back a guessing phase, with a different record.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::difficulty::{DifficultyProfile, DifficultyTier};
use crate::error::RoundError;
use crate::period::{options_for, reconcile_selection};
use crate::record::GuessableRecord;
use crate::scoring::{Evaluation, Guess, ScoringEngine};
use crate::tables::country_name;
use crate::variant::GameVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Guessing,
    Revealed,
}

/// Everything the presentation layer needs to draw a round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundState {
    pub current: GuessableRecord,
    pub guess: Guess,
    pub difficulty: DifficultyTier,
    pub phase: RoundPhase,
    /// Period-filtered choices for the option-bound selector.
    pub options: Vec<String>,
    pub outcome: Option<Evaluation>,
}

/// Result of asking for the next round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextRound {
    Advanced,
    /// The snapshot holds a single record; the revealed round stays put.
    NoMoreRounds,
}

#[derive(Debug, Clone)]
pub struct RoundController {
    config: GameConfig,
    engine: ScoringEngine,
    snapshot: Vec<GuessableRecord>,
    state: RoundState,
    rng: ChaCha20Rng,
}

impl RoundController {
    /// Start the first round from a snapshot. Returns `None` for an empty snapshot.
    #[must_use]
    pub fn new(snapshot: Vec<GuessableRecord>, config: GameConfig, seed: u64) -> Option<Self> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        if snapshot.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..snapshot.len());
        let current = snapshot[index].clone();
        let state = fresh_state(&config, current, config.default_difficulty);
        log::debug!(
            "round started on record {} ({} in snapshot)",
            state.current.id,
            snapshot.len()
        );
        Some(Self {
            engine: ScoringEngine::for_variant(config.variant),
            config,
            snapshot,
            state,
            rng,
        })
    }

    #[must_use]
    pub const fn state(&self) -> &RoundState {
        &self.state
    }

    #[must_use]
    pub fn snapshot(&self) -> &[GuessableRecord] {
        &self.snapshot
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn engine(&self) -> ScoringEngine {
        self.engine
    }

    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.state.options
    }

    /// Profile for the currently selected tier.
    #[must_use]
    pub const fn profile(&self) -> &DifficultyProfile {
        self.config.profile(self.state.difficulty)
    }

    /// Change the guessed year and refresh the option list.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::AlreadyRevealed`] once the guess is submitted and
    /// [`RoundError::YearOutOfRange`] outside the variant's playable years.
    pub fn set_year(&mut self, year: i32) -> Result<(), RoundError> {
        self.ensure_guessing()?;
        let range = self.config.variant.year_range();
        if !range.contains(&year) {
            return Err(RoundError::YearOutOfRange {
                year,
                min: *range.start(),
                max: *range.end(),
            });
        }
        self.state.guess.time.year = year;
        self.refresh_options();
        Ok(())
    }

    /// Change the guessed month (ignored by year-only variants) and refresh.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::AlreadyRevealed`] once the guess is submitted and
    /// [`RoundError::MonthOutOfRange`] for a month outside 1-12.
    pub fn set_month(&mut self, month: Option<u8>) -> Result<(), RoundError> {
        self.ensure_guessing()?;
        if let Some(month) = month
            && !(1..=12).contains(&month)
        {
            return Err(RoundError::MonthOutOfRange(month));
        }
        if self.config.variant.uses_month() {
            self.state.guess.time.month = month;
            self.refresh_options();
        }
        Ok(())
    }

    /// Change the axis (the region, for history) and refresh.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::AlreadyRevealed`] once the guess is submitted.
    pub fn set_axis(&mut self, axis: Option<String>) -> Result<(), RoundError> {
        self.ensure_guessing()?;
        self.state.guess.axis = axis;
        self.refresh_options();
        Ok(())
    }

    /// Pick an answer from the period-filtered options (meme name or ruling power).
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::AlreadyRevealed`] once the guess is submitted and
    /// [`RoundError::UnavailableOption`] for a label not currently offered.
    pub fn select_option(&mut self, label: Option<String>) -> Result<(), RoundError> {
        self.ensure_guessing()?;
        if let Some(chosen) = label.as_deref()
            && !self.state.options.iter().any(|option| option == chosen)
        {
            return Err(RoundError::UnavailableOption);
        }
        *self.option_slot() = label;
        Ok(())
    }

    /// Pick the country of origin (memes only).
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::AlreadyRevealed`] once the guess is submitted and
    /// [`RoundError::UnavailableOption`] for an unknown country code or when
    /// the variant has no origin axis.
    pub fn select_origin(&mut self, code: Option<String>) -> Result<(), RoundError> {
        self.ensure_guessing()?;
        if self.config.variant != GameVariant::Memes {
            return Err(RoundError::UnavailableOption);
        }
        if let Some(code) = code.as_deref()
            && country_name(code).is_none()
        {
            return Err(RoundError::UnavailableOption);
        }
        self.state.guess.secondary = code;
        Ok(())
    }

    /// Switch tiers before submitting.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::AlreadyRevealed`] once the guess is submitted.
    pub fn set_difficulty(&mut self, tier: DifficultyTier) -> Result<(), RoundError> {
        self.ensure_guessing()?;
        self.state.difficulty = tier;
        Ok(())
    }

    /// Evaluate the current guess and reveal the round. The ledger is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::AlreadyRevealed`] on a second submit and
    /// [`RoundError::MissingSelection`] when no option has been picked.
    pub fn submit(&mut self) -> Result<&Evaluation, RoundError> {
        self.ensure_guessing()?;
        if self.option_selection().is_none() {
            return Err(RoundError::MissingSelection);
        }
        let evaluation = self
            .engine
            .evaluate(&self.state.guess, &self.state.current, self.profile());
        self.state.phase = RoundPhase::Revealed;
        Ok(&*self.state.outcome.insert(evaluation))
    }

    /// Move to a different record drawn uniformly from the rest of the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::StillGuessing`] before the round is revealed.
    pub fn next_round(&mut self) -> Result<NextRound, RoundError> {
        if self.state.phase == RoundPhase::Guessing {
            return Err(RoundError::StillGuessing);
        }
        let current_id = &self.state.current.id;
        let candidates: Vec<&GuessableRecord> = self
            .snapshot
            .iter()
            .filter(|record| &record.id != current_id)
            .collect();
        if candidates.is_empty() {
            log::debug!("no other record to play after {current_id}");
            return Ok(NextRound::NoMoreRounds);
        }
        let next = candidates[self.rng.gen_range(0..candidates.len())].clone();
        log::debug!("advancing from {} to {}", self.state.current.id, next.id);
        self.state = fresh_state(&self.config, next, self.state.difficulty);
        Ok(NextRound::Advanced)
    }

    const fn ensure_guessing(&self) -> Result<(), RoundError> {
        match self.state.phase {
            RoundPhase::Guessing => Ok(()),
            RoundPhase::Revealed => Err(RoundError::AlreadyRevealed),
        }
    }

    fn option_selection(&self) -> Option<&str> {
        match self.config.variant {
            GameVariant::Memes => self.state.guess.primary.as_deref(),
            GameVariant::History => self.state.guess.secondary.as_deref(),
        }
    }

    fn option_slot(&mut self) -> &mut Option<String> {
        match self.config.variant {
            GameVariant::Memes => &mut self.state.guess.primary,
            GameVariant::History => &mut self.state.guess.secondary,
        }
    }

    fn refresh_options(&mut self) {
        let guess = &self.state.guess;
        self.state.options = options_for(self.config.variant, guess.time, guess.axis.as_deref());
        let kept = reconcile_selection(self.option_slot().take(), &self.state.options);
        if kept.is_none() {
            log::debug!("selection reset after option refresh");
        }
        *self.option_slot() = kept;
    }
}

fn fresh_state(config: &GameConfig, current: GuessableRecord, difficulty: DifficultyTier) -> RoundState {
    let guess = config.defaults.to_guess();
    let options = options_for(config.variant, guess.time, guess.axis.as_deref());
    RoundState {
        current,
        guess,
        difficulty,
        phase: RoundPhase::Guessing,
        options,
        outcome: None,
    }
}
