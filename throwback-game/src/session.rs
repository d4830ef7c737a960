//! Play session: a round controller bound to the score ledger.
use crate::difficulty::DifficultyTier;
use crate::error::{EngineError, FetchError, SessionError};
use crate::ledger::ScoreLedger;
use crate::numbers::sanitize_score;
use crate::round::{NextRound, RoundController, RoundState};
use crate::scoring::Evaluation;

/// Outcome of the one-time snapshot load.
#[derive(Debug)]
pub enum SessionLoad<'a, L: ScoreLedger> {
    Ready(PlaySession<'a, L>),
    /// The store answered with no records.
    Empty,
    Failed(FetchError),
}

impl<'a, L: ScoreLedger> SessionLoad<'a, L> {
    /// Collapse the load outcome into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyCollection`] or [`SessionError::Fetch`]
    /// when no session could start.
    pub fn into_result(self) -> Result<PlaySession<'a, L>, SessionError> {
        match self {
            Self::Ready(session) => Ok(session),
            Self::Empty => Err(SessionError::EmptyCollection),
            Self::Failed(err) => Err(err.into()),
        }
    }
}

/// A running game. The score is read from the ledger once when the session
/// starts and written back after every submitted guess.
#[derive(Debug)]
pub struct PlaySession<'a, L: ScoreLedger> {
    controller: RoundController,
    ledger: &'a L,
    score: f64,
}

impl<'a, L: ScoreLedger> PlaySession<'a, L> {
    pub(crate) fn start(controller: RoundController, ledger: &'a L, stored: f64) -> Self {
        let score = sanitize_score(stored);
        if score.to_bits() != stored.to_bits() {
            log::warn!("stored score {stored} is not a valid total, starting from {score}");
        }
        Self {
            controller,
            ledger,
            score,
        }
    }

    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub const fn state(&self) -> &RoundState {
        self.controller.state()
    }

    #[must_use]
    pub const fn controller(&self) -> &RoundController {
        &self.controller
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        self.controller.options()
    }

    /// # Errors
    ///
    /// Fails once the round is revealed.
    pub fn set_year(&mut self, year: i32) -> Result<(), EngineError> {
        Ok(self.controller.set_year(year)?)
    }

    /// # Errors
    ///
    /// Fails once the round is revealed.
    pub fn set_month(&mut self, month: Option<u8>) -> Result<(), EngineError> {
        Ok(self.controller.set_month(month)?)
    }

    /// # Errors
    ///
    /// Fails once the round is revealed.
    pub fn set_axis(&mut self, axis: Option<String>) -> Result<(), EngineError> {
        Ok(self.controller.set_axis(axis)?)
    }

    /// # Errors
    ///
    /// Fails once the round is revealed or when the label is not offered.
    pub fn select_option(&mut self, label: Option<String>) -> Result<(), EngineError> {
        Ok(self.controller.select_option(label)?)
    }

    /// # Errors
    ///
    /// Fails once the round is revealed or for an unknown country.
    pub fn select_origin(&mut self, code: Option<String>) -> Result<(), EngineError> {
        Ok(self.controller.select_origin(code)?)
    }

    /// # Errors
    ///
    /// Fails once the round is revealed.
    pub fn set_difficulty(&mut self, tier: DifficultyTier) -> Result<(), EngineError> {
        Ok(self.controller.set_difficulty(tier)?)
    }

    /// Reveal the round, add the award to the running score and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Round`] when the round cannot be submitted and
    /// [`EngineError::Ledger`] when the new total could not be stored. In the
    /// latter case the in-memory score already includes the award.
    pub fn submit(&mut self) -> Result<Evaluation, EngineError> {
        let evaluation = self.controller.submit()?.clone();
        self.score += evaluation.points;
        self.ledger.set(self.score).map_err(EngineError::ledger)?;
        log::info!(
            "round scored {} points, running total {}",
            evaluation.points,
            self.score
        );
        Ok(evaluation)
    }

    /// # Errors
    ///
    /// Fails while the current round is still being guessed.
    pub fn next_round(&mut self) -> Result<NextRound, EngineError> {
        Ok(self.controller.next_round()?)
    }
}
