//! Throwback Game Engine
//!
//! Platform-agnostic core logic for the Throwback timeline trivia game.
//! Players watch a clip, place it in time and name what it shows; this crate
//! resolves plausible answers for a period, scores guesses and drives rounds
//! without any UI or storage dependencies.

pub mod admin;
pub mod config;
pub mod constants;
pub mod difficulty;
pub mod error;
pub mod ledger;
pub mod numbers;
pub mod period;
pub mod record;
pub mod round;
pub mod scoring;
pub mod session;
pub mod store;
pub mod tables;
pub mod variant;

// Re-export commonly used types
pub use admin::{RecordDraft, is_valid_media_ref, summarize};
pub use config::{GameConfig, GuessDefaults};
pub use difficulty::{DifficultyProfile, DifficultyTable, DifficultyTier};
pub use error::{
    CollaboratorError, EngineError, FetchError, RoundError, SessionError, ValidationError,
};
pub use ledger::{MemoryLedger, ScoreLedger};
pub use period::{is_sentinel, meme_options, options_for, power_options, reconcile_selection};
pub use record::{GuessableRecord, NewRecord, RecordId, TimePoint};
pub use round::{NextRound, RoundController, RoundPhase, RoundState};
pub use scoring::{
    Evaluation, Guess, ScoreBreakdown, ScoringEngine, ScoringModel, TimeVerdict,
    adjusted_months_off,
};
pub use session::{PlaySession, SessionLoad};
pub use store::{MemoryRecordStore, RecordStore};
pub use variant::GameVariant;

/// Main game engine tying configuration to a record store and a score ledger.
pub struct GameEngine<S, L>
where
    S: RecordStore,
    L: ScoreLedger,
{
    config: GameConfig,
    store: S,
    ledger: L,
}

impl<S, L> GameEngine<S, L>
where
    S: RecordStore,
    L: ScoreLedger,
{
    /// Create a new game engine with the provided configuration and collaborators
    pub const fn new(config: GameConfig, store: S, ledger: L) -> Self {
        Self {
            config,
            store,
            ledger,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Fetch the newest records once and start a session over that snapshot.
    ///
    /// Records created or deleted afterwards are not seen by the session.
    pub fn load_session(&self, seed: u64) -> SessionLoad<'_, L> {
        let snapshot = match self.store.list(Some(self.config.snapshot_limit)) {
            Ok(records) => records,
            Err(err) => {
                log::warn!("record snapshot failed: {err}");
                return SessionLoad::Failed(FetchError {
                    source: Box::new(err),
                });
            }
        };
        let stored = match self.ledger.get() {
            Ok(score) => score,
            Err(err) => {
                log::warn!("score ledger read failed: {err}");
                return SessionLoad::Failed(FetchError {
                    source: Box::new(err),
                });
            }
        };
        let Some(controller) = RoundController::new(snapshot, self.config.clone(), seed) else {
            log::info!("record store is empty, nothing to play");
            return SessionLoad::Empty;
        };
        log::info!(
            "session ready with {} records (seed {seed})",
            controller.snapshot().len()
        );
        SessionLoad::Ready(PlaySession::start(controller, &self.ledger, stored))
    }

    /// Validate an admin draft and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] without touching the store when the
    /// draft is malformed, or [`EngineError::Store`] when the write fails.
    pub fn add_record(&self, draft: &RecordDraft) -> Result<RecordId, EngineError> {
        let record = draft.validate(self.config.variant)?;
        let id = self.store.create(record).map_err(EngineError::store)?;
        log::info!("added record {id}");
        Ok(id)
    }

    /// Every stored record, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] when the store cannot be read.
    pub fn list_records(&self) -> Result<Vec<GuessableRecord>, EngineError> {
        self.store.list(None).map_err(EngineError::store)
    }

    /// # Errors
    ///
    /// Returns [`EngineError::Store`] when the store cannot be updated.
    pub fn delete_record(&self, id: &RecordId) -> Result<(), EngineError> {
        self.store.delete(id).map_err(EngineError::store)?;
        log::info!("deleted record {id}");
        Ok(())
    }

    /// Current ledger total, sanitised the same way a session would read it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Ledger`] when the ledger cannot be read.
    pub fn stored_score(&self) -> Result<f64, EngineError> {
        self.ledger
            .get()
            .map(numbers::sanitize_score)
            .map_err(EngineError::ledger)
    }
}
