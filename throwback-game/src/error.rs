//! Error taxonomy shared by the engine, the admin workflow and the session.

/// Boxed error raised by an external collaborator (record store or ledger).
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Malformed admin input. Nothing is persisted when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid media reference \"{0}\". Should be 11 characters of A-Z, a-z, 0-9, '_' or '-'.")]
    InvalidMediaRef(String),
    #[error("Please provide the answer label.")]
    MissingLabel,
    #[error("A month is required for this game.")]
    MissingMonth,
    #[error("Month {0} is out of range (1-12).")]
    InvalidMonth(u8),
    #[error("Year {year} is outside {min}..={max}.")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
    #[error("Unknown country code \"{0}\".")]
    UnknownCountry(String),
}

/// The one-time snapshot load failed.
#[derive(Debug, thiserror::Error)]
#[error("Failed to load videos: {source}")]
pub struct FetchError {
    #[source]
    pub source: CollaboratorError,
}

/// Why a session could not start.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("There are no videos available to play.")]
    EmptyCollection,
}

/// A play action that is not valid in the current round phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RoundError {
    #[error("This round has already been revealed.")]
    AlreadyRevealed,
    #[error("Submit a guess before moving on.")]
    StillGuessing,
    #[error("Select an answer before submitting.")]
    MissingSelection,
    #[error("That answer is not available for the selected period.")]
    UnavailableOption,
    #[error("Year {year} is outside {min}..={max}.")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
    #[error("Month {0} is out of range (1-12).")]
    MonthOutOfRange(u8),
}

/// Failure surfaced by [`crate::GameEngine`] and [`crate::PlaySession`] operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error("record store error: {0}")]
    Store(#[source] CollaboratorError),
    #[error("score ledger error: {0}")]
    Ledger(#[source] CollaboratorError),
}

impl EngineError {
    pub(crate) fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }

    pub(crate) fn ledger<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Ledger(Box::new(err))
    }
}
