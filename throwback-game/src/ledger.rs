//! Durable running score across rounds.
use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

/// Scalar score persisted outside the process lifetime.
/// Platform-specific implementations should provide this.
pub trait ScoreLedger {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Stored score, or 0 when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value cannot be read.
    fn get(&self) -> Result<f64, Self::Error>;

    /// Overwrite the stored score.
    ///
    /// # Errors
    ///
    /// Returns an error if the score cannot be written.
    fn set(&self, score: f64) -> Result<(), Self::Error>;
}

/// In-memory ledger; clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    score: Rc<Cell<f64>>,
}

impl MemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn starting_at(score: f64) -> Self {
        Self {
            score: Rc::new(Cell::new(score)),
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.score.get()
    }
}

impl ScoreLedger for MemoryLedger {
    type Error = Infallible;

    fn get(&self) -> Result<f64, Self::Error> {
        Ok(self.score.get())
    }

    fn set(&self, score: f64) -> Result<(), Self::Error> {
        self.score.set(score);
        Ok(())
    }
}
