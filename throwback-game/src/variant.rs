use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Which flavour of the game is being played.
///
/// The variant picks the lookup tables, the scoring model and the
/// guessable year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameVariant {
    /// Internet memes: year + month, meme name, country of origin.
    #[default]
    Memes,
    /// World history: year, ruling power per region.
    History,
}

impl GameVariant {
    pub const ALL: [Self; 2] = [Self::Memes, Self::History];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Memes => "memes",
            Self::History => "history",
        }
    }

    /// Years a guess (or an admin entry) may use.
    #[must_use]
    pub const fn year_range(self) -> RangeInclusive<i32> {
        match self {
            Self::Memes => 1999..=2024,
            Self::History => -3000..=2023,
        }
    }

    /// Whether records and guesses carry a month.
    #[must_use]
    pub const fn uses_month(self) -> bool {
        matches!(self, Self::Memes)
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl std::fmt::Display for GameVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
