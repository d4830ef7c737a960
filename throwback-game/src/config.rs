//! Game configuration: variant, difficulty tiers, snapshot size and per-round defaults.
use serde::{Deserialize, Serialize};

use crate::constants::{GLOBAL_REGION, SNAPSHOT_LIMIT};
use crate::difficulty::{DifficultyProfile, DifficultyTable, DifficultyTier};
use crate::record::TimePoint;
use crate::scoring::Guess;
use crate::variant::GameVariant;

/// Selector values each new round starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessDefaults {
    pub year: i32,
    #[serde(default)]
    pub month: Option<u8>,
    #[serde(default)]
    pub axis: Option<String>,
    #[serde(default)]
    pub secondary: Option<String>,
}

impl GuessDefaults {
    #[must_use]
    pub fn for_variant(variant: GameVariant) -> Self {
        match variant {
            GameVariant::Memes => Self {
                year: 2015,
                month: Some(6),
                axis: None,
                secondary: Some("us".to_string()),
            },
            GameVariant::History => Self {
                year: 1500,
                month: None,
                axis: Some(GLOBAL_REGION.to_string()),
                secondary: None,
            },
        }
    }

    /// A fresh guess with no primary selection.
    #[must_use]
    pub fn to_guess(&self) -> Guess {
        Guess {
            time: TimePoint {
                year: self.year,
                month: self.month,
            },
            primary: None,
            axis: self.axis.clone(),
            secondary: self.secondary.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub variant: GameVariant,
    pub snapshot_limit: usize,
    pub tiers: DifficultyTable,
    pub default_difficulty: DifficultyTier,
    pub defaults: GuessDefaults,
}

/// On-disk shape: everything but the variant may be omitted.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    variant: GameVariant,
    #[serde(default)]
    snapshot_limit: Option<usize>,
    #[serde(default)]
    tiers: Option<DifficultyTable>,
    #[serde(default)]
    default_difficulty: Option<DifficultyTier>,
    #[serde(default)]
    defaults: Option<GuessDefaults>,
}

impl GameConfig {
    #[must_use]
    pub fn for_variant(variant: GameVariant) -> Self {
        Self {
            variant,
            snapshot_limit: SNAPSHOT_LIMIT,
            tiers: DifficultyTable::for_variant(variant),
            default_difficulty: DifficultyTier::default(),
            defaults: GuessDefaults::for_variant(variant),
        }
    }

    #[must_use]
    pub fn memes() -> Self {
        Self::for_variant(GameVariant::Memes)
    }

    #[must_use]
    pub fn history() -> Self {
        Self::for_variant(GameVariant::History)
    }

    /// Load configuration from JSON, filling omitted sections from the
    /// variant defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or names an unknown variant.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: ConfigFile = serde_json::from_str(json)?;
        let base = Self::for_variant(file.variant);
        Ok(Self {
            variant: file.variant,
            snapshot_limit: file.snapshot_limit.unwrap_or(base.snapshot_limit),
            tiers: file.tiers.unwrap_or(base.tiers),
            default_difficulty: file.default_difficulty.unwrap_or(base.default_difficulty),
            defaults: file.defaults.unwrap_or(base.defaults),
        })
    }

    #[must_use]
    pub const fn profile(&self, tier: DifficultyTier) -> &DifficultyProfile {
        self.tiers.profile(tier)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::memes()
    }
}
