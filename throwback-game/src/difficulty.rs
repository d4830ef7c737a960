//! Difficulty tiers: named tolerance and reward profiles.
use serde::{Deserialize, Serialize};

use crate::variant::GameVariant;

/// One of the four selectable tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl DifficultyTier {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Tolerance and reward parameters for a tier.
///
/// `year_tolerance` is always in years. `month_tolerance` only matters for
/// month-granular scoring and is zero for year-only tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub label: String,
    pub year_tolerance: u32,
    #[serde(default)]
    pub month_tolerance: u32,
    pub points: u32,
}

impl DifficultyProfile {
    #[must_use]
    pub fn new(label: &str, year_tolerance: u32, month_tolerance: u32, points: u32) -> Self {
        Self {
            label: label.to_string(),
            year_tolerance,
            month_tolerance,
            points,
        }
    }
}

/// The full four-tier table for a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub easy: DifficultyProfile,
    pub medium: DifficultyProfile,
    pub hard: DifficultyProfile,
    pub expert: DifficultyProfile,
}

impl DifficultyTable {
    /// Month-granular tiers used by the meme game.
    #[must_use]
    pub fn memes() -> Self {
        Self {
            easy: DifficultyProfile::new("Easy", 3, 6, 1),
            medium: DifficultyProfile::new("Medium", 2, 3, 2),
            hard: DifficultyProfile::new("Hard", 1, 2, 3),
            expert: DifficultyProfile::new("Expert", 0, 1, 5),
        }
    }

    /// Year-only tiers used by the history game.
    #[must_use]
    pub fn history() -> Self {
        Self {
            easy: DifficultyProfile::new("Easy", 100, 0, 1),
            medium: DifficultyProfile::new("Medium", 50, 0, 2),
            hard: DifficultyProfile::new("Hard", 25, 0, 3),
            expert: DifficultyProfile::new("Expert", 10, 0, 5),
        }
    }

    #[must_use]
    pub fn for_variant(variant: GameVariant) -> Self {
        match variant {
            GameVariant::Memes => Self::memes(),
            GameVariant::History => Self::history(),
        }
    }

    #[must_use]
    pub const fn profile(&self, tier: DifficultyTier) -> &DifficultyProfile {
        match tier {
            DifficultyTier::Easy => &self.easy,
            DifficultyTier::Medium => &self.medium,
            DifficultyTier::Hard => &self.hard,
            DifficultyTier::Expert => &self.expert,
        }
    }

    /// Tiers paired with their profiles, easiest first.
    pub fn iter(&self) -> impl Iterator<Item = (DifficultyTier, &DifficultyProfile)> {
        DifficultyTier::ALL
            .into_iter()
            .map(move |tier| (tier, self.profile(tier)))
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::memes()
    }
}
