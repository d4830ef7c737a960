//! Centralized scoring and presentation constants for Throwback.
//!
//! Multipliers and sentinels live here so the scoring math can only be
//! adjusted through reviewed code changes rather than external assets.

// Session -------------------------------------------------------------------
/// Maximum number of records fetched into a session snapshot.
pub const SNAPSHOT_LIMIT: usize = 20;

// Scoring multipliers ---------------------------------------------------------
pub(crate) const PERFECT_TIMING_MULT: f64 = 1.5;
pub(crate) const RIGHT_ERA_MULT: f64 = 0.3;
pub(crate) const ORIGIN_MATCH_MULT: f64 = 0.5;
pub(crate) const MONTHS_PER_YEAR: u32 = 12;

// Period resolver -------------------------------------------------------------
/// Labels borrowed from each neighbouring year when listing meme options.
pub(crate) const NEIGHBOUR_YEAR_TAKE: usize = 2;
/// Shown when no meme is registered near the selected period.
pub const NO_MEME_OPTIONS: &str = "No memes found for this period";
/// Shown when no ruling power is registered for the selected year and region.
pub const NO_POWER_OPTIONS: &str = "No major powers in database for this period";

// Axes ------------------------------------------------------------------------
/// Secondary axis key carrying a meme's country of origin.
pub const ORIGIN_AXIS: &str = "country";
/// Region used when none is selected or the selection is unrecognized.
pub const GLOBAL_REGION: &str = "global";
/// Label used when a record carries no answer for the selected axis.
pub const UNKNOWN_LABEL: &str = "Unknown";

// Admin -----------------------------------------------------------------------
pub(crate) const MEDIA_REF_PATTERN: &str = r"^[A-Za-z0-9_-]{11}$";
pub(crate) const MEDIA_WATCH_BASE: &str = "https://www.youtube.com/watch?v=";
pub(crate) const MEDIA_THUMB_BASE: &str = "https://img.youtube.com/vi/";
