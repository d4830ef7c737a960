//! Guessable records: the ground truth behind each round.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{MEDIA_THUMB_BASE, MEDIA_WATCH_BASE};

/// Opaque identifier assigned by the record store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A year with an optional 1-based month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimePoint {
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
}

impl TimePoint {
    #[must_use]
    pub const fn year(year: i32) -> Self {
        Self { year, month: None }
    }

    #[must_use]
    pub const fn year_month(year: i32, month: u8) -> Self {
        Self {
            year,
            month: Some(month),
        }
    }
}

/// A validated record ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub media_ref: String,
    pub time_point: TimePoint,
    pub primary_label: String,
    #[serde(default)]
    pub secondary: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewRecord {
    /// Attach the store-assigned identity and creation stamp.
    #[must_use]
    pub fn into_record(self, id: RecordId, created_at: i64) -> GuessableRecord {
        GuessableRecord {
            id,
            media_ref: self.media_ref,
            time_point: self.time_point,
            primary_label: self.primary_label,
            secondary: self.secondary,
            description: self.description,
            created_at,
        }
    }
}

/// A persisted record as seen by the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessableRecord {
    pub id: RecordId,
    pub media_ref: String,
    pub time_point: TimePoint,
    pub primary_label: String,
    /// Axis name to label, e.g. `country -> jp` or `europe -> Holy Roman Empire`.
    #[serde(default)]
    pub secondary: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation stamp (milliseconds), used only for newest-first ordering.
    #[serde(default)]
    pub created_at: i64,
}

impl GuessableRecord {
    /// Label recorded for an axis, if any. Blank labels count as absent.
    #[must_use]
    pub fn secondary_label(&self, axis: &str) -> Option<&str> {
        self.secondary
            .get(axis)
            .map(String::as_str)
            .filter(|label| !label.trim().is_empty())
    }

    #[must_use]
    pub fn watch_url(&self) -> String {
        watch_url(&self.media_ref)
    }

    #[must_use]
    pub fn thumbnail_url(&self) -> String {
        thumbnail_url(&self.media_ref)
    }
}

/// Public watch page for a media reference.
#[must_use]
pub fn watch_url(media_ref: &str) -> String {
    format!("{MEDIA_WATCH_BASE}{media_ref}")
}

/// Medium-quality thumbnail for a media reference.
#[must_use]
pub fn thumbnail_url(media_ref: &str) -> String {
    format!("{MEDIA_THUMB_BASE}{media_ref}/mqdefault.jpg")
}

/// Sort newest first, breaking ties by id so the order is stable.
pub fn sort_newest_first(records: &mut [GuessableRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
}
