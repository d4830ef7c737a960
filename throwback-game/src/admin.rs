//! Admin workflow: validate drafts before they reach the record store and
//! summarise stored records for listing.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{MEDIA_REF_PATTERN, ORIGIN_AXIS, UNKNOWN_LABEL};
use crate::error::ValidationError;
use crate::record::{GuessableRecord, NewRecord, TimePoint};
use crate::scoring::describe_time_point;
use crate::tables::{country_name, format_year};
use crate::variant::GameVariant;

static MEDIA_REF: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(MEDIA_REF_PATTERN).ok());

/// Raw admin form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub media_ref: String,
    pub year: i32,
    #[serde(default)]
    pub month: Option<u8>,
    pub primary_label: String,
    #[serde(default)]
    pub secondary: BTreeMap<String, String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Whether a media reference has the 11-character token shape.
#[must_use]
pub fn is_valid_media_ref(media_ref: &str) -> bool {
    MEDIA_REF
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(media_ref))
}

impl RecordDraft {
    /// Check the draft against the variant's rules and produce a storable record.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, in form order: media
    /// reference, label, year, month, country.
    pub fn validate(&self, variant: GameVariant) -> Result<NewRecord, ValidationError> {
        let media_ref = self.media_ref.trim();
        if !is_valid_media_ref(media_ref) {
            return Err(ValidationError::InvalidMediaRef(self.media_ref.clone()));
        }

        let primary_label = self.primary_label.trim();
        if primary_label.is_empty() {
            return Err(ValidationError::MissingLabel);
        }

        let range = variant.year_range();
        if !range.contains(&self.year) {
            return Err(ValidationError::YearOutOfRange {
                year: self.year,
                min: *range.start(),
                max: *range.end(),
            });
        }

        let month = match (self.month, variant.uses_month()) {
            (Some(m), _) if !(1..=12).contains(&m) => return Err(ValidationError::InvalidMonth(m)),
            (None, true) => return Err(ValidationError::MissingMonth),
            (month, true) => month,
            (_, false) => None,
        };

        let secondary: BTreeMap<String, String> = self
            .secondary
            .iter()
            .map(|(axis, label)| (axis.trim().to_string(), label.trim().to_string()))
            .filter(|(axis, label)| !axis.is_empty() && !label.is_empty())
            .collect();

        if variant == GameVariant::Memes
            && let Some(code) = secondary.get(ORIGIN_AXIS)
            && country_name(code).is_none()
        {
            return Err(ValidationError::UnknownCountry(code.clone()));
        }

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        Ok(NewRecord {
            media_ref: media_ref.to_string(),
            time_point: TimePoint {
                year: self.year,
                month,
            },
            primary_label: primary_label.to_string(),
            secondary,
            description,
        })
    }
}

/// One-line listing summary, e.g. `June 2015 • United States` or `1500 AD`.
#[must_use]
pub fn summarize(record: &GuessableRecord, variant: GameVariant) -> String {
    match variant {
        GameVariant::Memes => {
            let origin = record
                .secondary_label(ORIGIN_AXIS)
                .map_or(UNKNOWN_LABEL, |code| country_name(code).unwrap_or(code));
            format!("{} • {origin}", describe_time_point(record.time_point))
        }
        GameVariant::History => format_year(record.time_point.year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordId;

    fn meme_draft() -> RecordDraft {
        RecordDraft {
            media_ref: "dQw4w9WgXcQ".to_string(),
            year: 2007,
            month: Some(5),
            primary_label: " Rickroll ".to_string(),
            secondary: BTreeMap::from([("country".to_string(), "us".to_string())]),
            description: Some("   ".to_string()),
        }
    }

    #[test]
    fn media_ref_shape() {
        assert!(is_valid_media_ref("dQw4w9WgXcQ"));
        assert!(is_valid_media_ref("a_b-c_d-e_f"));
        assert!(!is_valid_media_ref("dQw4w9WgXc"));
        assert!(!is_valid_media_ref("dQw4w9WgXcQQ"));
        assert!(!is_valid_media_ref("dQw4w9WgXc!"));
    }

    #[test]
    fn valid_meme_draft_is_normalized() {
        let record = meme_draft().validate(GameVariant::Memes).unwrap();
        assert_eq!(record.primary_label, "Rickroll");
        assert_eq!(record.time_point, TimePoint::year_month(2007, 5));
        assert_eq!(record.description, None);
    }

    #[test]
    fn rejects_bad_media_ref_first() {
        let draft = RecordDraft {
            media_ref: "nope".to_string(),
            primary_label: String::new(),
            ..meme_draft()
        };
        assert_eq!(
            draft.validate(GameVariant::Memes),
            Err(ValidationError::InvalidMediaRef("nope".to_string()))
        );
    }

    #[test]
    fn rejects_blank_label() {
        let draft = RecordDraft {
            primary_label: "   ".to_string(),
            ..meme_draft()
        };
        assert_eq!(
            draft.validate(GameVariant::Memes),
            Err(ValidationError::MissingLabel)
        );
    }

    #[test]
    fn month_rules_depend_on_variant() {
        let missing = RecordDraft {
            month: None,
            ..meme_draft()
        };
        assert_eq!(
            missing.validate(GameVariant::Memes),
            Err(ValidationError::MissingMonth)
        );
        let bad = RecordDraft {
            month: Some(13),
            ..meme_draft()
        };
        assert_eq!(
            bad.validate(GameVariant::Memes),
            Err(ValidationError::InvalidMonth(13))
        );

        let history = RecordDraft {
            year: 1500,
            month: Some(4),
            secondary: BTreeMap::from([("europe".to_string(), "Holy Roman Empire".to_string())]),
            ..meme_draft()
        }
        .validate(GameVariant::History)
        .unwrap();
        assert_eq!(history.time_point, TimePoint::year(1500));
    }

    #[test]
    fn year_must_fit_variant_range() {
        let draft = RecordDraft {
            year: 1990,
            ..meme_draft()
        };
        assert_eq!(
            draft.validate(GameVariant::Memes),
            Err(ValidationError::YearOutOfRange {
                year: 1990,
                min: 1999,
                max: 2024
            })
        );
    }

    #[test]
    fn meme_country_must_be_known() {
        let draft = RecordDraft {
            secondary: BTreeMap::from([("country".to_string(), "xx".to_string())]),
            ..meme_draft()
        };
        assert_eq!(
            draft.validate(GameVariant::Memes),
            Err(ValidationError::UnknownCountry("xx".to_string()))
        );
    }

    #[test]
    fn summaries_use_display_names() {
        let meme = meme_draft()
            .validate(GameVariant::Memes)
            .unwrap()
            .into_record(RecordId::new("m"), 1);
        assert_eq!(summarize(&meme, GameVariant::Memes), "May 2007 • United States");

        let era = RecordDraft {
            year: -44,
            month: None,
            secondary: BTreeMap::from([
                ("europe".to_string(), "Roman Empire".to_string()),
                ("asia".to_string(), "Han Dynasty".to_string()),
            ]),
            ..meme_draft()
        }
        .validate(GameVariant::History)
        .unwrap()
        .into_record(RecordId::new("h"), 2);
        assert_eq!(summarize(&era, GameVariant::History), "44 BC");
    }
}
