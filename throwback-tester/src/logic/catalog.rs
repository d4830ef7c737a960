//! Built-in record catalog used to seed in-memory stores for simulation.
use std::collections::BTreeMap;

use throwback_game::{GameVariant, NewRecord, TimePoint};

const MEMES: &[(&str, i32, u8, &str, &str)] = &[
    ("dQw4w9WgXcQ", 2007, 5, "Rickroll", "us"),
    ("9bZkp7q19f0", 2012, 7, "Gangnam Style", "kr"),
    ("QH2-TGUlwu4", 2009, 4, "Nyan Cat", "jp"),
    ("OQSNhk5ICTI", 2010, 1, "Double Rainbow", "us"),
    ("KmtzQCSh6xk", 2011, 2, "Friday (Rebecca Black)", "us"),
    ("8UFIYGkROII", 2013, 2, "Harlem Shake", "au"),
    ("_OBlgSz8sSM", 2008, 1, "Keyboard Cat", "us"),
    ("jofNR_WkoCE", 2013, 9, "What Does The Fox Say", "se"),
];

const HISTORY: &[(&str, i32, &str, &[(&str, &str)])] = &[
    (
        "Qn5QKhQcJkM",
        -44,
        "Assassination of Julius Caesar",
        &[("asia", "Han Dynasty")],
    ),
    (
        "a1B2c3D4e5F",
        800,
        "Coronation of Charlemagne",
        &[("europe", "Carolingian Empire"), ("global", "Byzantine Empire")],
    ),
    (
        "mG7x_Hq2LpE",
        1300,
        "Silk Road Caravans",
        &[("asia", "Yuan Dynasty"), ("middleEast", "Mamluk Sultanate")],
    ),
    (
        "Zp0-Lk9YtRw",
        1492,
        "Fall of Granada",
        &[("europe", "Spanish Empire"), ("americas", "Aztec Empire")],
    ),
    (
        "Vb3nQ8wErTy",
        1600,
        "Battle of Sekigahara",
        &[("asia", "Ming Dynasty"), ("africa", "Ethiopian Empire")],
    ),
    (
        "Hs6dJ2kLmNo",
        1871,
        "Unification of Germany",
        &[("europe", "German Empire"), ("global", "British Empire")],
    ),
];

/// Valid drafts for a variant, oldest entry first.
pub fn catalog(variant: GameVariant) -> Vec<NewRecord> {
    match variant {
        GameVariant::Memes => MEMES
            .iter()
            .map(|(media_ref, year, month, label, country)| NewRecord {
                media_ref: (*media_ref).to_string(),
                time_point: TimePoint::year_month(*year, *month),
                primary_label: (*label).to_string(),
                secondary: BTreeMap::from([("country".to_string(), (*country).to_string())]),
                description: None,
            })
            .collect(),
        GameVariant::History => HISTORY
            .iter()
            .map(|(media_ref, year, label, powers)| NewRecord {
                media_ref: (*media_ref).to_string(),
                time_point: TimePoint::year(*year),
                primary_label: (*label).to_string(),
                secondary: powers
                    .iter()
                    .map(|(region, power)| ((*region).to_string(), (*power).to_string()))
                    .collect(),
                description: None,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use throwback_game::{RecordDraft, is_valid_media_ref, options_for};

    #[test]
    fn catalog_entries_pass_admin_validation() {
        for variant in GameVariant::ALL {
            for record in catalog(variant) {
                assert!(is_valid_media_ref(&record.media_ref), "{}", record.media_ref);
                let draft = RecordDraft {
                    media_ref: record.media_ref.clone(),
                    year: record.time_point.year,
                    month: record.time_point.month,
                    primary_label: record.primary_label.clone(),
                    secondary: record.secondary.clone(),
                    description: None,
                };
                assert!(draft.validate(variant).is_ok(), "{}", record.primary_label);
            }
        }
    }

    #[test]
    fn catalog_answers_are_offered_at_their_period() {
        for record in catalog(GameVariant::Memes) {
            let options = options_for(GameVariant::Memes, record.time_point, None);
            assert!(options.contains(&record.primary_label), "{}", record.primary_label);
        }
        for record in catalog(GameVariant::History) {
            for (region, power) in &record.secondary {
                let options = options_for(GameVariant::History, record.time_point, Some(region));
                assert!(options.contains(power), "{power} in {region}");
            }
        }
    }
}
