//! Period resolver: which categorical answers are plausible for a point in time.
//!
//! The option lists feed the selectors, so the resolver never returns an empty
//! list. When nothing matches, a single sentinel label is returned instead.

use crate::constants::{GLOBAL_REGION, NEIGHBOUR_YEAR_TAKE, NO_MEME_OPTIONS, NO_POWER_OPTIONS};
use crate::record::TimePoint;
use crate::tables::{self, RegionTable};
use crate::variant::GameVariant;

/// Meme names plausible for a year: the year's own memes first, then up to
/// two from the previous year and up to two from the next, deduplicated.
///
/// The month is accepted for symmetry with the time selector; the tables are
/// only keyed by year.
#[must_use]
pub fn meme_options(year: i32, _month: Option<u8>) -> Vec<String> {
    let current = tables::memes_for_year(year).iter();
    let previous = tables::memes_for_year(year.saturating_sub(1))
        .iter()
        .take(NEIGHBOUR_YEAR_TAKE);
    let next = tables::memes_for_year(year.saturating_add(1))
        .iter()
        .take(NEIGHBOUR_YEAR_TAKE);

    let mut options: Vec<String> = Vec::new();
    for meme in current.chain(previous).chain(next) {
        if !options.iter().any(|existing| existing == meme) {
            options.push((*meme).to_string());
        }
    }

    if options.is_empty() {
        options.push(NO_MEME_OPTIONS.to_string());
    }
    options
}

/// Powers whose inclusive span contains `year` in the given region, falling
/// back to the global table when the region is unknown.
#[must_use]
pub fn power_options(year: i32, region: &str) -> Vec<String> {
    let mut options: Vec<String> = resolve_region(region)
        .powers
        .iter()
        .filter(|power| power.contains(year))
        .map(|power| power.name.to_string())
        .collect();

    if options.is_empty() {
        options.push(NO_POWER_OPTIONS.to_string());
    }
    options
}

/// Dispatch to the resolver matching the variant. `axis` is the region for
/// history and is ignored for memes.
#[must_use]
pub fn options_for(variant: GameVariant, time: TimePoint, axis: Option<&str>) -> Vec<String> {
    match variant {
        GameVariant::Memes => meme_options(time.year, time.month),
        GameVariant::History => power_options(time.year, axis.unwrap_or(GLOBAL_REGION)),
    }
}

/// Keep a selection only while it is still offered; otherwise reset it.
#[must_use]
pub fn reconcile_selection(selection: Option<String>, options: &[String]) -> Option<String> {
    selection.filter(|chosen| options.iter().any(|option| option == chosen))
}

/// Whether a label is one of the "nothing here" placeholders.
#[must_use]
pub fn is_sentinel(label: &str) -> bool {
    label == NO_MEME_OPTIONS || label == NO_POWER_OPTIONS
}

fn resolve_region(region: &str) -> &'static RegionTable {
    tables::region(region)
        .or_else(|| tables::region(GLOBAL_REGION))
        .unwrap_or(&tables::REGIONS[0])
}
