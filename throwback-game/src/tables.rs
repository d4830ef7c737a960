//! Static lookup tables backing the option selectors and feedback text.

/// A ruling power and the inclusive span of years it held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerSpan {
    pub name: &'static str,
    pub start: i32,
    pub end: i32,
}

impl PowerSpan {
    /// Whether `year` falls inside the inclusive `[start, end]` span.
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }
}

/// A region with its display name and the powers registered for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionTable {
    pub key: &'static str,
    pub display: &'static str,
    pub powers: &'static [PowerSpan],
}

const fn span(name: &'static str, start: i32, end: i32) -> PowerSpan {
    PowerSpan { name, start, end }
}

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const COUNTRIES: &[(&str, &str)] = &[
    ("us", "United States"),
    ("uk", "United Kingdom"),
    ("jp", "Japan"),
    ("kr", "South Korea"),
    ("ru", "Russia"),
    ("br", "Brazil"),
    ("in", "India"),
    ("au", "Australia"),
    ("ca", "Canada"),
    ("de", "Germany"),
    ("fr", "France"),
    ("es", "Spain"),
    ("it", "Italy"),
    ("cn", "China"),
    ("mx", "Mexico"),
    ("za", "South Africa"),
    ("se", "Sweden"),
    ("other", "Other Countries"),
];

/// Countries surfaced as quick-pick buttons ahead of the full list.
pub const POPULAR_COUNTRIES: [&str; 5] = ["us", "uk", "jp", "kr", "in"];

pub const MEMES_BY_YEAR: &[(i32, &[&str])] = &[
    (2000, &["Dancing Baby", "Hampster Dance", "All Your Base Are Belong To Us"]),
    (2001, &["Numa Numa Guy", "Badger Badger Badger"]),
    (2002, &["Star Wars Kid", "Salad Fingers"]),
    (2003, &["Strongbad Email", "Banana Phone"]),
    (2004, &["Numa Numa", "Leeroy Jenkins"]),
    (2005, &["Chuck Norris Facts", "Evolution of Dance"]),
    (2006, &["Chocolate Rain", "Leave Britney Alone"]),
    (2007, &["Rickroll", "I Can Has Cheezburger", "Dont Tase Me Bro"]),
    (2008, &["Keyboard Cat", "Charlie Bit My Finger"]),
    (2009, &["David After Dentist", "Nyan Cat", "Kanye Interrupts Taylor"]),
    (2010, &["Double Rainbow", "Bed Intruder", "Hide Yo Kids"]),
    (2011, &["Friday (Rebecca Black)", "Planking", "Occupy Wall Street"]),
    (2012, &["Gangnam Style", "Overly Attached Girlfriend", "Ermahgerd"]),
    (2013, &["Harlem Shake", "Doge", "What Does The Fox Say"]),
    (2014, &["Ice Bucket Challenge", "But Thats None Of My Business", "Just Do It"]),
    (2015, &["Left Shark", "Why You Always Lying", "Netflix and Chill"]),
    (2016, &["Damn Daniel", "Harambe", "Mannequin Challenge"]),
    (2017, &["Salt Bae", "Distracted Boyfriend", "Cash Me Outside"]),
    (2018, &["Tide Pods", "Yanny vs. Laurel", "Fortnite Dances"]),
    (2019, &["Area 51 Raid", "OK Boomer", "Baby Yoda"]),
    (2020, &["Bernie Mittens", "Tiger King", "Nature is Healing"]),
    (2021, &["Bernie Chair", "Ever Given Ship", "Red Flag", "Squid Game"]),
    (2022, &["Wordle", "Will Smith Slap", "Corn Kid", "Letterboxd Guy"]),
    (2023, &["Barbenheimer", "Roman Empire", "Everything Woke", "Talking Mop"]),
    (2024, &["Grimace Shake", "AI-Generated Everything", "Leap Year"]),
];

const GLOBAL_POWERS: &[PowerSpan] = &[
    span("Roman Empire", 27, 476),
    span("Byzantine Empire", 330, 1453),
    span("Mongol Empire", 1206, 1368),
    span("Ottoman Empire", 1299, 1922),
    span("Ming Dynasty", 1368, 1644),
    span("Qing Dynasty", 1644, 1912),
    span("British Empire", 1583, 1997),
    span("Habsburg Dynasty", 1438, 1740),
    span("Spanish Empire", 1492, 1976),
    span("Mughal Empire", 1526, 1857),
    span("Dutch Empire", 1581, 1975),
    span("Russian Empire", 1721, 1917),
    span("Soviet Union", 1922, 1991),
    span("United States", 1776, 2023),
];

const EUROPE_POWERS: &[PowerSpan] = &[
    span("Roman Empire", 27, 476),
    span("Byzantine Empire", 330, 1453),
    span("Carolingian Empire", 800, 888),
    span("Holy Roman Empire", 962, 1806),
    span("Venetian Republic", 697, 1797),
    span("Habsburg Dynasty", 1438, 1740),
    span("Spanish Empire", 1492, 1976),
    span("Ottoman Empire", 1299, 1922),
    span("British Empire", 1583, 1997),
    span("French Empire", 1534, 1980),
    span("Russian Empire", 1721, 1917),
    span("German Empire", 1871, 1918),
    span("Soviet Union", 1922, 1991),
    span("European Union", 1993, 2023),
];

const ASIA_POWERS: &[PowerSpan] = &[
    span("Han Dynasty", -206, 220),
    span("Tang Dynasty", 618, 907),
    span("Song Dynasty", 960, 1279),
    span("Mongol Empire", 1206, 1368),
    span("Yuan Dynasty", 1271, 1368),
    span("Ming Dynasty", 1368, 1644),
    span("Qing Dynasty", 1644, 1912),
    span("Mughal Empire", 1526, 1857),
    span("Joseon Dynasty (Korea)", 1392, 1897),
    span("Tokugawa Shogunate (Japan)", 1603, 1868),
    span("Empire of Japan", 1868, 1947),
    span("Republic of China", 1912, 1949),
    span("Peoples Republic of China", 1949, 2023),
];

const MIDDLE_EAST_POWERS: &[PowerSpan] = &[
    span("Achaemenid Empire", -550, -330),
    span("Sasanian Empire", 224, 651),
    span("Umayyad Caliphate", 661, 750),
    span("Abbasid Caliphate", 750, 1258),
    span("Fatimid Caliphate", 909, 1171),
    span("Seljuk Empire", 1037, 1194),
    span("Ayyubid Dynasty", 1171, 1260),
    span("Mamluk Sultanate", 1250, 1517),
    span("Ottoman Empire", 1299, 1922),
    span("Safavid Dynasty", 1501, 1736),
    span("Qajar Dynasty", 1789, 1925),
    span("Modern Middle Eastern States", 1920, 2023),
];

const AFRICA_POWERS: &[PowerSpan] = &[
    span("Kingdom of Kush", -1070, 350),
    span("Kingdom of Aksum", 100, 940),
    span("Fatimid Caliphate", 909, 1171),
    span("Almoravid Dynasty", 1040, 1147),
    span("Almohad Caliphate", 1121, 1269),
    span("Mali Empire", 1230, 1670),
    span("Songhai Empire", 1464, 1591),
    span("Ethiopian Empire", 1270, 1974),
    span("Kingdom of Kongo", 1390, 1857),
    span("Benin Empire", 1180, 1897),
    span("Ashanti Empire", 1670, 1902),
    span("Zulu Kingdom", 1816, 1897),
    span("European Colonial Powers", 1881, 1975),
    span("Modern African States", 1957, 2023),
];

const AMERICAS_POWERS: &[PowerSpan] = &[
    span("Maya Civilization", -2000, 1697),
    span("Teotihuacan", 100, 550),
    span("Toltec Empire", 900, 1150),
    span("Aztec Empire", 1428, 1521),
    span("Inca Empire", 1438, 1533),
    span("Spanish Colonial Empire", 1492, 1898),
    span("Portuguese Brazil", 1500, 1822),
    span("British North America", 1607, 1783),
    span("United States", 1776, 2023),
    span("First Mexican Empire", 1821, 1823),
    span("Empire of Brazil", 1822, 1889),
    span("Modern Latin American States", 1810, 2023),
];

pub const REGIONS: &[RegionTable] = &[
    RegionTable {
        key: "global",
        display: "Global Overview",
        powers: GLOBAL_POWERS,
    },
    RegionTable {
        key: "europe",
        display: "Europe",
        powers: EUROPE_POWERS,
    },
    RegionTable {
        key: "asia",
        display: "Asia",
        powers: ASIA_POWERS,
    },
    RegionTable {
        key: "middleEast",
        display: "Middle East",
        powers: MIDDLE_EAST_POWERS,
    },
    RegionTable {
        key: "africa",
        display: "Africa",
        powers: AFRICA_POWERS,
    },
    RegionTable {
        key: "americas",
        display: "The Americas",
        powers: AMERICAS_POWERS,
    },
];

/// Name of a 1-based month, or `None` outside 1..=12.
#[must_use]
pub fn month_name(month: u8) -> Option<&'static str> {
    MONTH_NAMES.get(usize::from(month).checked_sub(1)?).copied()
}

/// Display name for a country code.
#[must_use]
pub fn country_name(code: &str) -> Option<&'static str> {
    COUNTRIES
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, name)| *name)
}

/// Memes registered for a single year; empty when the year is unknown.
#[must_use]
pub fn memes_for_year(year: i32) -> &'static [&'static str] {
    MEMES_BY_YEAR
        .iter()
        .find(|(y, _)| *y == year)
        .map(|(_, memes)| *memes)
        .unwrap_or_default()
}

/// Region table for a key.
#[must_use]
pub fn region(key: &str) -> Option<&'static RegionTable> {
    REGIONS.iter().find(|r| r.key == key)
}

/// Display name for a region key, falling back to the key itself.
#[must_use]
pub fn region_display_name(key: &str) -> &str {
    region(key).map_or(key, |r| r.display)
}

/// All region keys in presentation order.
pub fn available_regions() -> impl Iterator<Item = &'static str> {
    REGIONS.iter().map(|r| r.key)
}

/// Render a year with an era suffix: `44 BC` for years at or below zero, `1066 AD` otherwise.
#[must_use]
pub fn format_year(year: i32) -> String {
    if year <= 0 {
        format!("{} BC", year.unsigned_abs())
    } else {
        format!("{year} AD")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_are_one_based() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn country_lookup_covers_popular_picks() {
        for code in POPULAR_COUNTRIES {
            assert!(country_name(code).is_some(), "missing {code}");
        }
        assert_eq!(country_name("kr"), Some("South Korea"));
        assert_eq!(country_name("zz"), None);
    }

    #[test]
    fn meme_years_are_contiguous() {
        let years: Vec<i32> = MEMES_BY_YEAR.iter().map(|(y, _)| *y).collect();
        assert_eq!(years.first(), Some(&2000));
        assert_eq!(years.last(), Some(&2024));
        assert!(years.windows(2).all(|w| w[1] == w[0] + 1));
        assert!(memes_for_year(1999).is_empty());
    }

    #[test]
    fn power_spans_are_ordered() {
        for table in REGIONS {
            for power in table.powers {
                assert!(
                    power.start <= power.end,
                    "{} in {} has an inverted span",
                    power.name,
                    table.key
                );
            }
        }
    }

    #[test]
    fn regions_and_display_names() {
        let keys: Vec<&str> = available_regions().collect();
        assert_eq!(
            keys,
            ["global", "europe", "asia", "middleEast", "africa", "americas"]
        );
        assert_eq!(region_display_name("middleEast"), "Middle East");
        assert_eq!(region_display_name("atlantis"), "atlantis");
    }

    #[test]
    fn format_year_marks_eras() {
        assert_eq!(format_year(-206), "206 BC");
        assert_eq!(format_year(0), "0 BC");
        assert_eq!(format_year(1066), "1066 AD");
    }
}
