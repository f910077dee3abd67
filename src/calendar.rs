//! Calendar names and the validated month/weekday types used by the filters.
//!
//! Both types wrap a conventional 1-based number (January = 1, Monday = 1)
//! and always resolve to the canonical English name, so a selection can never
//! hold a number/name pair that disagrees.

/// Canonical month names, January first.
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

/// Canonical weekday names, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A calendar month, 1 (January) through 12 (December).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month(u8);

impl Month {
    pub fn new(number: u8) -> Option<Self> {
        (1..=12).contains(&number).then_some(Self(number))
    }

    /// Conventional 1-based month number.
    pub fn number(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES
            .get(usize::from(self.0) - 1)
            .copied()
            .unwrap_or("")
    }

    /// Standard three-letter abbreviation, lowercase ("jan", "feb", ...).
    ///
    /// For English month names the abbreviation is always the first three
    /// letters of the full name.
    pub fn abbreviation(self) -> String {
        self.name().chars().take(3).collect::<String>().to_lowercase()
    }

    /// Parse normalized input as a full month name or its standard
    /// three-letter abbreviation.
    pub fn parse(normalized: &str) -> Option<Self> {
        MONTH_NAMES
            .iter()
            .position(|name| {
                let lower = name.to_lowercase();
                normalized == lower || normalized == abbreviate(&lower)
            })
            .and_then(|index| u8::try_from(index + 1).ok())
            .map(Self)
    }

    pub fn all() -> Vec<Self> {
        (1..=12).map(Self).collect()
    }
}

/// A day of the week, 1 (Monday) through 7 (Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weekday(u8);

impl Weekday {
    pub fn new(number: u8) -> Option<Self> {
        (1..=7).contains(&number).then_some(Self(number))
    }

    /// Conventional 1-based day number, 1 = Monday.
    pub fn number(self) -> u8 {
        self.0
    }

    /// The 0-based value stored in the trip table's `day_of_week` column
    /// (0 = Monday ... 6 = Sunday).
    pub fn zero_based(self) -> u8 {
        self.0 - 1
    }

    /// Inverse of [`Weekday::zero_based`].
    pub fn from_zero_based(value: u8) -> Option<Self> {
        Self::new(value.checked_add(1)?)
    }

    pub fn name(self) -> &'static str {
        WEEKDAY_NAMES
            .get(usize::from(self.0) - 1)
            .copied()
            .unwrap_or("")
    }

    /// Parse normalized input by comparing its first three characters with
    /// each weekday's first three characters. Input shorter than three
    /// characters never matches.
    pub fn parse_prefix(normalized: &str) -> Option<Self> {
        let prefix: String = normalized.chars().take(3).collect();
        if prefix.chars().count() < 3 {
            return None;
        }
        WEEKDAY_NAMES
            .iter()
            .position(|name| abbreviate(&name.to_lowercase()) == prefix)
            .and_then(|index| u8::try_from(index + 1).ok())
            .map(Self)
    }
}

fn abbreviate(lower: &str) -> String {
    lower.chars().take(3).collect()
}
