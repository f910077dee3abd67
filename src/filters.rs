//! Interactive collection of the city/month/day filter selection.
//!
//! Each collector loops until it gets a usable answer: input is normalized,
//! matched against the known values (with typo correction and prefix
//! matching where the prompt allows it), and anything else is reported with
//! a hint and asked again. Cancellation is never decided here; it propagates
//! to the session driver as [`InputError::Cancelled`](crate::input::InputError).

use crate::calendar::{Month, Weekday};
use crate::catalog::{Catalog, City};
use crate::input::{LineSource, PROMPT, normalize};
use crate::utils::title_case;
use anyhow::Result;
use std::fmt;

/// Month selection: everything, or one specific month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Month(Month),
}

impl MonthFilter {
    pub fn month(self) -> Option<Month> {
        match self {
            Self::All => None,
            Self::Month(month) => Some(month),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Month(month) => write!(f, "{}", month.name()),
        }
    }
}

/// Day-of-week selection: everything, or one specific weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Day(Weekday),
}

impl DayFilter {
    pub fn day(self) -> Option<Weekday> {
        match self {
            Self::All => None,
            Self::Day(day) => Some(day),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Day(day) => write!(f, "{}", day.name()),
        }
    }
}

/// The complete filter selection for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripFilters {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl fmt::Display for TripFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "City - {}, Month - {}, Day of the week - {}",
            title_case(self.city.name()),
            self.month,
            self.day
        )
    }
}

/// Ask for a city until the input resolves against the catalog.
///
/// Resolution order: exact canonical name, then the typo table, then a
/// three-character prefix match. Corrections are announced so the user can
/// see what their input was taken to mean.
///
/// # Errors
///
/// Propagates cancellation or terminal failure from the line source.
pub fn collect_city(catalog: &Catalog, lines: &mut dyn LineSource) -> Result<City> {
    let available = catalog.city_names().join(", ");
    loop {
        println!("\nWhich city would you like to analyse? Data currently available for {available}");
        let tidy = normalize(&lines.read_line(PROMPT)?);
        if tidy.is_empty() {
            println!("Apologies, I didn't understand that. Data currently available for {available}");
            continue;
        }

        let corrected = match catalog.correct_typo(&tidy) {
            Some(canonical) => {
                println!("City identified: {tidy} >>> {}", title_case(canonical));
                canonical.to_owned()
            }
            None => tidy.clone(),
        };

        let city = catalog.find(&corrected).or_else(|| {
            let matched = catalog.prefix_match(&corrected)?;
            println!("City identified: {tidy} >>> {}", title_case(matched.name()));
            Some(matched)
        });

        match city {
            Some(city) => {
                println!("City selected: {}", title_case(city.name()));
                tracing::info!("city selected: {}", city.name());
                return Ok(city);
            }
            None => {
                println!("Apologies, data only currently available for {available}");
            }
        }
    }
}

/// Ask for a month restricted to `universe` (pass [`Month::all`] for no
/// restriction), or the literal "all" for no month filter.
///
/// A valid calendar month that is not in the universe is rejected like any
/// other unrecognised input; the number carried by an accepted month is its
/// position in the full twelve-month year, not in the universe.
///
/// # Errors
///
/// Propagates cancellation or terminal failure from the line source.
pub fn collect_month(lines: &mut dyn LineSource, universe: &[Month]) -> Result<MonthFilter> {
    loop {
        println!("\nWhich month would you like to analyse?");
        let tidy = normalize(&lines.read_line(PROMPT)?);
        if tidy == "all" {
            println!("Month selected: All");
            return Ok(MonthFilter::All);
        }

        let matched = universe
            .iter()
            .copied()
            .find(|month| tidy == month.name().to_lowercase() || tidy == month.abbreviation());
        match matched {
            Some(month) => {
                println!(
                    "Month selected: {} (month number: {})",
                    month.name(),
                    month.number()
                );
                return Ok(MonthFilter::Month(month));
            }
            None => {
                println!(
                    "Apologies, I didn't understand that. Please enter an available calendar month in English, e.g. January"
                );
            }
        }
    }
}

/// Ask for a day of the week, or the literal "all" for no day filter.
///
/// # Errors
///
/// Propagates cancellation or terminal failure from the line source.
pub fn collect_day(lines: &mut dyn LineSource) -> Result<DayFilter> {
    loop {
        println!("\nWhich day would you like to analyse?");
        let tidy = normalize(&lines.read_line(PROMPT)?);
        if tidy == "all" {
            println!("Day selected: All");
            return Ok(DayFilter::All);
        }

        match Weekday::parse_prefix(&tidy) {
            Some(day) => {
                println!("Day selected: {} (weekday: {})", day.name(), day.number());
                return Ok(DayFilter::Day(day));
            }
            None => {
                println!(
                    "Apologies, not understood. Please enter a day of the week in English, e.g. Monday"
                );
            }
        }
    }
}

/// Collect the full filter selection: city first, then the filter mode.
///
/// The mode answer is checked in order: the substring "mon" selects a
/// month-only filter, "day" a day-only filter, "both" collects both, and a
/// standalone word "neither", "none" or "no" applies no filter at all.
///
/// # Errors
///
/// Propagates cancellation or terminal failure from the line source.
pub fn collect_filters(catalog: &Catalog, lines: &mut dyn LineSource) -> Result<TripFilters> {
    let city = collect_city(catalog, lines)?;

    loop {
        println!("\nWould you like to filter by month, day, both or neither?");
        let mode = normalize(&lines.read_line(PROMPT)?);

        let (month, day) = if mode.contains("mon") {
            println!("Month filter selected");
            (collect_month(lines, &Month::all())?, DayFilter::All)
        } else if mode.contains("day") {
            println!("Day filter selected");
            (MonthFilter::All, collect_day(lines)?)
        } else if mode.contains("both") {
            println!("Both filters selected");
            (collect_month(lines, &Month::all())?, collect_day(lines)?)
        } else if mode.split_whitespace().any(|word| matches!(word, "neither" | "none" | "no")) {
            println!("No filters selected");
            (MonthFilter::All, DayFilter::All)
        } else {
            println!("No filters recognised, options are 'month', 'day', 'both' or 'neither'");
            continue;
        };

        let filters = TripFilters { city, month, day };
        tracing::info!("filters collected: {}", filters);
        println!("{}", "-".repeat(40));
        return Ok(filters);
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]

    use super::*;
    use crate::input::{InputError, ScriptedLines};

    fn catalog() -> Catalog {
        Catalog::default()
    }

    fn month(number: u8) -> Month {
        Month::new(number).unwrap()
    }

    fn assert_cancelled(err: &anyhow::Error) {
        assert!(
            matches!(err.downcast_ref::<InputError>(), Some(InputError::Cancelled)),
            "expected cancellation, got: {err:#}"
        );
    }

    #[test]
    fn city_typo_corrects_to_canonical() {
        let mut lines = ScriptedLines::new(["chicgo"]);
        let city = collect_city(&catalog(), &mut lines).unwrap();
        assert_eq!(city.name(), "chicago");
    }

    #[test]
    fn city_typo_and_direct_lookup_agree() {
        let catalog = catalog();
        for typo in [
            "chicgo",
            "chiago",
            "chacago",
            "chicargo",
            "new york",
            "nyc",
            "newyorkcity",
            "newyork",
            "ny city",
            "nycity",
            "wash",
        ] {
            let mut lines = ScriptedLines::new([typo]);
            let via_prompt = collect_city(&catalog, &mut lines).unwrap();
            let direct = catalog.find(catalog.correct_typo(typo).unwrap()).unwrap();
            assert_eq!(via_prompt, direct, "typo '{typo}' resolved inconsistently");
        }
    }

    #[test]
    fn city_prefix_match_accepts_longer_input() {
        let mut lines = ScriptedLines::new(["chicago il"]);
        let city = collect_city(&catalog(), &mut lines).unwrap();
        assert_eq!(city.name(), "chicago");
    }

    #[test]
    fn city_reprompts_on_unknown_and_empty_input() {
        let mut lines = ScriptedLines::new(["boston", "   ", "washington"]);
        let city = collect_city(&catalog(), &mut lines).unwrap();
        assert_eq!(city.name(), "washington");
        assert_eq!(lines.remaining(), 0);
    }

    #[test]
    fn city_cancellation_propagates() {
        let mut lines = ScriptedLines::new(Vec::<String>::new());
        let err = collect_city(&catalog(), &mut lines).unwrap_err();
        assert_cancelled(&err);
    }

    #[test]
    fn month_all_is_wildcard() {
        for raw in ["all", "ALL", "  All  "] {
            let mut lines = ScriptedLines::new([raw]);
            let filter = collect_month(&mut lines, &Month::all()).unwrap();
            assert_eq!(filter, MonthFilter::All);
        }
    }

    #[test]
    fn month_full_name_and_abbreviation_resolve_identically() {
        for raw in ["January", "january", "jan", "  JAN "] {
            let mut lines = ScriptedLines::new([raw]);
            let filter = collect_month(&mut lines, &Month::all()).unwrap();
            assert_eq!(filter, MonthFilter::Month(month(1)));
        }
    }

    #[test]
    fn month_outside_universe_is_rejected() {
        let universe = [month(1), month(3)];
        let mut lines = ScriptedLines::new(["february", "march"]);
        let filter = collect_month(&mut lines, &universe).unwrap();
        assert_eq!(filter, MonthFilter::Month(month(3)));
        assert_eq!(lines.remaining(), 0);
    }

    #[test]
    fn month_cancellation_propagates() {
        let mut lines = ScriptedLines::new(["not a month"]);
        let err = collect_month(&mut lines, &Month::all()).unwrap_err();
        assert_cancelled(&err);
    }

    #[test]
    fn day_all_and_prefixes_resolve() {
        let mut lines = ScriptedLines::new(["all"]);
        assert_eq!(collect_day(&mut lines).unwrap(), DayFilter::All);

        let mut lines = ScriptedLines::new(["Mon"]);
        let filter = collect_day(&mut lines).unwrap();
        assert_eq!(filter.day().unwrap().number(), 1);

        let mut lines = ScriptedLines::new(["sunday"]);
        let filter = collect_day(&mut lines).unwrap();
        assert_eq!(filter.day().unwrap().number(), 7);
    }

    #[test]
    fn day_reprompts_until_recognised() {
        let mut lines = ScriptedLines::new(["mo", "someday", "tuesday"]);
        let filter = collect_day(&mut lines).unwrap();
        assert_eq!(filter.day().unwrap().number(), 2);
        assert_eq!(lines.remaining(), 0);
    }

    #[test]
    fn day_cancellation_propagates() {
        let mut lines = ScriptedLines::new(["not a day"]);
        let err = collect_day(&mut lines).unwrap_err();
        assert_cancelled(&err);
    }

    #[test]
    fn mode_month_forces_day_to_all() {
        let mut lines = ScriptedLines::new(["chicago", "month", "june"]);
        let filters = collect_filters(&catalog(), &mut lines).unwrap();
        assert_eq!(filters.month, MonthFilter::Month(month(6)));
        assert_eq!(filters.day, DayFilter::All);
    }

    #[test]
    fn mode_day_forces_month_to_all() {
        let mut lines = ScriptedLines::new(["nyc", "filter by day please", "fri"]);
        let filters = collect_filters(&catalog(), &mut lines).unwrap();
        assert_eq!(filters.city.name(), "new york city");
        assert_eq!(filters.month, MonthFilter::All);
        assert_eq!(filters.day.day().unwrap().number(), 5);
    }

    #[test]
    fn mode_both_collects_month_then_day() {
        let mut lines = ScriptedLines::new(["chicago", "both", "January", "Mon"]);
        let filters = collect_filters(&catalog(), &mut lines).unwrap();
        assert_eq!(filters.month, MonthFilter::Month(month(1)));
        assert_eq!(filters.day.day().unwrap().number(), 1);
    }

    #[test]
    fn mode_neither_applies_no_filters() {
        for answer in ["neither", "none", "no thanks"] {
            let mut lines = ScriptedLines::new(["chicago", answer]);
            let filters = collect_filters(&catalog(), &mut lines).unwrap();
            assert_eq!(filters.month, MonthFilter::All);
            assert_eq!(filters.day, DayFilter::All);
        }
    }

    #[test]
    fn mode_refusal_needs_a_standalone_word() {
        let mut lines = ScriptedLines::new(["chicago", "november", "i don't know", "no"]);
        let filters = collect_filters(&catalog(), &mut lines).unwrap();
        assert_eq!(filters.month, MonthFilter::All);
        assert_eq!(filters.day, DayFilter::All);
        assert_eq!(lines.remaining(), 0);
    }

    #[test]
    fn mode_reprompts_on_unrecognised_answer() {
        let mut lines = ScriptedLines::new(["chicago", "everything", "neither"]);
        let filters = collect_filters(&catalog(), &mut lines).unwrap();
        assert_eq!(filters.month, MonthFilter::All);
        assert_eq!(filters.day, DayFilter::All);
    }

    #[test]
    fn orchestrator_cancellation_propagates() {
        let mut lines = ScriptedLines::new(["chicago"]);
        let err = collect_filters(&catalog(), &mut lines).unwrap_err();
        assert_cancelled(&err);
    }

    #[test]
    fn filters_display_reads_naturally() {
        let filters = TripFilters {
            city: catalog().find("new york city").unwrap(),
            month: MonthFilter::Month(month(1)),
            day: DayFilter::All,
        };
        assert_eq!(
            filters.to_string(),
            "City - New York City, Month - January, Day of the week - All"
        );
    }
}
