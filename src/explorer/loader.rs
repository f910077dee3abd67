//! CSV loading, derived trip columns, and filter application.
//!
//! City files arrive with `Start Time`/`End Time` timestamps and the two
//! station columns; everything the reports need beyond that (`month`,
//! `day_of_week`, `start_hour`, `journey`, `journey_seconds`) is derived
//! here so the reporters can stay purely about counting.

use crate::calendar::{Month, Weekday};
use crate::catalog::{Catalog, City};
use crate::filters::{MonthFilter, TripFilters, collect_month};
use crate::input::LineSource;
use crate::utils::title_case;
use anyhow::{Context as _, Result, bail};
use polars::prelude::*;

/// Columns every city file must provide.
const REQUIRED_COLUMNS: [&str; 5] = [
    "Start Time",
    "End Time",
    "Start Station",
    "End Station",
    "User Type",
];

/// Loads a city's trip table with the derived columns attached.
///
/// The CSV is scanned lazily with date inference; if a timestamp column
/// still arrives as text it is cast strictly, so a file with malformed
/// timestamps fails here instead of feeding nulls into every report.
///
/// # Errors
///
/// Fails if the file is absent, a required column is missing, or the
/// timestamp columns cannot be read as datetimes.
pub fn load_city_table(catalog: &Catalog, city: &City) -> Result<DataFrame> {
    let path = catalog.data_file(city);
    if !path.exists() {
        bail!(
            "no trip data for {} (expected file {})",
            city.name(),
            path.display()
        );
    }

    let lf = LazyCsvReader::new(&path)
        .with_infer_schema_length(Some(10000))
        .with_has_header(true)
        .with_try_parse_dates(true)
        .finish()
        .with_context(|| format!("failed to scan {}", path.display()))?;

    let schema = lf
        .clone()
        .collect_schema()
        .with_context(|| format!("failed to read the schema of {}", path.display()))?;
    for required in REQUIRED_COLUMNS {
        if schema.get(required).is_none() {
            bail!("the {} data is missing the '{required}' column", city.name());
        }
    }

    let mut df = lf
        .collect()
        .with_context(|| format!("failed to read {}", path.display()))?;
    ensure_datetime(&mut df, "Start Time")?;
    ensure_datetime(&mut df, "End Time")?;

    df.lazy()
        .with_columns([
            col("Start Time").dt().month().cast(DataType::Int32).alias("month"),
            // Polars weekday is ISO (1 = Monday); shift to 0-based so Monday is 0.
            (col("Start Time").dt().weekday().cast(DataType::Int32) - lit(1))
                .alias("day_of_week"),
            col("Start Time").dt().hour().cast(DataType::Int32).alias("start_hour"),
            concat_str([col("Start Station"), col("End Station")], " -> ", false)
                .alias("journey"),
            (col("End Time") - col("Start Time"))
                .dt()
                .total_seconds()
                .alias("journey_seconds"),
        ])
        .collect()
        .context("failed to derive trip columns")
}

/// Loads a city's CSV exactly as stored, with no date parsing or derived
/// columns, for the raw-data viewer.
///
/// # Errors
///
/// Fails if the file is absent or unreadable.
pub fn load_raw_table(catalog: &Catalog, city: &City) -> Result<DataFrame> {
    let path = catalog.data_file(city);
    if !path.exists() {
        bail!(
            "no trip data for {} (expected file {})",
            city.name(),
            path.display()
        );
    }

    LazyCsvReader::new(&path)
        .with_infer_schema_length(Some(10000))
        .with_has_header(true)
        .finish()
        .with_context(|| format!("failed to scan {}", path.display()))?
        .collect()
        .with_context(|| format!("failed to read {}", path.display()))
}

// Casts a leftover text column to datetimes. Any value the cast cannot
// parse would surface as a new null, which is treated as an error.
fn ensure_datetime(df: &mut DataFrame, name: &str) -> Result<()> {
    if df.column(name)?.dtype().is_temporal() {
        return Ok(());
    }

    let series = df.column(name)?.as_materialized_series().clone();
    let casted = series
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))
        .with_context(|| format!("the '{name}' column cannot be read as datetimes"))?;
    if casted.null_count() > series.null_count() {
        bail!(
            "the '{name}' column holds {} value(s) that are not datetimes",
            casted.null_count() - series.null_count()
        );
    }
    df.replace(name, casted)?;
    Ok(())
}

/// The distinct months that actually occur in a trip table, sorted.
///
/// # Errors
///
/// Fails if the `month` column is missing or holds out-of-range values.
pub fn months_present(df: &DataFrame) -> Result<Vec<Month>> {
    let months = df
        .column("month")?
        .as_materialized_series()
        .drop_nulls()
        .unique()?;
    let months = months.sort(SortOptions::default())?;

    let mut present = Vec::new();
    for value in months.i32()?.into_iter().flatten() {
        present.push(month_from_value(value)?);
    }
    Ok(present)
}

/// Keeps only the rows matching the month and day selections.
///
/// # Errors
///
/// Fails if the derived filter columns are missing.
pub fn apply_filters(df: DataFrame, filters: &TripFilters) -> Result<DataFrame> {
    let mut lf = df.lazy();
    if let Some(month) = filters.month.month() {
        lf = lf.filter(col("month").eq(lit(i32::from(month.number()))));
    }
    if let Some(day) = filters.day.day() {
        // day_of_week is 0-based from Monday; the user-facing number is 1-based.
        lf = lf.filter(col("day_of_week").eq(lit(i32::from(day.zero_based()))));
    }
    lf.collect().context("failed to apply the chosen filters")
}

/// Loads a city table and applies the filters, first checking that the
/// chosen month actually occurs in the data.
///
/// When it does not, the months that are present are listed and the month
/// selection is collected again, restricted to those months. The caller's
/// filters are updated with whatever the user settles on.
///
/// # Errors
///
/// Fails on any loader error, or propagates cancellation from the
/// re-collection prompt.
pub fn load_filtered(
    catalog: &Catalog,
    filters: &mut TripFilters,
    lines: &mut dyn LineSource,
) -> Result<DataFrame> {
    let table = load_city_table(catalog, &filters.city)?;

    if let MonthFilter::Month(month) = filters.month {
        let present = months_present(&table)?;
        if !present.contains(&month) {
            tracing::info!("no {} rows for {}", month.name(), filters.city.name());
            println!(
                "\n{} data contains no entries for {}",
                title_case(filters.city.name()),
                month.name()
            );
            let available: Vec<&str> = present.iter().map(|month| month.name()).collect();
            println!("Data contains: {}", available.join(", "));
            filters.month = collect_month(lines, &present)?;
        }
    }

    apply_filters(table, filters)
}

pub(crate) fn month_from_value(value: i32) -> Result<Month> {
    u8::try_from(value)
        .ok()
        .and_then(Month::new)
        .with_context(|| format!("the month column holds out-of-range value {value}"))
}

pub(crate) fn weekday_from_value(value: i32) -> Result<Weekday> {
    u8::try_from(value)
        .ok()
        .and_then(Weekday::from_zero_based)
        .with_context(|| format!("the day_of_week column holds out-of-range value {value}"))
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]

    use super::*;
    use crate::filters::DayFilter;
    use crate::input::ScriptedLines;
    use std::io::Write as _;
    use std::path::Path;

    const HEADER: &str =
        "Start Time,End Time,Start Station,End Station,User Type,Gender,Birth Year";

    const ROWS: [&str; 4] = [
        // Monday 2 January, 20 minutes
        "2017-01-02 08:05:00,2017-01-02 08:25:00,Clark & Lake,Canal & Adams,Subscriber,Male,1987",
        // Wednesday 15 March, 30 minutes
        "2017-03-15 09:10:00,2017-03-15 09:40:00,Canal & Adams,Clark & Lake,Customer,Female,1992",
        // Wednesday 22 March, 15 minutes
        "2017-03-22 17:30:00,2017-03-22 17:45:00,Wood & Hubbard,Canal & Adams,Customer,,1992",
        // Sunday 21 May, 30 minutes
        "2017-05-21 11:00:00,2017-05-21 11:30:00,Wood & Hubbard,Canal & Adams,Dependent,Male,2001",
    ];

    fn write_city(dir: &Path, file: &str, header: &str, rows: &[&str]) {
        let mut out = std::fs::File::create(dir.join(file)).unwrap();
        writeln!(out, "{header}").unwrap();
        for row in rows {
            writeln!(out, "{row}").unwrap();
        }
    }

    fn fixture_catalog(dir: &Path, rows: &[&str]) -> (Catalog, City) {
        write_city(dir, "testville.csv", HEADER, rows);
        let catalog = Catalog::with_cities(dir.to_path_buf(), &[("testville", "testville.csv")]);
        let city = catalog.find("testville").unwrap();
        (catalog, city)
    }

    fn month(number: u8) -> Month {
        Month::new(number).unwrap()
    }

    fn i32_at(df: &DataFrame, name: &str, row: usize) -> i32 {
        df.column(name)
            .unwrap()
            .get(row)
            .unwrap()
            .try_extract::<i32>()
            .unwrap()
    }

    #[test]
    fn derived_columns_follow_start_time() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, city) = fixture_catalog(dir.path(), &ROWS);

        let table = load_city_table(&catalog, &city).unwrap();
        assert_eq!(table.height(), 4);
        assert_eq!(i32_at(&table, "month", 0), 1);
        assert_eq!(i32_at(&table, "day_of_week", 0), 0, "2017-01-02 was a Monday");
        assert_eq!(i32_at(&table, "day_of_week", 3), 6, "2017-05-21 was a Sunday");
        assert_eq!(i32_at(&table, "start_hour", 0), 8);

        let journey = table.column("journey").unwrap().get(0).unwrap();
        assert_eq!(journey.get_str().unwrap(), "Clark & Lake -> Canal & Adams");

        let seconds = table
            .column("journey_seconds")
            .unwrap()
            .get(0)
            .unwrap()
            .try_extract::<i64>()
            .unwrap();
        assert_eq!(seconds, 1200);
    }

    #[test]
    fn months_present_is_sorted_and_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, city) = fixture_catalog(dir.path(), &ROWS);

        let table = load_city_table(&catalog, &city).unwrap();
        let present = months_present(&table).unwrap();
        assert_eq!(present, vec![month(1), month(3), month(5)]);
    }

    #[test]
    fn filters_narrow_by_month_and_day() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, city) = fixture_catalog(dir.path(), &ROWS);
        let table = load_city_table(&catalog, &city).unwrap();

        let march = TripFilters {
            city: city.clone(),
            month: MonthFilter::Month(month(3)),
            day: DayFilter::All,
        };
        assert_eq!(apply_filters(table.clone(), &march).unwrap().height(), 2);

        let sundays = TripFilters {
            city: city.clone(),
            month: MonthFilter::All,
            day: DayFilter::Day(Weekday::new(7).unwrap()),
        };
        assert_eq!(apply_filters(table.clone(), &sundays).unwrap().height(), 1);

        let march_wednesdays = TripFilters {
            city,
            month: MonthFilter::Month(month(3)),
            day: DayFilter::Day(Weekday::new(3).unwrap()),
        };
        assert_eq!(apply_filters(table, &march_wednesdays).unwrap().height(), 2);
    }

    #[test]
    fn absent_month_is_collected_again_from_whats_present() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, city) = fixture_catalog(dir.path(), &ROWS);

        let mut filters = TripFilters {
            city,
            month: MonthFilter::Month(month(2)),
            day: DayFilter::All,
        };
        // February is rejected a second time because it is not in the data.
        let mut lines = ScriptedLines::new(["february", "march"]);
        let table = load_filtered(&catalog, &mut filters, &mut lines).unwrap();

        assert_eq!(filters.month, MonthFilter::Month(month(3)));
        assert_eq!(table.height(), 2);
        assert_eq!(lines.remaining(), 0);
    }

    #[test]
    fn missing_file_names_the_city() {
        let dir = tempfile::tempdir().unwrap();
        let catalog =
            Catalog::with_cities(dir.path().to_path_buf(), &[("testville", "testville.csv")]);
        let city = catalog.find("testville").unwrap();

        let err = load_city_table(&catalog, &city).unwrap_err();
        assert!(format!("{err:#}").contains("testville"), "got: {err:#}");
    }

    #[test]
    fn missing_required_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_city(
            dir.path(),
            "testville.csv",
            "Start Time,Start Station,User Type",
            &["2017-01-02 08:05:00,Clark & Lake,Subscriber"],
        );
        let catalog =
            Catalog::with_cities(dir.path().to_path_buf(), &[("testville", "testville.csv")]);
        let city = catalog.find("testville").unwrap();

        let err = load_city_table(&catalog, &city).unwrap_err();
        assert!(format!("{err:#}").contains("End Time"), "got: {err:#}");
    }

    #[test]
    fn malformed_timestamps_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, city) = fixture_catalog(
            dir.path(),
            &["not a timestamp,also not one,Clark & Lake,Canal & Adams,Subscriber,Male,1987"],
        );

        let err = load_city_table(&catalog, &city).unwrap_err();
        assert!(format!("{err:#}").contains("Start Time"), "got: {err:#}");
    }

    #[test]
    fn raw_table_keeps_timestamps_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, city) = fixture_catalog(dir.path(), &ROWS);

        let raw = load_raw_table(&catalog, &city).unwrap();
        assert_eq!(raw.column("Start Time").unwrap().dtype(), &DataType::String);
        assert!(raw.column("journey").is_err(), "raw table must not be derived");
    }
}
