//! The four statistics reports: travel times, stations, trip durations,
//! and user details.
//!
//! Every "most popular" figure is resolved the same way: count the values,
//! rank by count descending, and break ties on the smaller value so that
//! repeated runs over the same data always name the same winner. The
//! `report_*` functions print; the `compute_*` functions they wrap stay
//! print-free so tests can check the numbers directly.

use crate::calendar::{Month, Weekday};
use crate::explorer::loader::{month_from_value, weekday_from_value};
use crate::filters::{DayFilter, MonthFilter, TripFilters};
use crate::utils::fmt_seconds;
use anyhow::{Context as _, Result};
use polars::prelude::*;
use std::time::Instant;

/// Most frequent travel times, with entries left out when the matching
/// filter already pins them down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStats {
    pub popular_month: Option<Month>,
    pub popular_day: Option<Weekday>,
    pub popular_hour: Option<i32>,
}

/// Most frequent start station, end station, and journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub popular_start: Option<String>,
    pub popular_end: Option<String>,
    pub popular_journey: Option<String>,
}

/// Total and mean trip duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationStats {
    pub total_seconds: i64,
    pub mean_seconds: Option<f64>,
}

/// Rider statistics. An outer `None` means the city file does not carry
/// that column at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Option<CategoryCounts>,
    pub genders: Option<CategoryCounts>,
    pub birth_years: Option<BirthYearSpread>,
}

/// Observed values of a categorical column, most frequent first, plus the
/// number of rows where the value was left blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCounts {
    pub counts: Vec<(String, u32)>,
    pub unspecified: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearSpread {
    pub earliest: Option<i32>,
    pub latest: Option<i32>,
    pub most_common: Option<i32>,
}

// Counts the non-null values of one column, ranked by count descending
// and then by value ascending.
fn ranked_counts(df: &DataFrame, name: &str) -> Result<DataFrame> {
    df.clone()
        .lazy()
        .select([col(name)])
        .drop_nulls(None)
        .group_by([col(name)])
        .agg([len().alias("counts")])
        .sort_by_exprs(
            vec![col("counts"), col(name)],
            SortMultipleOptions::default().with_order_descending_multi(vec![true, false]),
        )
        .collect()
        .with_context(|| format!("failed to count the values of '{name}'"))
}

fn most_frequent_i32(df: &DataFrame, name: &str) -> Result<Option<i32>> {
    let ranked = ranked_counts(df, name)?;
    if ranked.height() == 0 {
        return Ok(None);
    }
    let value = ranked.column(name)?.get(0)?.try_extract::<i32>()?;
    Ok(Some(value))
}

fn most_frequent_str(df: &DataFrame, name: &str) -> Result<Option<String>> {
    let ranked = ranked_counts(df, name)?;
    if ranked.height() == 0 {
        return Ok(None);
    }
    let value = ranked.column(name)?.get(0)?;
    let value = value
        .get_str()
        .with_context(|| format!("the '{name}' column is not text"))?;
    Ok(Some(value.to_owned()))
}

/// # Errors
///
/// Fails if a derived time column is missing or holds out-of-range values.
pub fn compute_time_stats(df: &DataFrame, filters: &TripFilters) -> Result<TimeStats> {
    let popular_month = match filters.month {
        MonthFilter::All => most_frequent_i32(df, "month")?
            .map(month_from_value)
            .transpose()?,
        MonthFilter::Month(_) => None,
    };
    let popular_day = match filters.day {
        DayFilter::All => most_frequent_i32(df, "day_of_week")?
            .map(weekday_from_value)
            .transpose()?,
        DayFilter::Day(_) => None,
    };
    let popular_hour = most_frequent_i32(df, "start_hour")?;

    Ok(TimeStats {
        popular_month,
        popular_day,
        popular_hour,
    })
}

/// # Errors
///
/// Fails if a station column is missing.
pub fn compute_station_stats(df: &DataFrame) -> Result<StationStats> {
    Ok(StationStats {
        popular_start: most_frequent_str(df, "Start Station")?,
        popular_end: most_frequent_str(df, "End Station")?,
        popular_journey: most_frequent_str(df, "journey")?,
    })
}

/// # Errors
///
/// Fails if the `journey_seconds` column is missing.
pub fn compute_duration_stats(df: &DataFrame) -> Result<DurationStats> {
    let column = df.column("journey_seconds")?;
    let seconds = column.as_materialized_series().i64()?;
    Ok(DurationStats {
        total_seconds: seconds.sum().unwrap_or(0),
        mean_seconds: seconds.mean(),
    })
}

/// # Errors
///
/// Fails if counting any of the rider columns fails; columns that are
/// absent altogether are reported as such, not treated as errors.
pub fn compute_user_stats(df: &DataFrame) -> Result<UserStats> {
    Ok(UserStats {
        user_types: category_counts(df, "User Type")?,
        genders: category_counts(df, "Gender")?,
        birth_years: birth_year_spread(df)?,
    })
}

fn category_counts(df: &DataFrame, name: &str) -> Result<Option<CategoryCounts>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let unspecified = column.null_count();

    let ranked = ranked_counts(df, name)?;
    let labels = ranked.column(name)?.as_materialized_series();
    let counts = ranked.column("counts")?.as_materialized_series();

    let mut tallied = Vec::new();
    for i in 0..ranked.height() {
        let label = labels.get(i)?;
        let label = label
            .get_str()
            .with_context(|| format!("the '{name}' column is not text"))?
            .to_owned();
        let count = counts.get(i)?.try_extract::<u32>()?;
        tallied.push((label, count));
    }

    Ok(Some(CategoryCounts {
        counts: tallied,
        unspecified,
    }))
}

fn birth_year_spread(df: &DataFrame) -> Result<Option<BirthYearSpread>> {
    let Ok(column) = df.column("Birth Year") else {
        return Ok(None);
    };

    // The column is commonly inferred as floats because of blank cells.
    let years = column
        .as_materialized_series()
        .cast(&DataType::Int32)
        .context("the 'Birth Year' column cannot be read as years")?;
    let years = years.i32()?;

    Ok(Some(BirthYearSpread {
        earliest: years.min(),
        latest: years.max(),
        most_common: most_frequent_i32(df, "Birth Year")?,
    }))
}

/// Prints the most frequent month, day, and start hour.
///
/// The month and day lines are skipped when the matching filter is active,
/// since the answer would just repeat the filter.
///
/// # Errors
///
/// Fails if [`compute_time_stats`] fails.
pub fn report_time_stats(df: &DataFrame, filters: &TripFilters) -> Result<()> {
    println!("\nCalculating The Most Frequent Times of Travel for your chosen filters...");
    println!("Chosen filters: {filters}\n");
    let timer = Instant::now();

    let stats = compute_time_stats(df, filters)?;
    if let Some(month) = stats.popular_month {
        println!("Most popular month: {}", month.name());
    }
    if let Some(day) = stats.popular_day {
        println!("Most popular day: {}", day.name());
    }
    match stats.popular_hour {
        Some(hour) => println!("Most popular hour: {hour}"),
        None => println!("No trips match the chosen filters"),
    }

    finish_report(timer);
    Ok(())
}

/// Prints the most popular start station, end station, and journey.
///
/// # Errors
///
/// Fails if [`compute_station_stats`] fails.
pub fn report_station_stats(df: &DataFrame) -> Result<()> {
    println!("\nCalculating The Most Popular Stations and Trip...\n");
    let timer = Instant::now();

    let stats = compute_station_stats(df)?;
    match &stats.popular_start {
        Some(station) => {
            println!("The most popular Start Station in the filtered data is {station}");
        }
        None => println!("No start station data for the chosen filters"),
    }
    match &stats.popular_end {
        Some(station) => {
            println!("The most popular End Station in the filtered data is {station}");
        }
        None => println!("No end station data for the chosen filters"),
    }
    match &stats.popular_journey {
        Some(journey) => println!("The most popular journey in the filtered data is {journey}"),
        None => println!("No journey data for the chosen filters"),
    }

    finish_report(timer);
    Ok(())
}

/// Prints the total and mean travel time.
///
/// # Errors
///
/// Fails if [`compute_duration_stats`] fails.
pub fn report_duration_stats(df: &DataFrame) -> Result<()> {
    println!("\nCalculating Trip Duration...\n");
    let timer = Instant::now();

    let stats = compute_duration_stats(df)?;
    match stats.mean_seconds {
        Some(mean) => {
            println!(
                "The total travel time for the filtered data is {} ({} seconds)",
                fmt_seconds(stats.total_seconds),
                stats.total_seconds
            );
            println!(
                "The mean travel time for the filtered data is {} ({mean:.1} seconds)",
                fmt_seconds(mean.round() as i64)
            );
        }
        None => println!("No trip duration data for the chosen filters"),
    }

    finish_report(timer);
    Ok(())
}

/// Prints user type counts, gender counts, and the birth year spread,
/// noting columns the chosen city does not record.
///
/// # Errors
///
/// Fails if [`compute_user_stats`] fails.
pub fn report_user_stats(df: &DataFrame) -> Result<()> {
    println!("\nCalculating User Stats for your filters...\n");
    let timer = Instant::now();

    let stats = compute_user_stats(df)?;
    match &stats.user_types {
        Some(user_types) => print_category_counts(user_types, "User type"),
        None => println!("No User Type data in the city data chosen"),
    }
    match &stats.genders {
        Some(genders) => print_category_counts(genders, "Gender"),
        None => println!("No gender data in the city data chosen"),
    }
    match &stats.birth_years {
        Some(spread) => print_birth_years(spread),
        None => println!("No Birth Year data in the city data chosen"),
    }

    finish_report(timer);
    Ok(())
}

fn print_category_counts(categories: &CategoryCounts, label: &str) {
    if categories.counts.is_empty() && categories.unspecified == 0 {
        println!("No {} data for the chosen filters", label.to_lowercase());
        return;
    }
    for (value, count) in &categories.counts {
        println!("{value}: {count}");
    }
    if categories.unspecified > 0 {
        println!("{label} not specified: {}", categories.unspecified);
    }
}

fn print_birth_years(spread: &BirthYearSpread) {
    match (spread.earliest, spread.latest, spread.most_common) {
        (Some(earliest), Some(latest), Some(most_common)) => {
            println!("Earliest birth year: {earliest}");
            println!("Latest birth year: {latest}");
            println!("Most common birth year: {most_common}");
        }
        _ => println!("No birth year data for the chosen filters"),
    }
}

fn finish_report(timer: Instant) {
    println!("\nThis took {:.4} seconds.", timer.elapsed().as_secs_f64());
    println!("{}", "-".repeat(40));
}
