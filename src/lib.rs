//! # Bikeshare Explorer - Interactive Trip Data Analysis
//!
//! A terminal question-and-answer tool for exploring US bikeshare trip data.
//!
//! Users pick a city, optionally narrow to a month and a day of the week,
//! and get statistics on travel times, stations, trip durations, and riders,
//! with the underlying rows available five at a time.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bikeshare_explorer::catalog::Catalog;
//! use bikeshare_explorer::explorer;
//!
//! # fn example() -> anyhow::Result<()> {
//! let catalog = Catalog::default();
//! let city = catalog.find("chicago").expect("known city");
//!
//! // Load the trip table with the derived columns attached
//! let table = explorer::load_city_table(&catalog, &city)?;
//! println!("{} trips on file", table.height());
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`calendar`]: Month and weekday names, numbering, and parsing
//! - [`catalog`]: The cities on offer and their data files
//! - [`filters`]: Interactive collection of the city/month/day selection
//! - [`explorer`]: Loading, statistics, and paged viewing of trip tables
//!   - [`explorer::loader`]: CSV loading, derived columns, filtering
//!   - [`explorer::report`]: The four statistics reports
//! - [`input`]: Line input with a scriptable seam for tests
//! - [`session`]: The interactive session driver
//! - [`logging`]: Rotating file logs
//! - [`utils`]: Common formatting helpers
//!
//! ## Key Concepts
//!
//! ### Lazy Evaluation
//!
//! The explorer uses Polars' `LazyFrame` for filtering and aggregation.
//! Operations build a query plan that is optimized and executed only when
//! needed:
//!
//! ```no_run
//! use polars::prelude::*;
//!
//! let lf = LazyCsvReader::new("data/chicago.csv").finish()?
//!     .filter(col("month").eq(lit(1)));
//!
//! // Nothing executed yet - just a query plan
//! let df = lf.collect()?;  // Now data is processed
//! # Ok::<(), PolarsError>(())
//! ```
//!
//! ### Scriptable Prompts
//!
//! Every prompt reads through the [`input::LineSource`] trait, so a whole
//! conversation can be driven by a script in tests:
//!
//! ```no_run
//! use bikeshare_explorer::catalog::Catalog;
//! use bikeshare_explorer::filters;
//! use bikeshare_explorer::input::ScriptedLines;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut lines = ScriptedLines::new(["chicago", "both", "january", "monday"]);
//! let chosen = filters::collect_filters(&Catalog::default(), &mut lines)?;
//! println!("{chosen}");
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all, rust_2018_idioms)]
// Uncomment to see which items need documentation:
// #![warn(missing_docs)]

pub mod calendar;
pub mod catalog;
pub mod explorer;
pub mod filters;
pub mod input;
pub mod logging;
pub mod session;
pub mod utils;
