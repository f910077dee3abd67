//! # Bikeshare Explorer Entry Point
//!
//! Starts an interactive terminal session for exploring US bikeshare trip
//! data, one question at a time.
//!
//! ## Application Flow
//!
//! ```text
//! main()
//!   │
//!   ├─> Initialize file logging (best effort)
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   │
//!   └─> Run explore sessions until the user exits:
//!       ├─> Collect city/month/day filters
//!       ├─> Load and filter the city table (Polars)
//!       ├─> Print the four statistics reports
//!       └─> Offer the filtered and raw tables five rows at a time
//! ```
//!
//! ## Usage
//!
//! ```bash
//! bikeshare-explorer
//! bikeshare-explorer --data-dir /srv/bikeshare/csv
//! ```
//!
//! Logs are written to rotating files under the platform data directory;
//! set `RUST_LOG=debug` to raise the verbosity.

#![warn(clippy::all, rust_2018_idioms)]

// Private module - only accessible within this binary
mod cli;

use anyhow::Result;
use bikeshare_explorer::catalog::Catalog;
use bikeshare_explorer::input::ReadlineSource;
use bikeshare_explorer::{logging, session};
use clap::Parser as _;

/// Main entry point for the bikeshare explorer.
///
/// # Errors
///
/// Returns error if:
/// - The terminal cannot be read
/// - A chosen city's data file is missing or malformed
fn main() -> Result<()> {
    // Logging is best effort: an unwritable data directory must not block
    // an interactive session.
    if let Err(err) = logging::init() {
        eprintln!("Warning: logging disabled: {err:#}");
    }

    let cli = cli::Cli::parse();
    let catalog = cli.data_dir.map(Catalog::new).unwrap_or_default();
    tracing::info!("data directory: {}", catalog.data_dir().display());

    let mut lines = ReadlineSource::new()?;
    session::run(&catalog, &mut lines)
}
