//! The interactive session: greeting, filter collection, the four reports,
//! both viewers, and the restart prompt.
//!
//! This is also where cancellation is decided. The prompts below all
//! surface Ctrl-C / Ctrl-D as [`InputError::Cancelled`]; a cancelled
//! session ends quietly instead of being reported as a failure.

use crate::catalog::Catalog;
use crate::explorer::{loader, report, view};
use crate::filters;
use crate::input::{InputError, LineSource, PROMPT, normalize};
use anyhow::Result;
use chrono::{Local, Timelike as _};

/// The greeting for a given local hour.
pub fn greeting_for(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

/// Runs explore sessions until the user declines to restart or cancels.
///
/// # Errors
///
/// Fails on loader or terminal errors; cancellation is not an error.
pub fn run(catalog: &Catalog, lines: &mut dyn LineSource) -> Result<()> {
    println!(
        "{}! Let's explore some US bikeshare data!",
        greeting_for(Local::now().hour())
    );

    loop {
        if let Err(err) = run_session(catalog, lines) {
            if is_cancelled(&err) {
                tracing::info!("session cancelled");
                println!("\nSession cancelled.");
                return Ok(());
            }
            return Err(err);
        }
        if !wants_restart(lines)? {
            break;
        }
        tracing::info!("session restarted");
    }
    Ok(())
}

// One full pass: filters, reports over the filtered table, then the
// filtered and raw viewers.
fn run_session(catalog: &Catalog, lines: &mut dyn LineSource) -> Result<()> {
    let mut filters = filters::collect_filters(catalog, lines)?;
    let table = loader::load_filtered(catalog, &mut filters, lines)?;
    tracing::info!("{} row(s) after filtering: {filters}", table.height());

    report::report_time_stats(&table, &filters)?;
    report::report_station_stats(&table)?;
    report::report_duration_stats(&table)?;
    report::report_user_stats(&table)?;

    view::page_rows(&table, "filtered", lines)?;
    let raw = loader::load_raw_table(catalog, &filters.city)?;
    view::page_rows(&raw, "raw", lines)?;
    Ok(())
}

fn wants_restart(lines: &mut dyn LineSource) -> Result<bool> {
    println!("\nWould you like to restart to choose different filter options?");
    println!("Enter yes to restart, anything else exits.");
    match lines.read_line(PROMPT) {
        Ok(raw) => Ok(normalize(&raw).contains('y')),
        Err(InputError::Cancelled) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

fn is_cancelled(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<InputError>(), Some(InputError::Cancelled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_boundaries_fall_on_noon_and_six() {
        assert_eq!(greeting_for(0), "Good morning");
        assert_eq!(greeting_for(11), "Good morning");
        assert_eq!(greeting_for(12), "Good afternoon");
        assert_eq!(greeting_for(17), "Good afternoon");
        assert_eq!(greeting_for(18), "Good evening");
        assert_eq!(greeting_for(23), "Good evening");
    }

    #[test]
    fn restart_looks_for_a_y_anywhere() -> Result<()> {
        for (answer, expected) in [
            ("yes", true),
            ("y", true),
            ("YES", true),
            ("why not", true),
            ("no", false),
            ("", false),
        ] {
            let mut lines = crate::input::ScriptedLines::new([answer]);
            assert_eq!(wants_restart(&mut lines)?, expected, "answer: {answer:?}");
        }
        Ok(())
    }

    #[test]
    fn restart_cancellation_declines() -> Result<()> {
        let mut lines = crate::input::ScriptedLines::new(Vec::<String>::new());
        assert!(!wants_restart(&mut lines)?, "cancel must mean no restart");
        Ok(())
    }

    #[test]
    fn cancellation_is_recognised_through_context() {
        let err = anyhow::Error::from(InputError::Cancelled).context("while prompting");
        assert!(is_cancelled(&err), "downcast must see through context");
        assert!(!is_cancelled(&anyhow::anyhow!("other failure")));
    }
}
