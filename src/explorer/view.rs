//! Paged display of a table, five rows at a time.

use crate::input::{InputError, LineSource, PROMPT, normalize};
use anyhow::Result;
use polars::prelude::*;

const PAGE_SIZE: usize = 5;

/// Offers the table five rows at a time for as long as the user keeps
/// answering "yes", and returns how many rows were shown.
///
/// Anything other than "yes" stops the viewing, as does cancelling at the
/// prompt. Running out of rows prints a notice instead of an empty page.
///
/// # Errors
///
/// Fails only when the line source fails outright; cancellation counts as
/// declining, not as an error.
pub fn page_rows(df: &DataFrame, label: &str, lines: &mut dyn LineSource) -> Result<usize> {
    let mut shown = 0;
    loop {
        if shown >= df.height() {
            println!("\nThere are no more rows to display.");
            break;
        }

        println!("\nWould you like to view the {label} data 5 lines at a time?");
        println!("(Sounds like a tedious way to view it, but I won't stop you!)");
        println!("Enter yes to see the next 5 rows of data (anything else continues without viewing).");
        let raw = match lines.read_line(PROMPT) {
            Ok(raw) => raw,
            Err(InputError::Cancelled) => {
                println!("Continuing without viewing data");
                break;
            }
            Err(err) => return Err(err.into()),
        };
        if normalize(&raw) != "yes" {
            break;
        }

        println!("{}", df.slice(shown as i64, PAGE_SIZE));
        shown += PAGE_SIZE;
    }
    Ok(shown.min(df.height()))
}
