use std::io::{BufRead, Write};

use tracing::info;

use crate::account::Schedule;
use crate::console::Console;
use crate::courses;
use crate::error::Result;
use crate::state::AppState;

/// Add a catalog course to, or drop one from, the caller's schedule.
///
/// Only the in-memory schedule changes; the course store is read, never written.
pub fn add_drop_course<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
    schedule: &mut Schedule,
    is_add: bool,
) -> Result<()> {
    if is_add {
        let crn = console
            .prompt("Enter the CRN of the course to add: ")?
            .trim()
            .to_string();
        if !courses::course_exists(state.conn()?, &crn)? {
            console.say(&format!("No course found with CRN {}.", crn))?;
            return Ok(());
        }
        if schedule.add(&crn) {
            info!(crn = %crn, "course added to schedule");
            console.say(&format!("Course {} added to your schedule.", crn))?;
        } else {
            console.say(&format!("Course {} is already in your schedule.", crn))?;
        }
    } else {
        let crn = console
            .prompt("Enter the CRN of the course to drop: ")?
            .trim()
            .to_string();
        if schedule.drop_course(&crn) {
            info!(crn = %crn, "course dropped from schedule");
            console.say(&format!("Course {} dropped from your schedule.", crn))?;
        } else {
            console.say(&format!("Course {} is not in your schedule.", crn))?;
        }
    }
    Ok(())
}

pub fn print_schedule<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
    schedule: &Schedule,
) -> Result<()> {
    console.say("----- Schedule -----")?;
    if schedule.is_empty() {
        console.say("Your schedule is empty.")?;
        return Ok(());
    }
    let conn = state.conn()?;
    for crn in schedule.iter() {
        match courses::find_course(conn, crn)? {
            Some(row) => console.say(&courses::format_row(&row))?,
            None => console.say(&format!("{} (no longer offered)", crn))?,
        }
    }
    Ok(())
}
