use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::console::Console;
use crate::courses::{self, NewCourse};
use crate::error::Result;
use crate::state::AppState;

/// Add a course to the catalog, or remove one after confirmation.
///
/// The CRN existence check always runs before the insert or delete.
pub fn add_remove_course<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
    is_add: bool,
) -> Result<()> {
    if is_add {
        add_course(state, console)
    } else {
        remove_course(state, console)
    }
}

pub const LAYOUT_REJECTED: &str = "Course table layout does not support adding courses.";

fn add_course<R: BufRead, W: Write>(state: &AppState, console: &mut Console<R, W>) -> Result<()> {
    if !courses::accepts_new_courses(state.conn()?)? {
        warn!(
            columns = ?courses::course_columns(state.conn()?)?,
            "course table is missing catalog columns"
        );
        console.say(LAYOUT_REJECTED)?;
        return Ok(());
    }

    let course = NewCourse {
        crn: console.prompt("Enter CRN: ")?.trim().to_string(),
        title: console.prompt("Enter title: ")?,
        department: console.prompt("Enter department: ")?,
        time: console.prompt("Enter time: ")?,
        days: console.prompt("Enter days: ")?,
        semester: console.prompt("Enter semester: ")?,
        year: console.prompt("Enter year: ")?,
        credits: console.prompt("Enter credits: ")?,
    };
    if course.crn.is_empty() {
        console.say("CRN must not be empty.")?;
        return Ok(());
    }

    let conn = state.conn()?;
    if courses::course_exists(conn, &course.crn)? {
        info!(crn = %course.crn, "duplicate course rejected");
        console.say(&format!("A course with CRN {} already exists.", course.crn))?;
        return Ok(());
    }

    courses::insert_course(conn, &course)?;
    info!(crn = %course.crn, title = %course.title, "course added");
    console.say(&format!("Course {} added.", course.crn))?;
    Ok(())
}

fn remove_course<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
) -> Result<()> {
    let crn = console.prompt("Enter CRN: ")?.trim().to_string();
    let conn = state.conn()?;
    if !courses::course_exists(conn, &crn)? {
        console.say(&format!("No course found with CRN {}.", crn))?;
        return Ok(());
    }

    let answer = console.prompt(&format!(
        "Are you sure you want to remove course {}? (yes/no): ",
        crn
    ))?;
    if !answer.trim().eq_ignore_ascii_case("yes") {
        console.say("Removal cancelled.")?;
        return Ok(());
    }

    courses::delete_course(conn, &crn)?;
    info!(crn = %crn, "course removed");
    console.say(&format!("Course {} removed.", crn))?;
    Ok(())
}

pub fn print_roster<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
) -> Result<()> {
    let rows = courses::all_courses(state.conn()?)?;
    console.say("----- Courses -----")?;
    for row in &rows {
        console.say(&courses::format_row(row))?;
    }
    Ok(())
}
