use std::io::{BufRead, Write};

use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::debug;

use crate::console::Console;
use crate::db;
use crate::error::Result;
use crate::state::AppState;

pub const COURSES_TABLE: &str = "courses";

/// The eight ordered fields of a new catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub crn: String,
    pub title: String,
    pub department: String,
    pub time: String,
    pub days: String,
    pub semester: String,
    pub year: String,
    pub credits: String,
}

/// Columns an added course is written to, in prompt order.
pub const COURSE_FIELDS: [&str; 8] = [
    "CRN",
    "TITLE",
    "DEPARTMENT",
    "TIME",
    "DAYS",
    "SEMESTER",
    "YEAR",
    "CREDITS",
];

pub fn course_columns(conn: &Connection) -> Result<Vec<String>> {
    Ok(db::table_columns(conn, COURSES_TABLE)?)
}

/// Whether the live course table has every column in [`COURSE_FIELDS`].
///
/// Extra columns are fine; they are left NULL on insert.
pub fn accepts_new_courses(conn: &Connection) -> Result<bool> {
    let cols = course_columns(conn)?;
    Ok(COURSE_FIELDS
        .iter()
        .all(|f| cols.iter().any(|c| c.eq_ignore_ascii_case(f))))
}

fn crn_column(conn: &Connection) -> Result<String> {
    // CRN is the first column in every course layout we have seen; fall back to
    // it by position if the name differs.
    let cols = course_columns(conn)?;
    Ok(cols
        .iter()
        .find(|c| c.eq_ignore_ascii_case("CRN"))
        .or_else(|| cols.first())
        .cloned()
        .unwrap_or_else(|| "CRN".to_string()))
}

fn row_values(row: &Row<'_>) -> rusqlite::Result<Vec<Value>> {
    let n = row.as_ref().column_count();
    (0..n).map(|i| row.get::<_, Value>(i)).collect()
}

pub fn course_exists(conn: &Connection, crn: &str) -> Result<bool> {
    Ok(find_course(conn, crn)?.is_some())
}

pub fn find_course(conn: &Connection, crn: &str) -> Result<Option<Vec<Value>>> {
    let sql = format!(
        "SELECT * FROM {} WHERE {} = ?",
        COURSES_TABLE,
        db::quote_ident(&crn_column(conn)?)
    );
    Ok(conn.query_row(&sql, [crn], row_values).optional()?)
}

pub fn insert_course(conn: &Connection, course: &NewCourse) -> Result<()> {
    conn.execute(
        "INSERT INTO courses(CRN, TITLE, DEPARTMENT, TIME, DAYS, SEMESTER, YEAR, CREDITS)
         VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        (
            &course.crn,
            &course.title,
            &course.department,
            &course.time,
            &course.days,
            &course.semester,
            &course.year,
            &course.credits,
        ),
    )?;
    Ok(())
}

pub fn delete_course(conn: &Connection, crn: &str) -> Result<usize> {
    let sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        COURSES_TABLE,
        db::quote_ident(&crn_column(conn)?)
    );
    Ok(conn.execute(&sql, [crn])?)
}

pub fn all_courses(conn: &Connection) -> Result<Vec<Vec<Value>>> {
    let mut stmt = conn.prepare("SELECT * FROM courses")?;
    let rows = stmt
        .query_map([], row_values)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Equality search on the `column_index`-th (zero based) introspected column.
///
/// Returns `None` when the index does not name a column.
pub fn search(
    conn: &Connection,
    column_index: usize,
    value: &str,
) -> Result<Option<Vec<Vec<Value>>>> {
    let columns = course_columns(conn)?;
    let Some(column) = columns.get(column_index) else {
        return Ok(None);
    };
    let sql = format!(
        "SELECT * FROM {} WHERE {}=?",
        COURSES_TABLE,
        db::quote_ident(column)
    );
    debug!(sql = %sql, "course search");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([value], row_values)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(rows))
}

/// Prompted course search shared by every role.
pub fn search_course<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
) -> Result<()> {
    let conn = state.conn()?;
    let columns = course_columns(conn)?;

    console.say("----- Search Courses -----")?;
    for (i, c) in columns.iter().enumerate() {
        console.say(&format!("{}. {}", i + 1, c))?;
    }
    let choice = console.prompt("Enter the number of the column to search by: ")?;
    let value = console.prompt("Enter the search value: ")?;

    let index = match choice.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= columns.len() => n - 1,
        _ => {
            console.say("Invalid column choice.")?;
            return Ok(());
        }
    };

    let rows = search(conn, index, &value)?.unwrap_or_default();
    if rows.is_empty() {
        console.say("No results found.")?;
        return Ok(());
    }

    let body = rows
        .iter()
        .map(|r| format_row(r))
        .collect::<Vec<_>>()
        .join("\n");
    console.say(&format!("Search Results:\n{}", body))?;
    Ok(())
}

/// Render a row in tuple notation, e.g. `(1002, 'Course 2', '10:30')`.
pub fn format_row(values: &[Value]) -> String {
    let parts: Vec<String> = values.iter().map(format_value).collect();
    if parts.len() == 1 {
        format!("({},)", parts[0])
    } else {
        format!("({})", parts.join(", "))
    }
}

fn format_value(v: &Value) -> String {
    match v {
        Value::Null => "None".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => format_real(*f),
        Value::Text(s) => quote_text(s),
        Value::Blob(b) => {
            let mut out = String::from("b'");
            for &byte in b {
                match byte {
                    b'\\' => out.push_str("\\\\"),
                    b'\'' => out.push_str("\\'"),
                    0x20..=0x7e => out.push(byte as char),
                    _ => out.push_str(&format!("\\x{:02x}", byte)),
                }
            }
            out.push('\'');
            out
        }
    }
}

fn format_real(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        let s = if f > 0.0 { "inf" } else { "-inf" };
        s.to_string()
    } else {
        f.to_string()
    }
}

fn quote_text(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
pub fn sample_course(crn: &str, title: &str) -> NewCourse {
    NewCourse {
        crn: crn.to_string(),
        title: title.to_string(),
        department: "MATH".to_string(),
        time: "9:00-10:00".to_string(),
        days: "MWF".to_string(),
        semester: "Fall".to_string(),
        year: "2026".to_string(),
        credits: "4".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{scripted, transcript};
    use crate::state::{test_state, AppState};

    fn legacy_layout_state() -> AppState {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE courses (
                CRN INTEGER PRIMARY KEY,
                CourseName TEXT,
                StartTime TEXT,
                EndTime TEXT,
                Day TEXT
            );
            INSERT INTO courses VALUES
                (1001, 'Course 1', '9:00', '10:00', 'Monday'),
                (1002, 'Course 2', '10:30', '11:30', 'Wednesday'),
                (1003, 'Course 3', '13:00', '14:00', 'Friday');",
        )
        .unwrap();
        AppState::new(None, conn)
    }

    #[test]
    fn search_by_title_prints_single_block() {
        let state = legacy_layout_state();
        let mut console = scripted(&["2", "Course 2"]);
        search_course(&state, &mut console).expect("search");
        let out = transcript(console);
        assert!(out.contains("1. CRN\n2. CourseName\n3. StartTime\n4. EndTime\n5. Day\n"));
        assert!(out.ends_with(
            "Search Results:\n(1002, 'Course 2', '10:30', '11:30', 'Wednesday')\n"
        ));
    }

    #[test]
    fn search_with_no_match_reports_no_results() {
        let state = legacy_layout_state();
        let mut console = scripted(&["1", "Unknown"]);
        search_course(&state, &mut console).unwrap();
        assert!(transcript(console).ends_with("No results found.\n"));
    }

    #[test]
    fn out_of_range_or_garbage_choice_is_rejected() {
        let state = legacy_layout_state();
        for choice in ["6", "0", "-1", "two", ""] {
            let mut console = scripted(&[choice, "value"]);
            search_course(&state, &mut console).unwrap();
            let out = transcript(console);
            assert!(out.ends_with("Invalid column choice.\n"), "choice {:?}", choice);
            assert!(!out.contains("Search Results"));
        }
    }

    #[test]
    fn search_value_is_bound_not_interpolated() {
        let state = legacy_layout_state();
        let mut console = scripted(&["2", "x' OR '1'='1"]);
        search_course(&state, &mut console).unwrap();
        assert!(transcript(console).ends_with("No results found.\n"));
        assert_eq!(all_courses(state.conn().unwrap()).unwrap().len(), 3);
    }

    #[test]
    fn search_is_deterministic_and_lists_every_hit() {
        let state = test_state();
        let conn = state.conn().unwrap();
        insert_course(conn, &sample_course("2001", "Algebra")).unwrap();
        insert_course(conn, &sample_course("2002", "Geometry")).unwrap();
        insert_course(conn, &sample_course("2003", "Physics")).unwrap();
        conn.execute("UPDATE courses SET DEPARTMENT = 'PHYS' WHERE CRN = '2003'", [])
            .unwrap();

        let first = search(conn, 2, "MATH").unwrap().unwrap();
        let second = search(conn, 2, "MATH").unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert!(search(conn, 8, "MATH").unwrap().is_none());

        let mut console = scripted(&["3", "MATH"]);
        search_course(&state, &mut console).unwrap();
        assert!(transcript(console).ends_with(
            "Search Results:\n\
             ('2001', 'Algebra', 'MATH', '9:00-10:00', 'MWF', 'Fall', 2026, 4)\n\
             ('2002', 'Geometry', 'MATH', '9:00-10:00', 'MWF', 'Fall', 2026, 4)\n"
        ));
    }

    #[test]
    fn search_menu_tracks_live_schema() {
        let state = test_state();
        let conn = state.conn().unwrap();
        conn.execute("ALTER TABLE courses ADD COLUMN ROOM TEXT", [])
            .unwrap();
        let mut console = scripted(&["9", "nowhere"]);
        search_course(&state, &mut console).unwrap();
        let out = transcript(console);
        assert!(out.contains("9. ROOM\n"));
        assert!(out.ends_with("No results found.\n"));
    }

    #[test]
    fn insert_support_follows_live_columns() {
        let state = test_state();
        let conn = state.conn().unwrap();
        assert!(accepts_new_courses(conn).unwrap());
        conn.execute("ALTER TABLE courses ADD COLUMN ROOM TEXT", [])
            .unwrap();
        assert!(accepts_new_courses(conn).unwrap());
        insert_course(conn, &sample_course("7", "Topology")).unwrap();
        let rows = all_courses(conn).unwrap();
        assert_eq!(rows[0].last(), Some(&Value::Null));

        let legacy = legacy_layout_state();
        assert!(!accepts_new_courses(legacy.conn().unwrap()).unwrap());
    }

    #[test]
    fn crn_lookup_works_against_integer_crn_column() {
        let state = legacy_layout_state();
        let conn = state.conn().unwrap();
        assert!(course_exists(conn, "1001").unwrap());
        assert!(!course_exists(conn, "9999").unwrap());
        assert_eq!(delete_course(conn, "1001").unwrap(), 1);
        assert!(!course_exists(conn, "1001").unwrap());
    }

    #[test]
    fn row_rendering_matches_tuple_notation() {
        assert_eq!(
            format_row(&[
                Value::Integer(1002),
                Value::Text("Course 2".into()),
                Value::Null,
                Value::Real(3.0),
                Value::Real(2.5),
            ]),
            "(1002, 'Course 2', None, 3.0, 2.5)"
        );
        assert_eq!(format_row(&[Value::Text("only".into())]), "('only',)");
        assert_eq!(format_value(&Value::Text("Intro's".into())), "\"Intro's\"");
        assert_eq!(
            format_value(&Value::Text("a'b\"c".into())),
            "'a\\'b\"c'"
        );
        assert_eq!(format_value(&Value::Blob(vec![b'a', 0])), "b'a\\x00'");
    }
}
