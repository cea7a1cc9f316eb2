use std::io::{BufRead, Write};

use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::{info, warn};

use crate::account::{Account, Admin, Instructor, Profile, Role, Schedule, Student};
use crate::console::Console;
use crate::db;
use crate::error::Result;
use crate::state::AppState;

pub const LOGIN_FAILED: &str = "Incorrect username or password, please try again";

/// Prompt for credentials and resolve them to an account.
///
/// Prints exactly one welcome or failure line. The failure line is the same
/// whichever table came closest to matching.
pub fn login<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
) -> Result<Option<Account>> {
    let email = console.prompt("Enter your email: ")?.trim().to_string();
    let id = console.prompt("Enter your ID: ")?.trim().to_string();

    let account = authenticate(state.conn()?, &email, &id)?;
    match &account {
        Some(acc) => {
            info!(
                role = %acc.role(),
                email = %acc.email(),
                name = %acc.full_name(),
                "login succeeded"
            );
            console.say(acc.role().welcome())?;
        }
        None => {
            warn!(email = %email, "login failed");
            console.say(LOGIN_FAILED)?;
        }
    }
    Ok(account)
}

/// Look `email`/`id` up in each credential table in [`Role::LOGIN_ORDER`].
pub fn authenticate(conn: &Connection, email: &str, id: &str) -> Result<Option<Account>> {
    for role in Role::LOGIN_ORDER {
        if let Some(account) = lookup(conn, role, email, id)? {
            return Ok(Some(account));
        }
    }
    Ok(None)
}

fn credential_columns(role: Role) -> &'static [&'static str] {
    match role {
        Role::Admin => &["EMAIL", "ID", "NAME", "SURNAME", "TITLE", "OFFICE"],
        Role::Instructor => &["EMAIL", "ID", "NAME", "SURNAME", "TITLE", "HIREYEAR", "DEPT"],
        Role::Student => &["EMAIL", "ID", "NAME", "SURNAME", "GRADYEAR", "MAJOR"],
    }
}

fn lookup(conn: &Connection, role: Role, email: &str, id: &str) -> Result<Option<Account>> {
    let columns = credential_columns(role);
    let present = db::table_columns(conn, role.table())?;
    let missing: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|c| !present.iter().any(|p| p.eq_ignore_ascii_case(c)))
        .collect();
    if !missing.is_empty() {
        warn!(table = role.table(), ?missing, "credential table skipped");
        return Ok(None);
    }

    let sql = format!(
        "SELECT {} FROM {} WHERE EMAIL = ?1 AND CAST(ID AS TEXT) = ?2",
        columns.join(", "),
        role.table()
    );
    let account = conn
        .query_row(&sql, [email, id], |row| account_from_row(role, row))
        .optional()?;
    Ok(account)
}

fn account_from_row(role: Role, row: &Row<'_>) -> rusqlite::Result<Account> {
    let text = |i: usize| -> rusqlite::Result<String> { Ok(value_text(row.get::<_, Value>(i)?)) };
    let profile = Profile {
        email: text(0)?,
        id: text(1)?,
        first_name: text(2)?,
        last_name: text(3)?,
    };
    Ok(match role {
        Role::Admin => Account::Admin(Admin {
            profile,
            title: text(4)?,
            office: text(5)?,
        }),
        Role::Instructor => Account::Instructor(Instructor {
            profile,
            title: text(4)?,
            year: text(5)?,
            department: text(6)?,
            schedule: Schedule::new(),
        }),
        Role::Student => Account::Student(Student {
            profile,
            year: text(4)?,
            major: text(5)?,
            schedule: Schedule::new(),
        }),
    })
}

fn value_text(v: Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(b) => String::from_utf8_lossy(&b).into_owned(),
    }
}

#[cfg(test)]
pub fn seed_accounts(conn: &Connection) {
    conn.execute_batch(
        "INSERT INTO admin VALUES('admin@example.com', 1, 'Ada', 'Lovelace', 'Registrar', 'Dobbs 101');
         INSERT INTO instructor VALUES('instructor@example.com', 2, 'Alan', 'Turing', 'Professor', 1946, 'CS');
         INSERT INTO student VALUES('student@example.com', 3, 'Grace', 'Hopper', 2027, 'Math');",
    )
    .expect("seed accounts");
}
