//! Bulk provisioning of accounts and courses from a JSON file.
//!
//! ```json
//! {
//!   "admins":      [{ "email": "...", "id": 1, "firstName": "...", "lastName": "...", "title": "...", "office": "..." }],
//!   "instructors": [{ "email": "...", "id": 2, "firstName": "...", "lastName": "...", "title": "...", "hireYear": 2020, "department": "..." }],
//!   "students":    [{ "email": "...", "id": 3, "firstName": "...", "lastName": "...", "gradYear": 2027, "major": "..." }],
//!   "courses":     [{ "crn": "1001", "title": "...", "department": "...", "time": "...", "days": "...", "semester": "...", "year": 2026, "credits": 4 }]
//! }
//! ```
//!
//! Rows whose key already exists are left alone.

use anyhow::Context;
use rusqlite::Connection;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Seed {
    pub admins: Vec<SeedAdmin>,
    pub instructors: Vec<SeedInstructor>,
    pub students: Vec<SeedStudent>,
    pub courses: Vec<SeedCourse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedAdmin {
    pub email: String,
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub office: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedInstructor {
    pub email: String,
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub hire_year: Option<i64>,
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedStudent {
    pub email: String,
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub grad_year: Option<i64>,
    #[serde(default)]
    pub major: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedCourse {
    pub crn: String,
    pub title: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub days: Option<String>,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub credits: Option<i64>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub accounts: usize,
    pub courses: usize,
}

pub fn load_seed_file(path: &Path) -> anyhow::Result<Seed> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.to_string_lossy()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse seed file {}", path.to_string_lossy()))
}

/// Insert every seed row in one transaction; returns how many were new.
pub fn apply_seed(conn: &Connection, seed: &Seed) -> anyhow::Result<SeedSummary> {
    let tx = conn
        .unchecked_transaction()
        .context("failed to begin seed transaction")?;
    let mut summary = SeedSummary::default();

    for a in &seed.admins {
        summary.accounts += tx.execute(
            "INSERT OR IGNORE INTO admin(EMAIL, ID, NAME, SURNAME, TITLE, OFFICE)
             VALUES(?, ?, ?, ?, ?, ?)",
            (&a.email, a.id, &a.first_name, &a.last_name, &a.title, &a.office),
        )?;
    }
    for i in &seed.instructors {
        summary.accounts += tx.execute(
            "INSERT OR IGNORE INTO instructor(EMAIL, ID, NAME, SURNAME, TITLE, HIREYEAR, DEPT)
             VALUES(?, ?, ?, ?, ?, ?, ?)",
            (
                &i.email,
                i.id,
                &i.first_name,
                &i.last_name,
                &i.title,
                i.hire_year,
                &i.department,
            ),
        )?;
    }
    for s in &seed.students {
        summary.accounts += tx.execute(
            "INSERT OR IGNORE INTO student(EMAIL, ID, NAME, SURNAME, GRADYEAR, MAJOR)
             VALUES(?, ?, ?, ?, ?, ?)",
            (&s.email, s.id, &s.first_name, &s.last_name, s.grad_year, &s.major),
        )?;
    }
    for c in &seed.courses {
        summary.courses += tx.execute(
            "INSERT OR IGNORE INTO courses(CRN, TITLE, DEPARTMENT, TIME, DAYS, SEMESTER, YEAR, CREDITS)
             VALUES(?, ?, ?, ?, ?, ?, ?, ?)",
            (
                &c.crn,
                &c.title,
                &c.department,
                &c.time,
                &c.days,
                &c.semester,
                c.year,
                c.credits,
            ),
        )?;
    }

    tx.commit().context("failed to commit seed")?;
    info!(
        accounts = summary.accounts,
        courses = summary.courses,
        "seed applied"
    );
    Ok(summary)
}
