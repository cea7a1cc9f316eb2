use rusqlite::Connection;
use std::path::Path;

pub fn open_db(path: &Path) -> anyhow::Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = Connection::open(path)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

#[cfg(test)]
pub fn open_in_memory() -> anyhow::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    ensure_schema(&conn)?;
    Ok(conn)
}

fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    // Tables created by an earlier seeding step keep their own layout; the
    // course search menu follows whatever columns are actually there.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS admin(
            EMAIL TEXT PRIMARY KEY,
            ID INTEGER NOT NULL,
            NAME TEXT NOT NULL,
            SURNAME TEXT NOT NULL,
            TITLE TEXT,
            OFFICE TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS instructor(
            EMAIL TEXT PRIMARY KEY,
            ID INTEGER NOT NULL,
            NAME TEXT NOT NULL,
            SURNAME TEXT NOT NULL,
            TITLE TEXT,
            HIREYEAR INTEGER,
            DEPT TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS student(
            EMAIL TEXT PRIMARY KEY,
            ID INTEGER NOT NULL,
            NAME TEXT NOT NULL,
            SURNAME TEXT NOT NULL,
            GRADYEAR INTEGER,
            MAJOR TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS courses(
            CRN TEXT PRIMARY KEY,
            TITLE TEXT NOT NULL,
            DEPARTMENT TEXT,
            TIME TEXT,
            DAYS TEXT,
            SEMESTER TEXT,
            YEAR INTEGER,
            CREDITS INTEGER
        )",
        [],
    )?;

    Ok(())
}

/// Column names of `table` in declared order.
pub fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let sql = format!("PRAGMA table_info({})", quote_ident(table));
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        out.push(name);
    }
    Ok(out)
}

/// Quote a schema-derived name for use as an SQL identifier.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Flush anything still pending and release the handle.
pub fn commit_and_close(conn: Connection) -> rusqlite::Result<()> {
    if !conn.is_autocommit() {
        conn.execute_batch("COMMIT")?;
    }
    conn.close().map_err(|(_, e)| e)
}
