//! SQLite operations backing the persistence slot.
//!
//! The deck is stored as a single JSON document under a named key in the
//! `app_state` key/value table.

use rusqlite::{Connection, OptionalExtension, Result, params};
use std::path::Path;

/// Opens (or creates) the database file and ensures the key/value table exists.
pub fn init_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    create_tables(&conn)?;
    Ok(conn)
}

#[cfg(test)]
pub(crate) fn init_database_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    create_tables(&conn)?;
    Ok(conn)
}

fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;
    Ok(())
}

/// Reads the value stored under `key`, or None if the slot was never written.
pub fn read_slot(key: &str, conn: &Connection) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM app_state WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
}

/// Replaces the value stored under `key`.
pub fn write_slot(key: &str, value: &str, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT INTO app_state (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}
