use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".faculty-directory-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "directory.sqlite";

/// Ensure the database file exists, run lazy migrations, and return a live
/// connection. The function also toggles `PRAGMA foreign_keys = ON` so the
/// referential integrity checks in our schema behave the same during tests
/// and production runs.
pub(super) fn open_connection() -> Result<Connection> {
    let db_path = db_path()?;

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(&db_path).context("failed to open SQLite database")?;
    prepare(&conn)?;
    Ok(conn)
}

/// In-memory variant used by the integration tests so they never touch the
/// on-disk database.
pub(super) fn open_in_memory_connection() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    prepare(&conn)?;
    Ok(conn)
}

fn prepare(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign keys")?;
    ensure_schema(conn)
}

fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS teachers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            last_name TEXT NOT NULL,
            first_name TEXT NOT NULL,
            middle_name TEXT NOT NULL DEFAULT '',
            position TEXT NOT NULL,
            bio TEXT NOT NULL DEFAULT '',
            photo_url TEXT NOT NULL DEFAULT '',
            contact_email TEXT NOT NULL DEFAULT '',
            contact_phone TEXT NOT NULL DEFAULT '',
            public INTEGER NOT NULL DEFAULT 1,
            order_index INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("failed to create teachers table")?;

    // The `ord` column preserves insertion order; the first category is the
    // grouping key for the gallery, so the order is load-bearing.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS teacher_categories (
            teacher_id INTEGER NOT NULL,
            ord INTEGER NOT NULL,
            name TEXT NOT NULL,
            PRIMARY KEY (teacher_id, ord),
            FOREIGN KEY(teacher_id) REFERENCES teachers(id) ON DELETE CASCADE
        )",
        [],
    )
    .context("failed to create teacher_categories table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS teacher_subjects (
            teacher_id INTEGER NOT NULL,
            ord INTEGER NOT NULL,
            name TEXT NOT NULL,
            PRIMARY KEY (teacher_id, ord),
            FOREIGN KEY(teacher_id) REFERENCES teachers(id) ON DELETE CASCADE
        )",
        [],
    )
    .context("failed to create teacher_subjects table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS admins (
            email TEXT PRIMARY KEY,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("failed to create admins table")?;

    Ok(())
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
