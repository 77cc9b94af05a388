use rusqlite::{Connection, Result};
use std::str::FromStr;
use tempfile::NamedTempFile;
use tracing::Level;

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() {
    // if LOG_LEVEL env var is set, use it
    let level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|l| Level::from_str(&l).ok())
        .unwrap_or(Level::INFO);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_test_writer()
        .try_init();
}

// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL DEFAULT 'anonymous',
            email TEXT UNIQUE,
            age INTEGER
        );
        CREATE TABLE strict_users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );
        "#,
    )
}

// Helper function to create an in-memory database for testing
#[allow(dead_code)]
pub fn create_test_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    initialize_schema(&conn)?;
    Ok(conn)
}

// Helper function to create a temporary file-based database
pub fn create_temp_db() -> Result<NamedTempFile> {
    let temp_file = NamedTempFile::new().unwrap();
    let conn = Connection::open(temp_file.path())?;
    initialize_schema(&conn)?;
    Ok(temp_file)
}

#[allow(dead_code)]
pub fn temp_path(file: &NamedTempFile) -> String {
    file.path().to_str().unwrap().to_string()
}
