use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Path used for a private in-memory database
pub const MEMORY_PATH: &str = ":memory:";

/// Where a wrapper's database lives and which table it is bound to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqliteConfig {
    /// Path to the SQLite database file
    pub db_path: String,
    /// Table every operation targets. Not checked against the schema.
    pub table: String,
    /// Passed to SQLite as the busy handler timeout
    #[serde(default)]
    pub busy_timeout_ms: Option<u64>,
}

impl SqliteConfig {
    pub fn new(db_path: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            table: table.into(),
            busy_timeout_ms: None,
        }
    }

    pub fn in_memory(table: impl Into<String>) -> Self {
        Self::new(MEMORY_PATH, table)
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn busy_timeout(&self) -> Option<Duration> {
        self.busy_timeout_ms.map(Duration::from_millis)
    }
}
