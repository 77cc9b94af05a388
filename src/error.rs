//! Error types for the SQLite CRUD wrappers

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqliteError {
    /// Any failure reported by the engine, passed through untouched.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("Task join error: {0}")]
    TaskJoin(String),
}

impl SqliteError {
    /// The engine's native error, if this failure came from SQLite.
    pub fn as_engine_error(&self) -> Option<&rusqlite::Error> {
        match self {
            SqliteError::Sqlite(err) => Some(err),
            SqliteError::TaskJoin(_) => None,
        }
    }
}

impl From<tokio::task::JoinError> for SqliteError {
    fn from(err: tokio::task::JoinError) -> Self {
        SqliteError::TaskJoin(err.to_string())
    }
}

pub type Result<T, E = SqliteError> = std::result::Result<T, E>;
