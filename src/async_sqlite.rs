//! Suspending CRUD wrapper
//!
//! rusqlite connections are not `Sync`, so the handle sits behind a mutex and
//! every call runs on tokio's blocking pool. The mutex serializes access to
//! the single handle; it does not queue, retry, or time out.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;
use tracing::warn;

use crate::config::SqliteConfig;
use crate::crud::{
    AsyncCrud, CreateOperation, DeleteOperation, ReadOperation, Selection, UpdateOperation,
};
use crate::error::Result;
use crate::exec;
use crate::query::{delete_statement, insert_statement, select_statement, update_statement};
use crate::value::Row;

/// Async counterpart of [`crate::QueryWrapper`].
///
/// [`AsyncQueryWrapper::connect`] resolves only once the database is open, so
/// the first operation never races the open.
#[derive(Debug)]
pub struct AsyncQueryWrapper {
    config: SqliteConfig,
    conn: Arc<Mutex<Connection>>,
}

impl AsyncQueryWrapper {
    /// Open `path` and bind the wrapper to `table`
    pub async fn connect(path: impl Into<String>, table: impl Into<String>) -> Result<Self> {
        Self::with_config(SqliteConfig::new(path, table)).await
    }

    pub async fn with_config(config: SqliteConfig) -> Result<Self> {
        let open_config = config.clone();
        let conn =
            tokio::task::spawn_blocking(move || exec::open_connection(&open_config)).await??;
        Ok(Self {
            config,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Wrap an already open connection
    pub fn from_connection(conn: Connection, table: impl Into<String>) -> Self {
        let path = conn.path().unwrap_or_default().to_string();
        Self {
            config: SqliteConfig::new(path, table),
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn table(&self) -> &str {
        &self.config.table
    }

    pub fn path(&self) -> &str {
        &self.config.db_path
    }

    /// Release the connection.
    ///
    /// If a cancelled call still holds the handle, it is released when that
    /// call finishes instead.
    pub async fn close(self) -> Result<()> {
        let table = self.config.table;
        match Arc::try_unwrap(self.conn) {
            Ok(conn) => {
                let conn = conn.into_inner();
                tokio::task::spawn_blocking(move || exec::close_connection(conn, &table)).await?
            }
            Err(_) => {
                warn!(table = %table, "connection still in use, close deferred to last holder");
                Ok(())
            }
        }
    }

    /// Run `f` against the connection on the blocking pool
    async fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection, &str) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        let table = self.config.table.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn.blocking_lock();
            f(&guard, &table)
        })
        .await?
    }

    /// First matching row, or `None`. Ignores `fetch_all`.
    pub async fn fetch_one(&self, op: ReadOperation) -> Result<Option<Row>> {
        let query = select_statement(self.table(), &op);
        self.with_connection(move |conn, table| exec::run_select(conn, table, &query, false))
            .await
            .map(Selection::into_row)
    }

    /// Every matching row. Ignores `fetch_all`.
    pub async fn fetch_all(&self, op: ReadOperation) -> Result<Vec<Row>> {
        let query = select_statement(self.table(), &op);
        self.with_connection(move |conn, table| exec::run_select(conn, table, &query, true))
            .await
            .map(Selection::into_rows)
    }
}

#[async_trait]
impl AsyncCrud for AsyncQueryWrapper {
    async fn select(&self, op: ReadOperation) -> Result<Selection> {
        let query = select_statement(self.table(), &op);
        let fetch_all = op.fetch_all;
        self.with_connection(move |conn, table| exec::run_select(conn, table, &query, fetch_all))
            .await
    }

    async fn insert(&self, op: CreateOperation) -> Result<Option<i64>> {
        let query = insert_statement(self.table(), &op);
        let return_id = op.return_id;
        self.with_connection(move |conn, table| exec::run_insert(conn, table, &query, return_id))
            .await
    }

    async fn update(&self, op: UpdateOperation) -> Result<usize> {
        let query = update_statement(self.table(), &op);
        self.with_connection(move |conn, table| exec::run_write(conn, table, &query))
            .await
    }

    async fn delete(&self, op: DeleteOperation) -> Result<usize> {
        let query = delete_statement(self.table(), &op);
        self.with_connection(move |conn, table| exec::run_write(conn, table, &query))
            .await
    }
}
