use rusqlite::Connection;

use crate::config::SqliteConfig;
use crate::crud::{
    CreateOperation, Crud, DeleteOperation, ReadOperation, Selection, UpdateOperation,
};
use crate::error::Result;
use crate::exec;
use crate::query::{delete_statement, insert_statement, select_statement, update_statement};
use crate::value::Row;

/// Blocking CRUD wrapper bound to one table.
///
/// The connection is opened when the wrapper is built and lives until
/// [`QueryWrapper::close`] or drop. Every statement runs in SQLite's
/// autocommit mode, so writes are committed before a call returns.
#[derive(Debug)]
pub struct QueryWrapper {
    config: SqliteConfig,
    conn: Connection,
}

impl QueryWrapper {
    /// Open `path` and bind the wrapper to `table`
    pub fn open(path: impl Into<String>, table: impl Into<String>) -> Result<Self> {
        Self::with_config(SqliteConfig::new(path, table))
    }

    pub fn with_config(config: SqliteConfig) -> Result<Self> {
        let conn = exec::open_connection(&config)?;
        Ok(Self { config, conn })
    }

    /// Wrap an already open connection
    pub fn from_connection(conn: Connection, table: impl Into<String>) -> Self {
        let path = conn.path().unwrap_or_default().to_string();
        Self {
            config: SqliteConfig::new(path, table),
            conn,
        }
    }

    pub fn table(&self) -> &str {
        &self.config.table
    }

    pub fn path(&self) -> &str {
        &self.config.db_path
    }

    /// Release the connection, surfacing any error SQLite reports on close
    pub fn close(self) -> Result<()> {
        exec::close_connection(self.conn, &self.config.table)
    }

    /// First matching row, or `None`. Ignores `fetch_all`.
    pub fn fetch_one(&self, op: ReadOperation) -> Result<Option<Row>> {
        let query = select_statement(self.table(), &op);
        exec::run_select(&self.conn, self.table(), &query, false).map(Selection::into_row)
    }

    /// Every matching row. Ignores `fetch_all`.
    pub fn fetch_all(&self, op: ReadOperation) -> Result<Vec<Row>> {
        let query = select_statement(self.table(), &op);
        exec::run_select(&self.conn, self.table(), &query, true).map(Selection::into_rows)
    }
}

impl Crud for QueryWrapper {
    fn select(&self, op: ReadOperation) -> Result<Selection> {
        let query = select_statement(self.table(), &op);
        exec::run_select(&self.conn, self.table(), &query, op.fetch_all)
    }

    fn insert(&self, op: CreateOperation) -> Result<Option<i64>> {
        let query = insert_statement(self.table(), &op);
        exec::run_insert(&self.conn, self.table(), &query, op.return_id)
    }

    fn update(&self, op: UpdateOperation) -> Result<usize> {
        let query = update_statement(self.table(), &op);
        exec::run_write(&self.conn, self.table(), &query)
    }

    fn delete(&self, op: DeleteOperation) -> Result<usize> {
        let query = delete_statement(self.table(), &op);
        exec::run_write(&self.conn, self.table(), &query)
    }
}
