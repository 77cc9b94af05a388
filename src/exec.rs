//! Statement execution shared by the blocking and async wrappers

use std::sync::Arc;

use rusqlite::{params_from_iter, Connection};
use tracing::{debug, info};

use crate::config::SqliteConfig;
use crate::crud::Selection;
use crate::error::Result;
use crate::query::SqlQuery;
use crate::value::{Row, Value};

pub(crate) fn open_connection(config: &SqliteConfig) -> Result<Connection> {
    info!(path = %config.db_path, table = %config.table, "opening sqlite database");
    let conn = Connection::open(&config.db_path)?;
    if let Some(timeout) = config.busy_timeout() {
        conn.busy_timeout(timeout)?;
    }
    Ok(conn)
}

pub(crate) fn close_connection(conn: Connection, table: &str) -> Result<()> {
    info!(table, "closing sqlite database");
    conn.close().map_err(|(_, err)| err)?;
    Ok(())
}

pub(crate) fn run_select(
    conn: &Connection,
    table: &str,
    query: &SqlQuery,
    fetch_all: bool,
) -> Result<Selection> {
    debug!(table, statement = %query.statement, "select");
    let mut stmt = conn.prepare(&query.statement)?;
    let columns: Arc<[String]> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();
    let width = columns.len();
    let mut rows = stmt.query(params_from_iter(query.params.iter()))?;

    let read_row = |row: &rusqlite::Row<'_>| -> Result<Row> {
        let mut values = Vec::with_capacity(width);
        for idx in 0..width {
            values.push(row.get::<_, Value>(idx)?);
        }
        Ok(Row::new(columns.clone(), values))
    };

    if !fetch_all {
        return match rows.next()? {
            Some(row) => Ok(Selection::One(Some(read_row(row)?))),
            None => Ok(Selection::One(None)),
        };
    }

    let mut result = Vec::new();
    while let Some(row) = rows.next()? {
        result.push(read_row(row)?);
    }
    Ok(Selection::All(result))
}

pub(crate) fn run_insert(
    conn: &Connection,
    table: &str,
    query: &SqlQuery,
    return_id: bool,
) -> Result<Option<i64>> {
    debug!(table, statement = %query.statement, "insert");
    conn.execute(&query.statement, params_from_iter(query.params.iter()))?;
    Ok(return_id.then(|| conn.last_insert_rowid()))
}

/// Runs an UPDATE or DELETE and reports the affected row count.
pub(crate) fn run_write(conn: &Connection, table: &str, query: &SqlQuery) -> Result<usize> {
    debug!(table, statement = %query.statement, "write");
    let affected = conn.execute(&query.statement, params_from_iter(query.params.iter()))?;
    Ok(affected)
}
