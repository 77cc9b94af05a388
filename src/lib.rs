//! Table-bound CRUD helpers over SQLite.
//!
//! # Intention
//!
//! - Build SELECT / INSERT / UPDATE / DELETE statements from column lists,
//!   condition lists and value mappings, and hand them to SQLite.
//! - Offer the same operations in a blocking ([`QueryWrapper`]) and a
//!   suspending ([`AsyncQueryWrapper`]) flavour.
//!
//! # Architectural Boundaries
//!
//! - Parsing, validation, planning and storage belong to SQLite.
//! - Row values are bound as parameters. Column names, conditions, aggregates
//!   and conflict clauses are spliced into the statement text verbatim and
//!   must come from trusted callers.
//! - An update or delete with no condition text touches every row.
//!
//! # Example
//!
//! ```rust,no_run
//! use sqlite_crud::{Crud, CreateOperation, Params, QueryWrapper, ReadOperation};
//!
//! # fn main() -> sqlite_crud::Result<()> {
//! let users = QueryWrapper::open("app.db", "users")?;
//! let id = users.insert(CreateOperation::new(Params::new().with_value("name", "ada")))?;
//! let row = users
//!     .select(ReadOperation::new().with_condition(format!("id = {}", id.unwrap_or_default())))?
//!     .into_row();
//! # Ok(())
//! # }
//! ```

mod async_sqlite;
mod config;
mod crud;
mod error;
mod exec;
pub mod query;
mod sqlite;
mod value;

pub use async_sqlite::AsyncQueryWrapper;
pub use config::{SqliteConfig, MEMORY_PATH};
pub use crud::{
    AsyncCrud, CreateOperation, Crud, CrudOperation, CrudOutcome, DeleteOperation, ReadOperation,
    Selection, UpdateOperation,
};
pub use error::{Result, SqliteError};
pub use query::{Condition, Params, SqlQuery};
pub use sqlite::QueryWrapper;
pub use value::{Row, Value};
