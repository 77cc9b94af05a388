//! CRUD operation descriptions and the traits both wrappers implement

use async_trait::async_trait;

use crate::error::Result;
use crate::query::{Condition, Params};
use crate::value::Row;

/// SELECT against the wrapper's table
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReadOperation {
    /// Projected columns; empty means `*`
    pub fields: Vec<String>,
    pub condition: Option<Condition>,
    /// Replaces `fields` entirely when set
    pub aggregate: Option<String>,
    pub fetch_all: bool,
}

impl ReadOperation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_condition(mut self, condition: impl Into<Condition>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_aggregate(mut self, aggregate: impl Into<String>) -> Self {
        self.aggregate = Some(aggregate.into());
        self
    }

    /// Return every matching row instead of only the first.
    pub fn fetch_all(mut self) -> Self {
        self.fetch_all = true;
        self
    }
}

/// INSERT into the wrapper's table
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOperation {
    /// Empty data inserts a row of column defaults
    pub data: Params,
    pub on_conflict: Option<String>,
    pub return_id: bool,
}

impl Default for CreateOperation {
    fn default() -> Self {
        Self {
            data: Params::new(),
            on_conflict: None,
            return_id: true,
        }
    }
}

impl CreateOperation {
    pub fn new(data: Params) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn with_on_conflict(mut self, clause: impl Into<String>) -> Self {
        self.on_conflict = Some(clause.into());
        self
    }

    pub fn with_return_id(mut self, return_id: bool) -> Self {
        self.return_id = return_id;
        self
    }
}

/// UPDATE on the wrapper's table.
///
/// Without a condition every row is updated.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOperation {
    pub updates: Params,
    pub condition: Option<Condition>,
    pub on_conflict: Option<String>,
}

impl UpdateOperation {
    pub fn new(updates: Params) -> Self {
        Self {
            updates,
            condition: None,
            on_conflict: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<Condition>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_on_conflict(mut self, clause: impl Into<String>) -> Self {
        self.on_conflict = Some(clause.into());
        self
    }
}

/// DELETE from the wrapper's table.
///
/// An empty condition list deletes every row.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOperation {
    pub condition: Condition,
    pub on_conflict: Option<String>,
}

impl DeleteOperation {
    pub fn new(condition: impl Into<Condition>) -> Self {
        Self {
            condition: condition.into(),
            on_conflict: None,
        }
    }

    pub fn with_on_conflict(mut self, clause: impl Into<String>) -> Self {
        self.on_conflict = Some(clause.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CrudOperation {
    Create(CreateOperation),
    Read(ReadOperation),
    Update(UpdateOperation),
    Delete(DeleteOperation),
}

/// Rows produced by a read
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// First matching row, if any
    One(Option<Row>),
    All(Vec<Row>),
}

impl Selection {
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            Selection::One(row) => row.into_iter().collect(),
            Selection::All(rows) => rows,
        }
    }

    /// The first row of the selection.
    pub fn into_row(self) -> Option<Row> {
        match self {
            Selection::One(row) => row,
            Selection::All(rows) => rows.into_iter().next(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Selection::One(row) => row.is_none(),
            Selection::All(rows) => rows.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CrudOutcome {
    Selected(Selection),
    /// Engine-assigned rowid when requested
    Inserted(Option<i64>),
    /// Rows touched by an update or delete
    Affected(usize),
}

/// Blocking table operations
pub trait Crud {
    fn select(&self, op: ReadOperation) -> Result<Selection>;

    fn insert(&self, op: CreateOperation) -> Result<Option<i64>>;

    fn update(&self, op: UpdateOperation) -> Result<usize>;

    fn delete(&self, op: DeleteOperation) -> Result<usize>;

    fn execute_crud(&self, op: CrudOperation) -> Result<CrudOutcome> {
        Ok(match op {
            CrudOperation::Create(op) => CrudOutcome::Inserted(self.insert(op)?),
            CrudOperation::Read(op) => CrudOutcome::Selected(self.select(op)?),
            CrudOperation::Update(op) => CrudOutcome::Affected(self.update(op)?),
            CrudOperation::Delete(op) => CrudOutcome::Affected(self.delete(op)?),
        })
    }
}

/// Suspending table operations
#[async_trait]
pub trait AsyncCrud: Send + Sync {
    async fn select(&self, op: ReadOperation) -> Result<Selection>;

    async fn insert(&self, op: CreateOperation) -> Result<Option<i64>>;

    async fn update(&self, op: UpdateOperation) -> Result<usize>;

    async fn delete(&self, op: DeleteOperation) -> Result<usize>;

    async fn execute_crud(&self, op: CrudOperation) -> Result<CrudOutcome> {
        Ok(match op {
            CrudOperation::Create(op) => CrudOutcome::Inserted(self.insert(op).await?),
            CrudOperation::Read(op) => CrudOutcome::Selected(self.select(op).await?),
            CrudOperation::Update(op) => CrudOutcome::Affected(self.update(op).await?),
            CrudOperation::Delete(op) => CrudOutcome::Affected(self.delete(op).await?),
        })
    }
}
