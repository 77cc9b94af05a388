//! Statement assembly.
//!
//! Column names, conditions, aggregates and conflict clauses are spliced into
//! the statement text exactly as given. Only row values travel as bound
//! parameters. Callers are trusted to pass well-formed SQL fragments.

use serde::{Deserialize, Serialize};

use crate::crud::{CreateOperation, DeleteOperation, ReadOperation, UpdateOperation};
use crate::value::Value;

/// Ordered column to value bindings
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Params {
    pub values: Vec<(String, Value)>,
}

impl Params {
    /// Create a new Params object
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value. Re-adding a column replaces its value in place.
    pub fn with_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.values.iter_mut().find(|(col, _)| col == name) {
            Some((_, existing)) => *existing = value,
            None => self.values.push((name.to_string(), value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(col, _)| col.as_str())
    }

    fn bound_values(&self) -> Vec<Value> {
        self.values.iter().map(|(_, v)| v.clone()).collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            let name: String = k.into();
            params.insert(&name, v);
        }
        params
    }
}

/// Raw filter predicate(s) for a WHERE clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    /// A single predicate, used verbatim
    Raw(String),
    /// Predicates joined with AND, in order
    All(Vec<String>),
}

impl Condition {
    pub fn to_sql(&self) -> String {
        match self {
            Condition::Raw(text) => text.clone(),
            Condition::All(parts) => parts.join(" AND "),
        }
    }
}

impl From<&str> for Condition {
    fn from(value: &str) -> Self {
        Condition::Raw(value.to_string())
    }
}

impl From<String> for Condition {
    fn from(value: String) -> Self {
        Condition::Raw(value)
    }
}

impl From<Vec<String>> for Condition {
    fn from(value: Vec<String>) -> Self {
        Condition::All(value)
    }
}

impl From<Vec<&str>> for Condition {
    fn from(value: Vec<&str>) -> Self {
        Condition::All(value.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Condition {
    fn from(value: [&str; N]) -> Self {
        Condition::All(value.into_iter().map(String::from).collect())
    }
}

/// SQL statement with positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub statement: String,
    pub params: Vec<Value>,
}

impl SqlQuery {
    pub fn new(statement: &str) -> Self {
        Self {
            statement: statement.to_string(),
            params: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: Vec<Value>) -> Self {
        self.params = params;
        self
    }
}

// Empty condition text means no WHERE clause at all, so the statement
// covers the whole table.
fn where_clause(condition: Option<&Condition>) -> String {
    match condition.map(Condition::to_sql) {
        Some(text) if !text.trim().is_empty() => format!(" WHERE {}", text),
        _ => String::new(),
    }
}

fn conflict_clause(on_conflict: Option<&str>) -> String {
    match on_conflict {
        Some(clause) if !clause.is_empty() => format!(" ON CONFLICT {}", clause),
        _ => String::new(),
    }
}

pub fn select_statement(table: &str, op: &ReadOperation) -> SqlQuery {
    let projection = match &op.aggregate {
        Some(aggregate) => aggregate.clone(),
        None if op.fields.is_empty() => "*".to_string(),
        None => op.fields.join(", "),
    };
    let statement = format!(
        "SELECT {} FROM {}{}",
        projection,
        table,
        where_clause(op.condition.as_ref())
    );
    SqlQuery::new(&statement)
}

pub fn insert_statement(table: &str, op: &CreateOperation) -> SqlQuery {
    let mut statement = if op.data.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES", table)
    } else {
        let columns = op.data.columns().collect::<Vec<_>>().join(", ");
        let placeholders = vec!["?"; op.data.len()].join(", ");
        format!("INSERT INTO {} ({}) VALUES ({})", table, columns, placeholders)
    };
    statement.push_str(&conflict_clause(op.on_conflict.as_deref()));
    SqlQuery::new(&statement).with_params(op.data.bound_values())
}

/// Empty `updates` yields an empty SET list; the engine rejects it.
pub fn update_statement(table: &str, op: &UpdateOperation) -> SqlQuery {
    let set_clause = op
        .updates
        .columns()
        .map(|col| format!("{} = ?", col))
        .collect::<Vec<_>>()
        .join(", ");
    let statement = format!(
        "UPDATE {} SET {}{}{}",
        table,
        set_clause,
        where_clause(op.condition.as_ref()),
        conflict_clause(op.on_conflict.as_deref())
    );
    SqlQuery::new(&statement).with_params(op.updates.bound_values())
}

pub fn delete_statement(table: &str, op: &DeleteOperation) -> SqlQuery {
    let statement = format!(
        "DELETE FROM {}{}{}",
        table,
        where_clause(Some(&op.condition)),
        conflict_clause(op.on_conflict.as_deref())
    );
    SqlQuery::new(&statement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_defaults_to_all_columns() {
        let query = select_statement("users", &ReadOperation::new());
        assert_eq!(query.statement, "SELECT * FROM users");
        assert!(query.params.is_empty());
    }

    #[test]
    fn select_keeps_column_order() {
        let op = ReadOperation::new().with_fields(["email", "name"]);
        let query = select_statement("users", &op);
        assert_eq!(query.statement, "SELECT email, name FROM users");
    }

    #[test]
    fn aggregate_replaces_projection() {
        let op = ReadOperation::new()
            .with_fields(["x"])
            .with_aggregate("COUNT(*)")
            .with_condition("age > 18");
        let query = select_statement("users", &op);
        assert_eq!(query.statement, "SELECT COUNT(*) FROM users WHERE age > 18");
    }

    #[test]
    fn condition_list_joined_with_and() {
        let op = ReadOperation::new().with_condition(["id = 1", "name = 'a'"]);
        let query = select_statement("users", &op);
        assert_eq!(
            query.statement,
            "SELECT * FROM users WHERE id = 1 AND name = 'a'"
        );
    }

    #[test]
    fn empty_condition_list_drops_where() {
        let op = ReadOperation::new().with_condition(Vec::<String>::new());
        assert_eq!(select_statement("t", &op).statement, "SELECT * FROM t");
    }

    #[test]
    fn insert_binds_values_in_order() {
        let op = CreateOperation::new(
            Params::new()
                .with_value("name", "ada")
                .with_value("age", 36)
                .with_value("name", "grace"),
        );
        let query = insert_statement("users", &op);
        assert_eq!(query.statement, "INSERT INTO users (name, age) VALUES (?, ?)");
        assert_eq!(query.params, vec![Value::from("grace"), Value::Integer(36)]);
    }

    #[test]
    fn params_collect_from_pairs() {
        let params: Params = [("name", "ada"), ("email", "ada@example.com")]
            .into_iter()
            .collect();
        assert_eq!(params.columns().collect::<Vec<_>>(), vec!["name", "email"]);
    }

    #[test]
    fn insert_without_values_uses_defaults() {
        let query = insert_statement("users", &CreateOperation::default());
        assert_eq!(query.statement, "INSERT INTO users DEFAULT VALUES");
        assert!(query.params.is_empty());
    }

    #[test]
    fn insert_appends_conflict_clause() {
        let op = CreateOperation::new(Params::new().with_value("email", "a@b.c"))
            .with_on_conflict("(email) DO NOTHING");
        let query = insert_statement("users", &op);
        assert_eq!(
            query.statement,
            "INSERT INTO users (email) VALUES (?) ON CONFLICT (email) DO NOTHING"
        );
    }

    #[test]
    fn update_without_condition_covers_table() {
        let op = UpdateOperation::new(Params::new().with_value("name", "b"));
        let query = update_statement("users", &op);
        assert_eq!(query.statement, "UPDATE users SET name = ?");
        assert_eq!(query.params, vec![Value::from("b")]);
    }

    #[test]
    fn update_with_empty_values_is_passed_through() {
        let op = UpdateOperation::new(Params::new()).with_condition("id = 1");
        let query = update_statement("users", &op);
        assert_eq!(query.statement, "UPDATE users SET  WHERE id = 1");
    }

    #[test]
    fn delete_statement_with_conditions() {
        let op = DeleteOperation::new(vec!["id = 1", "age IS NULL"]);
        let query = delete_statement("users", &op);
        assert_eq!(query.statement, "DELETE FROM users WHERE id = 1 AND age IS NULL");
    }

    #[test]
    fn update_appends_conflict_clause() {
        let op = UpdateOperation::new(Params::new().with_value("name", "b"))
            .with_condition("id = 1")
            .with_on_conflict("REPLACE");
        assert_eq!(
            update_statement("users", &op).statement,
            "UPDATE users SET name = ? WHERE id = 1 ON CONFLICT REPLACE"
        );
    }

    #[test]
    fn delete_appends_conflict_clause() {
        let op = DeleteOperation::new("id = 1").with_on_conflict(String::from("REPLACE"));
        assert_eq!(
            delete_statement("users", &op).statement,
            "DELETE FROM users WHERE id = 1 ON CONFLICT REPLACE"
        );
    }

    #[test]
    fn aggregate_accepts_owned_text() {
        let column = "age";
        let op = ReadOperation::new().with_aggregate(format!("MAX({})", column));
        assert_eq!(select_statement("users", &op).statement, "SELECT MAX(age) FROM users");
    }

    #[test]
    fn delete_with_empty_condition_covers_table() {
        let op = DeleteOperation::new(Vec::<String>::new());
        assert_eq!(delete_statement("users", &op).statement, "DELETE FROM users");
    }
}
