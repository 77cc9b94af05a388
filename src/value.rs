//! Value and row types exchanged with the engine

use std::sync::Arc;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// Core value types for SQLite operations
///
/// `Boolean` is stored as integer 0/1 and reads back as `Integer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Boolean(b) => Some(*b as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(b) => Some(b),
            _ => None,
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            Value::Null => ValueRef::Null,
            // SQLite has no boolean storage class
            Value::Boolean(b) => ValueRef::Integer(*b as i64),
            Value::Integer(i) => ValueRef::Integer(*i),
            Value::Real(f) => ValueRef::Real(*f),
            Value::Text(s) => ValueRef::Text(s.as_bytes()),
            Value::Blob(b) => ValueRef::Blob(b),
        };
        Ok(ToSqlOutput::Borrowed(value))
    }
}

impl FromSql for Value {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(f) => Value::Real(f),
            ValueRef::Text(t) => {
                let text = std::str::from_utf8(t).map_err(|e| FromSqlError::Other(Box::new(e)))?;
                Value::Text(text.to_string())
            }
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        })
    }
}

impl From<rusqlite::types::Value> for Value {
    fn from(value: rusqlite::types::Value) -> Self {
        match value {
            rusqlite::types::Value::Null => Value::Null,
            rusqlite::types::Value::Integer(i) => Value::Integer(i),
            rusqlite::types::Value::Real(f) => Value::Real(f),
            rusqlite::types::Value::Text(s) => Value::Text(s),
            rusqlite::types::Value::Blob(b) => Value::Blob(b),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Blob(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// A single result row.
///
/// Values are positional, in projection order. Column names are shared by
/// every row of the same result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Look a value up by its result column name (case-sensitive).
    pub fn get_by_name(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.values.get(idx))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_binds_as_integer() {
        let out = Value::Boolean(true).to_sql().unwrap();
        assert!(matches!(out, ToSqlOutput::Borrowed(ValueRef::Integer(1))));
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }

    #[test]
    fn text_column_rejects_invalid_utf8() {
        let result = Value::column_result(ValueRef::Text(&[0xff, 0xfe]));
        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_plain_json() {
        assert_eq!(serde_json::to_value(Value::Integer(3)).unwrap(), serde_json::json!(3));
        assert_eq!(serde_json::to_value(Value::Null).unwrap(), serde_json::Value::Null);
        let text: Value = serde_json::from_str("\"ada\"").unwrap();
        assert_eq!(text, Value::from("ada"));
        let flag: Value = serde_json::from_str("true").unwrap();
        assert_eq!(flag, Value::Boolean(true));
    }

    #[test]
    fn accessors_match_variant() {
        assert!(Value::Null.is_null());
        assert!(!Value::Integer(0).is_null());
        assert_eq!(Value::Real(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::Integer(2).as_f64(), Some(2.0));
        assert_eq!(Value::from("x").as_f64(), None);
        assert_eq!(Value::from(vec![1u8, 2]).as_blob(), Some(&[1u8, 2][..]));
        assert_eq!(Value::Integer(1).as_blob(), None);
        assert_eq!(Value::from(7u32), Value::Integer(7));
    }

    #[test]
    fn converts_from_rusqlite_values() {
        use rusqlite::types::Value as Raw;

        assert_eq!(Value::from(Raw::Null), Value::Null);
        assert_eq!(Value::from(Raw::Integer(4)), Value::Integer(4));
        assert_eq!(Value::from(Raw::Real(0.5)), Value::Real(0.5));
        assert_eq!(Value::from(Raw::Text("t".into())), Value::from("t"));
        assert_eq!(Value::from(Raw::Blob(vec![9])), Value::Blob(vec![9]));
    }

    #[test]
    fn row_lookup_by_name() {
        let row = Row::new(
            Arc::from(vec!["id".to_string(), "name".to_string()]),
            vec![Value::Integer(7), Value::from("ada")],
        );
        assert_eq!(row.get_by_name("name"), Some(&Value::from("ada")));
        assert_eq!(row.get_by_name("missing"), None);
        assert_eq!(row.get(0).and_then(Value::as_i64), Some(7));
    }
}
