//! Typed rows and values returned by database adapters.

use std::sync::Arc;

/// A single database value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            SqlValue::Real(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            SqlValue::Blob(b) => Some(b),
            _ => None,
        }
    }
}

impl From<&SqlValue> for serde_json::Value {
    fn from(value: &SqlValue) -> Self {
        match value {
            SqlValue::Null => serde_json::Value::Null,
            SqlValue::Integer(n) => (*n).into(),
            SqlValue::Real(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            SqlValue::Text(s) => serde_json::Value::String(s.clone()),
            SqlValue::Blob(b) => b.iter().copied().collect(),
        }
    }
}

/// One result row.
///
/// Column names are shared across all rows of a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<Vec<String>>,
    values: Vec<SqlValue>,
}

impl Row {
    pub fn new(columns: Arc<Vec<String>>, values: Vec<SqlValue>) -> Self {
        Self { columns, values }
    }

    /// Value of the named column, if present.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.values.get(index)
    }

    /// Value at the given position.
    pub fn get_index(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// This row as a JSON object keyed by column name.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .columns
            .iter()
            .zip(&self.values)
            .map(|(column, value)| (column.clone(), value.into()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

/// What an adapter returns for one executed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// Rows from a statement that produces a result set.
    Rows(Vec<Row>),
    /// Affected-row count from a write statement.
    Affected(u64),
}

impl QueryOutput {
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            QueryOutput::Rows(rows) => Some(rows),
            QueryOutput::Affected(_) => None,
        }
    }

    pub fn affected(&self) -> Option<u64> {
        match self {
            QueryOutput::Rows(_) => None,
            QueryOutput::Affected(count) => Some(*count),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_row() -> Row {
        let columns = Arc::new(vec!["id".to_string(), "name".to_string()]);
        Row::new(
            columns,
            vec![SqlValue::Integer(1), SqlValue::Text("alice".to_string())],
        )
    }

    #[test]
    fn test_get_by_name_and_index() {
        let row = sample_row();
        assert_eq!(row.get("id"), Some(&SqlValue::Integer(1)));
        assert_eq!(row.get("name"), Some(&SqlValue::Text("alice".to_string())));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.get_index(0), Some(&SqlValue::Integer(1)));
        assert_eq!(row.get_index(5), None);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_row_shape_accessors() {
        let row = sample_row();
        assert_eq!(row.columns(), ["id", "name"]);
        assert_eq!(
            row.values(),
            [SqlValue::Integer(1), SqlValue::Text("alice".to_string())]
        );
        assert!(!row.is_empty());

        let empty = Row::new(Arc::new(Vec::new()), Vec::new());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_value_accessors() {
        assert!(SqlValue::Null.is_null());
        assert_eq!(SqlValue::Integer(7).as_integer(), Some(7));
        assert_eq!(SqlValue::Real(1.5).as_real(), Some(1.5));
        assert_eq!(SqlValue::Text("x".to_string()).as_text(), Some("x"));
        assert_eq!(SqlValue::Blob(vec![1, 2]).as_blob(), Some(&[1u8, 2][..]));
        assert_eq!(SqlValue::Integer(7).as_text(), None);
    }

    #[test]
    fn test_row_to_json() {
        let row = sample_row();
        assert_eq!(row.to_json(), json!({ "id": 1, "name": "alice" }));
    }

    #[test]
    fn test_json_conversion_edge_values() {
        assert_eq!(serde_json::Value::from(&SqlValue::Null), json!(null));
        assert_eq!(
            serde_json::Value::from(&SqlValue::Blob(vec![1, 2, 3])),
            json!([1, 2, 3])
        );
        // NaN has no JSON representation
        assert_eq!(
            serde_json::Value::from(&SqlValue::Real(f64::NAN)),
            json!(null)
        );
    }

    #[test]
    fn test_query_output_accessors() {
        let rows = QueryOutput::Rows(vec![sample_row()]);
        assert_eq!(rows.rows().map(|r| r.len()), Some(1));
        assert_eq!(rows.affected(), None);

        let affected = QueryOutput::Affected(3);
        assert_eq!(affected.affected(), Some(3));
        assert!(affected.rows().is_none());
    }
}
