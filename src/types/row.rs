use crate::error::{PdoRsError, Result};
use crate::types::SqlValue;

/// Driver-agnostic raw result of executing a statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQueryResult {
    /// Column names in order
    pub columns: Vec<String>,
    /// Rows, where each row holds values in column order
    pub rows: Vec<Vec<SqlValue>>,
    /// Rows changed by a write statement
    pub rows_affected: u64,
}

impl RawQueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self {
            columns,
            rows,
            rows_affected: 0,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Result of a write that touched `rows_affected` rows.
    pub fn affected(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            ..Self::default()
        }
    }
}

/// A single result row: field -> value pairs in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    fields: Vec<(String, SqlValue)>,
}

impl Row {
    pub(crate) fn new(columns: &[String], values: Vec<SqlValue>) -> Self {
        let fields = columns.iter().cloned().zip(values).collect();
        Self { fields }
    }

    /// Gets a value by column name.
    pub fn get(&self, column: &str) -> Result<&SqlValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
            .ok_or_else(|| PdoRsError::ColumnNotFound(column.to_string()))
    }

    /// Gets a text value by column name. Non-text values are not converted.
    pub fn get_str(&self, column: &str) -> Result<Option<&str>> {
        self.get(column).map(SqlValue::as_str)
    }

    /// Column names in order.
    pub fn columns(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Field -> value pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if this row has no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Result of a query execution, containing zero or more rows.
#[derive(Debug)]
pub struct QueryResult {
    columns: Vec<String>,
    rows: Vec<Row>,
    rows_affected: u64,
}

impl QueryResult {
    /// Creates a QueryResult from a RawQueryResult.
    pub fn from_raw(raw: RawQueryResult) -> Self {
        let rows = raw
            .rows
            .into_iter()
            .map(|values| Row::new(&raw.columns, values))
            .collect();
        Self {
            columns: raw.columns,
            rows,
            rows_affected: raw.rows_affected,
        }
    }

    /// Extracts a single row from the result.
    /// Returns an error if the result contains zero or more than one row.
    pub fn single_row(self) -> Result<Row> {
        let actual = self.rows.len();
        let mut rows = self.rows.into_iter();
        match (rows.next(), rows.next()) {
            (Some(row), None) => Ok(row),
            _ => Err(PdoRsError::UnexpectedRowCount {
                expected: 1,
                actual,
            }),
        }
    }

    /// Returns all rows from the result.
    pub fn rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn rows_ref(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows_affected(&self) -> u64 {
        self.rows_affected
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> SqlValue {
        SqlValue::Text(s.to_string())
    }

    #[test]
    fn test_row_get() {
        let columns = vec!["id".to_string(), "name".to_string()];
        let row = Row::new(&columns, vec![SqlValue::Int32(1), text("John")]);

        assert_eq!(row.get("id").unwrap(), &SqlValue::Int32(1));
        assert_eq!(row.get_str("name").unwrap(), Some("John"));
        assert!(row.get("missing").is_err());
    }

    #[test]
    fn test_row_keeps_column_order() {
        let columns = vec!["z".to_string(), "a".to_string(), "m".to_string()];
        let row = Row::new(&columns, vec![text("1"), text("2"), text("3")]);
        assert_eq!(row.columns(), ["z", "a", "m"]);
    }

    #[test]
    fn test_query_result_single_row() {
        let raw = RawQueryResult::new(vec!["id".to_string()], vec![vec![text("1")]]);
        let row = QueryResult::from_raw(raw).single_row().unwrap();
        assert_eq!(row.get_str("id").unwrap(), Some("1"));
    }

    #[test]
    fn test_query_result_single_row_error_on_empty() {
        let raw = RawQueryResult::new(vec!["id".to_string()], vec![]);
        let err = QueryResult::from_raw(raw).single_row().unwrap_err();
        match err {
            PdoRsError::UnexpectedRowCount { expected, actual } => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 0);
            }
            _ => panic!("Expected UnexpectedRowCount error"),
        }
    }

    #[test]
    fn test_query_result_single_row_error_on_multiple() {
        let raw = RawQueryResult::new(
            vec!["id".to_string()],
            vec![vec![text("1")], vec![text("2")]],
        );
        let err = QueryResult::from_raw(raw).single_row().unwrap_err();
        match err {
            PdoRsError::UnexpectedRowCount { expected, actual } => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 2);
            }
            _ => panic!("Expected UnexpectedRowCount error"),
        }
    }

    #[test]
    fn test_affected_rows_carry_over() {
        let result = QueryResult::from_raw(RawQueryResult::affected(3));
        assert_eq!(result.rows_affected(), 3);
        assert!(result.is_empty());
    }
}
