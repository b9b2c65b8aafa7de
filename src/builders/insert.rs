use super::required;
use crate::error::{PdoRsError, Result};
use crate::types::{placeholder_name, BindMap, RenderedStatement, SqlValue, StatementKind};

/// `INSERT INTO <table> (<fields>) VALUES (<placeholders>)`, one statement per row.
///
/// Rows may have different fields; each statement uses its own row's fields
/// in the order given. Rows are not batched into a multi-row VALUES list and
/// are not wrapped in a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    table: String,
    rows: Vec<Vec<(String, SqlValue)>>,
}

impl Insert {
    pub fn into(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            rows: Vec::new(),
        }
    }

    /// Adds a row of field -> value pairs.
    pub fn row<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        self.rows.push(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Builds one statement per row. No rows gives no statements.
    pub fn build(&self) -> Result<Vec<RenderedStatement>> {
        let table = required(&self.table, "table name")?;
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| build_row(table, index, row))
            .collect()
    }
}

fn build_row(table: &str, index: usize, row: &[(String, SqlValue)]) -> Result<RenderedStatement> {
    if row.is_empty() {
        return Err(PdoRsError::InvalidStatement(format!(
            "insert row {} has no fields",
            index
        )));
    }

    let mut bindings = BindMap::new();
    let mut fields = Vec::with_capacity(row.len());
    let mut placeholders = Vec::with_capacity(row.len());

    for (field, value) in row {
        let field = required(field, "field name")?;
        let name = placeholder_name(field, |n| bindings.contains(n));
        fields.push(field);
        placeholders.push(format!(":{}", name));
        bindings.bind(name, value.clone());
    }

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        fields.join(", "),
        placeholders.join(", ")
    );
    Ok(RenderedStatement::new(StatementKind::Insert, sql).with_bindings(bindings))
}
