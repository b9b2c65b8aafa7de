use super::required;
use crate::error::Result;
use crate::types::{RenderedStatement, StatementKind};

/// `CREATE TABLE <table> (<column definitions>)`.
///
/// The definitions are passed through verbatim, e.g. `firstName VARCHAR(30)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTable {
    table: String,
    column_defs: String,
}

impl CreateTable {
    pub fn new(table: impl Into<String>, column_defs: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column_defs: column_defs.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn build(&self) -> Result<RenderedStatement> {
        let table = required(&self.table, "table name")?;
        let defs = required(&self.column_defs, "column definitions")?;
        Ok(RenderedStatement::new(
            StatementKind::CreateTable,
            format!("CREATE TABLE {} ({})", table, defs),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdoRsError;

    #[test]
    fn test_build_create_table() {
        let stmt = CreateTable::new("test", "firstName VARCHAR(30)").build().unwrap();
        assert_eq!(stmt.text, "CREATE TABLE test (firstName VARCHAR(30))");
        assert_eq!(stmt.kind, StatementKind::CreateTable);
        assert!(stmt.bindings.is_empty());
    }

    #[test]
    fn test_empty_table_name_is_rejected() {
        let err = CreateTable::new(" ", "id INT").build().unwrap_err();
        assert!(matches!(err, PdoRsError::InvalidStatement(_)));
    }
}
