use super::required;
use crate::error::{PdoRsError, Result};
use crate::types::{RenderedStatement, StatementKind};

/// `DROP TABLE IF EXISTS <t1>[, <t2>, ...]`.
///
/// Missing tables are not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTable {
    tables: Vec<String>,
}

impl DropTable {
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            tables: vec![name.into()],
        }
    }

    pub fn tables<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tables: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn build(&self) -> Result<RenderedStatement> {
        if self.tables.is_empty() {
            return Err(PdoRsError::InvalidStatement(
                "DROP TABLE needs at least one table".to_string(),
            ));
        }
        let names = self
            .tables
            .iter()
            .map(|t| required(t, "table name"))
            .collect::<Result<Vec<_>>>()?;
        Ok(RenderedStatement::new(
            StatementKind::DropTable,
            format!("DROP TABLE IF EXISTS {}", names.join(", ")),
        ))
    }
}

impl From<&str> for DropTable {
    fn from(name: &str) -> Self {
        DropTable::table(name)
    }
}

impl From<String> for DropTable {
    fn from(name: String) -> Self {
        DropTable::table(name)
    }
}

impl From<Vec<String>> for DropTable {
    fn from(names: Vec<String>) -> Self {
        DropTable { tables: names }
    }
}

impl From<&[&str]> for DropTable {
    fn from(names: &[&str]) -> Self {
        DropTable::tables(names.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_single_table() {
        let stmt = DropTable::from("test").build().unwrap();
        assert_eq!(stmt.text, "DROP TABLE IF EXISTS test");
    }

    #[test]
    fn test_drop_many_tables() {
        let stmt = DropTable::tables(["a", "b", "c"]).build().unwrap();
        assert_eq!(stmt.text, "DROP TABLE IF EXISTS a, b, c");
    }

    #[test]
    fn test_drop_nothing_is_rejected() {
        let err = DropTable::tables(Vec::<String>::new()).build().unwrap_err();
        assert!(matches!(err, PdoRsError::InvalidStatement(_)));
    }
}
