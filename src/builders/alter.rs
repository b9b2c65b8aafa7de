use super::required;
use crate::clauses::non_blank;
use crate::error::Result;
use crate::types::{RenderedStatement, StatementKind};

/// `ALTER TABLE <table> <clause>`, clause verbatim (e.g. `ADD COLUMN x VARCHAR(30)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterTable {
    table: String,
    clause: String,
}

impl AlterTable {
    pub fn new(table: impl Into<String>, clause: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            clause: clause.into(),
        }
    }

    pub fn build(&self) -> Result<RenderedStatement> {
        let table = required(&self.table, "table name")?;
        let clause = required(&self.clause, "alter clause")?;
        Ok(RenderedStatement::new(
            StatementKind::AlterTable,
            format!("ALTER TABLE {} {}", table, clause),
        ))
    }
}

/// `ALTER DATABASE [<name>] [CHARACTER SET <cs>] [COLLATE <collation>]`.
///
/// Without a name MySQL applies the change to the default database of the
/// session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlterDatabase {
    database: Option<String>,
    character_set: Option<String>,
    collate: Option<String>,
}

impl AlterDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn database(mut self, name: impl Into<String>) -> Self {
        self.database = non_blank(name);
        self
    }

    pub fn character_set(mut self, character_set: impl Into<String>) -> Self {
        self.character_set = non_blank(character_set);
        self
    }

    pub fn collate(mut self, collate: impl Into<String>) -> Self {
        self.collate = non_blank(collate);
        self
    }

    pub fn build(&self) -> Result<RenderedStatement> {
        let mut sql = String::from("ALTER DATABASE");
        if let Some(database) = &self.database {
            sql.push(' ');
            sql.push_str(database);
        }
        if let Some(character_set) = &self.character_set {
            sql.push_str(" CHARACTER SET ");
            sql.push_str(character_set);
        }
        if let Some(collate) = &self.collate {
            sql.push_str(" COLLATE ");
            sql.push_str(collate);
        }
        Ok(RenderedStatement::new(StatementKind::AlterDatabase, sql))
    }
}
