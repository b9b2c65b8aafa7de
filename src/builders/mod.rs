//! Pure SQL builders. Each one renders MySQL-dialect text with `:name`
//! placeholders and the values bound to them; nothing here talks to a database.

mod alter;
mod create_table;
mod delete;
mod drop_table;
mod insert;
mod select;
mod update;

pub use alter::{AlterDatabase, AlterTable};
pub use create_table::CreateTable;
pub use delete::Delete;
pub use drop_table::DropTable;
pub use insert::Insert;
pub use select::Select;
pub use update::Update;

use crate::error::{PdoRsError, Result};
use crate::types::{RenderedStatement, StatementKind};

/// Probe used to check that a table exists: `SELECT 1 FROM <table> LIMIT 1`.
///
/// Any execution error is read as "does not exist", including errors that have
/// nothing to do with the table (bad credentials, lost connection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableExists {
    table: String,
}

impl TableExists {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    pub fn build(&self) -> Result<RenderedStatement> {
        let table = required(&self.table, "table name")?;
        Ok(RenderedStatement::new(
            StatementKind::TableExists,
            format!("SELECT 1 FROM {} LIMIT 1", table),
        ))
    }
}

/// Any statement the builders can render.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementRequest {
    CreateTable(CreateTable),
    AlterTable(AlterTable),
    AlterDatabase(AlterDatabase),
    DropTable(DropTable),
    Insert(Insert),
    Delete(Delete),
    Select(Select),
    Update(Update),
    TableExists(TableExists),
}

impl StatementRequest {
    pub fn kind(&self) -> StatementKind {
        match self {
            StatementRequest::CreateTable(_) => StatementKind::CreateTable,
            StatementRequest::AlterTable(_) => StatementKind::AlterTable,
            StatementRequest::AlterDatabase(_) => StatementKind::AlterDatabase,
            StatementRequest::DropTable(_) => StatementKind::DropTable,
            StatementRequest::Insert(_) => StatementKind::Insert,
            StatementRequest::Delete(_) => StatementKind::Delete,
            StatementRequest::Select(_) => StatementKind::Select,
            StatementRequest::Update(_) => StatementKind::Update,
            StatementRequest::TableExists(_) => StatementKind::TableExists,
        }
    }

    /// Renders the request. Only inserts can yield more (or fewer) than one
    /// statement.
    pub fn build(&self) -> Result<Vec<RenderedStatement>> {
        match self {
            StatementRequest::CreateTable(b) => b.build().map(|s| vec![s]),
            StatementRequest::AlterTable(b) => b.build().map(|s| vec![s]),
            StatementRequest::AlterDatabase(b) => b.build().map(|s| vec![s]),
            StatementRequest::DropTable(b) => b.build().map(|s| vec![s]),
            StatementRequest::Insert(b) => b.build(),
            StatementRequest::Delete(b) => b.build().map(|s| vec![s]),
            StatementRequest::Select(b) => b.build().map(|s| vec![s]),
            StatementRequest::Update(b) => b.build().map(|s| vec![s]),
            StatementRequest::TableExists(b) => b.build().map(|s| vec![s]),
        }
    }
}

macro_rules! impl_from_builder {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for StatementRequest {
                fn from(builder: $variant) -> Self {
                    StatementRequest::$variant(builder)
                }
            }
        )*
    };
}

impl_from_builder!(
    CreateTable,
    AlterTable,
    AlterDatabase,
    DropTable,
    Insert,
    Delete,
    Select,
    Update,
    TableExists,
);

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn required<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PdoRsError::InvalidStatement(format!("{} is empty", what)));
    }
    Ok(trimmed)
}
