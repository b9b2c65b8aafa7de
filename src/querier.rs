use std::sync::Arc;

use crate::builders::{
    AlterDatabase, AlterTable, CreateTable, Delete, DropTable, Insert, Select, StatementRequest,
    TableExists, Update,
};
use crate::classify::ErrorRecord;
use crate::error::{PdoRsError, Result};
use crate::traits::SessionProvider;
use crate::types::{QueryResult, RenderedStatement};

/// Outcome of [`Querier::does_table_exist`].
///
/// `exists` is false after any failure, not only a missing table; `error`
/// holds the classified failure so callers can tell the cases apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableExistence {
    pub exists: bool,
    pub error: Option<ErrorRecord>,
}

/// Statement executor.
/// Created from a PdoRsClient; renders each request and runs it on the
/// provider's session.
pub struct Querier {
    provider: Arc<dyn SessionProvider>,
}

impl Querier {
    pub(crate) fn new(provider: Arc<dyn SessionProvider>) -> Self {
        Self { provider }
    }

    /// Renders and executes any request, one result per rendered statement.
    /// Stops at the first failing statement.
    pub async fn execute(&self, request: impl Into<StatementRequest>) -> Result<Vec<QueryResult>> {
        let statements = request.into().build()?;
        let mut results = Vec::with_capacity(statements.len());
        for statement in &statements {
            results.push(self.run(statement).await?);
        }
        Ok(results)
    }

    /// Creates a table, then confirms it with the existence probe.
    pub async fn create_table(&self, table: &str, column_defs: &str) -> Result<()> {
        let builder = CreateTable::new(table, column_defs);
        self.run(&builder.build()?).await?;

        let existence = self.does_table_exist(builder.table()).await;
        if !existence.exists {
            return Err(PdoRsError::TableNotCreated {
                table: builder.table().trim().to_string(),
                cause: existence.error,
            });
        }
        Ok(())
    }

    pub async fn alter_table(&self, table: &str, clause: &str) -> Result<()> {
        self.run(&AlterTable::new(table, clause).build()?).await?;
        Ok(())
    }

    pub async fn alter_database(&self, request: AlterDatabase) -> Result<()> {
        self.run(&request.build()?).await?;
        Ok(())
    }

    /// Drops one or more tables. Tables that do not exist are skipped.
    pub async fn drop_table(&self, tables: impl Into<DropTable>) -> Result<()> {
        self.run(&tables.into().build()?).await?;
        Ok(())
    }

    /// Inserts each row with its own statement and returns rows affected per
    /// row. Rows before a failing one stay inserted.
    pub async fn insert(&self, request: Insert) -> Result<Vec<u64>> {
        let mut affected = Vec::with_capacity(request.rows());
        for statement in request.build()? {
            affected.push(self.run(&statement).await?.rows_affected());
        }
        Ok(affected)
    }

    pub async fn delete(&self, request: Delete) -> Result<u64> {
        Ok(self.run(&request.build()?).await?.rows_affected())
    }

    pub async fn select(&self, request: Select) -> Result<QueryResult> {
        self.run(&request.build()?).await
    }

    pub async fn update(&self, request: Update) -> Result<u64> {
        Ok(self.run(&request.build()?).await?.rows_affected())
    }

    /// Probes `table` with `SELECT 1 FROM <table> LIMIT 1`.
    ///
    /// Any failure, including one to open a session, reports the table as
    /// missing.
    pub async fn does_table_exist(&self, table: &str) -> TableExistence {
        let outcome = match TableExists::new(table).build() {
            Ok(statement) => self.run(&statement).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(_) => TableExistence {
                exists: true,
                error: None,
            },
            Err(e) => {
                tracing::warn!(table, error = %e, "table existence probe failed");
                TableExistence {
                    exists: false,
                    error: e.error_record().cloned(),
                }
            }
        }
    }

    async fn run(&self, statement: &RenderedStatement) -> Result<QueryResult> {
        tracing::debug!(
            kind = %statement.kind,
            bindings = statement.bindings.len(),
            "executing statement"
        );
        let session = self.provider.session().await?;
        let raw = session.execute(statement).await?;
        Ok(QueryResult::from_raw(raw))
    }
}
