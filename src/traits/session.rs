use std::sync::Arc;

use async_trait::async_trait;

use crate::dsn::{ConnectionDescriptor, Credentials};
use crate::error::Result;
use crate::types::{RawQueryResult, RenderedStatement};

/// An open client session.
/// Implementations are responsible for:
/// - Preparing the statement text and binding its named values
/// - Converting bound `SqlValue`s to native types
/// - Reporting failures as `PdoRsError::QueryFailed` with the raw driver message
#[async_trait]
pub trait Session: Send + Sync {
    /// Execute one rendered statement.
    async fn execute(&self, statement: &RenderedStatement) -> Result<RawQueryResult>;

    /// Release the session. Further use is undefined.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Opens client sessions from a connection descriptor.
#[async_trait]
pub trait Connector: Send + Sync {
    /// `credentials` is `None` when they are embedded in the descriptor or
    /// the driver takes none.
    async fn open(
        &self,
        descriptor: &ConnectionDescriptor,
        credentials: Option<&Credentials>,
    ) -> Result<Arc<dyn Session>>;
}
