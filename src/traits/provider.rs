use std::sync::Arc;

use async_trait::async_trait;

use super::Session;
use crate::error::Result;

/// Hands out a session to run statements on, opening one if needed.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns the open session, opening a new one when none is open.
    async fn session(&self) -> Result<Arc<dyn Session>>;

    async fn is_open(&self) -> bool;

    /// Closes the current session, if any. The next `session()` reopens.
    async fn close(&self) -> Result<()>;
}
