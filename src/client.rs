use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::dsn::{build_connection_descriptor, ConnectionParameters, DriverKind};
use crate::error::Result;
use crate::provider::ReusingSessionProvider;
use crate::querier::Querier;
use crate::traits::{Connector, SessionProvider};

/// Main entry point for pdors.
/// Holds a session provider and provides statement building and execution.
pub struct PdoRsClient {
    provider: Arc<dyn SessionProvider>,
}

impl PdoRsClient {
    /// Builds the descriptor for `driver` and opens a session lazily, on the
    /// first statement.
    ///
    /// # Example
    /// ```ignore
    /// let params = ConnectionParameters::new()
    ///     .server("localhost")
    ///     .port(5432)
    ///     .database("test")
    ///     .username("app")
    ///     .password("secret");
    /// let client = PdoRsClient::new(DriverKind::Pgsql, &params, Arc::new(TokioPostgresConnector))?;
    /// ```
    pub fn new(
        driver: DriverKind,
        params: &ConnectionParameters,
        connector: Arc<dyn Connector>,
    ) -> Result<Self> {
        let descriptor = build_connection_descriptor(driver, params)?;
        Ok(Self {
            provider: Arc::new(ReusingSessionProvider::new(connector, descriptor)),
        })
    }

    /// Like [`PdoRsClient::new`], but opens the session immediately so
    /// connection errors surface here.
    pub async fn connect(
        driver: DriverKind,
        params: &ConnectionParameters,
        connector: Arc<dyn Connector>,
    ) -> Result<Self> {
        let client = Self::new(driver, params, connector)?;
        client.provider.session().await?;
        Ok(client)
    }

    pub fn from_config(config: &DatabaseConfig, connector: Arc<dyn Connector>) -> Result<Self> {
        Self::new(config.driver, &config.params, connector)
    }

    /// Create a new client with a custom session provider.
    pub fn with_provider(provider: Arc<dyn SessionProvider>) -> Self {
        Self { provider }
    }

    /// Create a Querier for building and executing statements.
    pub fn querier(&self) -> Querier {
        Querier::new(Arc::clone(&self.provider))
    }

    pub async fn is_connected(&self) -> bool {
        self.provider.is_open().await
    }

    pub async fn close(&self) -> Result<()> {
        self.provider.close().await
    }
}
