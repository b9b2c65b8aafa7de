use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::dsn::ConnectionDescriptor;
use crate::error::Result;
use crate::traits::{Connector, Session, SessionProvider};

/// Opens a session on first use and reuses it until closed.
pub struct ReusingSessionProvider {
    connector: Arc<dyn Connector>,
    descriptor: ConnectionDescriptor,
    current: Mutex<Option<Arc<dyn Session>>>,
}

impl ReusingSessionProvider {
    pub fn new(connector: Arc<dyn Connector>, descriptor: ConnectionDescriptor) -> Self {
        Self {
            connector,
            descriptor,
            current: Mutex::new(None),
        }
    }

    pub fn descriptor(&self) -> &ConnectionDescriptor {
        &self.descriptor
    }
}

#[async_trait]
impl SessionProvider for ReusingSessionProvider {
    async fn session(&self) -> Result<Arc<dyn Session>> {
        let mut current = self.current.lock().await;
        if let Some(session) = current.as_ref() {
            return Ok(Arc::clone(session));
        }

        let session = self
            .connector
            .open(&self.descriptor, self.descriptor.credentials.as_ref())
            .await?;
        tracing::info!(driver = %self.descriptor.driver, "opened database session");

        *current = Some(Arc::clone(&session));
        Ok(session)
    }

    async fn is_open(&self) -> bool {
        self.current.lock().await.is_some()
    }

    async fn close(&self) -> Result<()> {
        let session = self.current.lock().await.take();
        if let Some(session) = session {
            session.close().await?;
            tracing::info!(driver = %self.descriptor.driver, "closed database session");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::{InMemoryTestConnector, InMemoryTestDriver};
    use crate::dsn::{build_connection_descriptor, ConnectionParameters, DriverKind};

    fn descriptor() -> ConnectionDescriptor {
        let params = ConnectionParameters::new()
            .server("localhost")
            .database("test")
            .username("root")
            .password("secret");
        build_connection_descriptor(DriverKind::MySql, &params).unwrap()
    }

    #[tokio::test]
    async fn test_opens_once_and_reuses() {
        let connector = Arc::new(InMemoryTestConnector::new(Arc::new(InMemoryTestDriver::new())));
        let provider = ReusingSessionProvider::new(connector.clone(), descriptor());

        assert!(!provider.is_open().await);
        provider.session().await.unwrap();
        provider.session().await.unwrap();
        assert!(provider.is_open().await);
        assert_eq!(connector.open_count(), 1);

        let opened = connector.last_open().unwrap();
        assert_eq!(opened.dsn, "mysql:host=localhost;dbname=test");
        assert_eq!(
            opened.credentials.unwrap().password.as_deref(),
            Some("secret")
        );
    }

    #[tokio::test]
    async fn test_reopens_after_close() {
        let driver = Arc::new(InMemoryTestDriver::new());
        let connector = Arc::new(InMemoryTestConnector::new(driver.clone()));
        let provider = ReusingSessionProvider::new(connector.clone(), descriptor());

        provider.session().await.unwrap();
        provider.close().await.unwrap();
        assert!(!provider.is_open().await);
        assert_eq!(driver.close_count(), 1);

        provider.session().await.unwrap();
        assert_eq!(connector.open_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_open_is_not_cached() {
        let connector = Arc::new(
            InMemoryTestConnector::new(Arc::new(InMemoryTestDriver::new()))
                .failing_with("SQLSTATE[28000] [1045] Access denied for user 'root'"),
        );
        let provider = ReusingSessionProvider::new(connector.clone(), descriptor());

        let err = provider.session().await.err().unwrap();
        assert!(err.error_record().unwrap().is_authentication_failure());
        assert!(!provider.is_open().await);
    }
}
