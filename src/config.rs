use std::env;

use serde::Deserialize;

use crate::dsn::{build_connection_descriptor, ConnectionDescriptor, ConnectionParameters, DriverKind};
use crate::error::{PdoRsError, Result};

/// Driver plus connection parameters, loadable from TOML or the environment.
///
/// ```toml
/// driver = "PDO_MYSQL"
/// server = "localhost"
/// database = "test"
/// username = "root"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    pub driver: DriverKind,
    #[serde(flatten)]
    pub params: ConnectionParameters,
}

impl DatabaseConfig {
    pub fn new(driver: DriverKind, params: ConnectionParameters) -> Self {
        Self { driver, params }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PdoRsError::Config(e.to_string()))
    }

    /// Reads `<PREFIX>_DRIVER`, `<PREFIX>_SERVER`, `<PREFIX>_DATABASE`,
    /// `<PREFIX>_USERNAME`, `<PREFIX>_PASSWORD`, `<PREFIX>_PORT`,
    /// `<PREFIX>_PROTOCOL`, `<PREFIX>_HOST`, `<PREFIX>_SCROLLABLE_CURSOR`,
    /// `<PREFIX>_SQLITE_SUFFIX` and `<PREFIX>_IN_MEMORY`.
    pub fn from_env(prefix: &str) -> Result<Self> {
        Self::from_lookup(prefix, |key| env::var(key).ok())
    }

    fn from_lookup(prefix: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let prefix = prefix.trim_end_matches('_').to_ascii_uppercase();
        let var = |name: &str| lookup(&format!("{}_{}", prefix, name)).filter(|v| !v.is_empty());

        let driver_var = format!("{}_DRIVER", prefix);
        let driver: DriverKind = var("DRIVER")
            .ok_or_else(|| PdoRsError::Config(format!("{} is not set", driver_var)))?
            .parse()?;

        let port = var("PORT")
            .map(|p| {
                p.parse::<u16>()
                    .map_err(|_| PdoRsError::Config(format!("{}_PORT is not a port: {}", prefix, p)))
            })
            .transpose()?;

        let params = ConnectionParameters {
            server: var("SERVER"),
            database: var("DATABASE"),
            username: var("USERNAME"),
            password: var("PASSWORD"),
            port,
            protocol: var("PROTOCOL"),
            host: var("HOST"),
            enable_scrollable_cursor: var("SCROLLABLE_CURSOR").map(|v| parse_flag(&v)),
            sqlite_suffix: var("SQLITE_SUFFIX"),
            create_in_memory: var("IN_MEMORY").is_some_and(|v| parse_flag(&v)),
        };

        Ok(Self { driver, params })
    }

    pub fn descriptor(&self) -> Result<ConnectionDescriptor> {
        build_connection_descriptor(self.driver, &self.params)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_from_toml() {
        let config = DatabaseConfig::from_toml_str(
            r#"
            driver = "PDO_SQLSRV"
            server = "12345abcde.database.windows.net"
            database = "test"
            port = 1433
            "#,
        )
        .unwrap();

        assert_eq!(config.driver, DriverKind::SqlSrv);
        assert_eq!(config.params.port, Some(1433));
        assert_eq!(
            config.descriptor().unwrap().dsn,
            "sqlsrv:Server=12345abcde.database.windows.net,1433;DATABASE=test"
        );
    }

    #[test]
    fn test_from_toml_unknown_driver() {
        let err = DatabaseConfig::from_toml_str("driver = \"PDO_NOPE\"").unwrap_err();
        match err {
            PdoRsError::Config(message) => assert!(message.contains("PDO_NOPE")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("APP_DB_DRIVER", "informix"),
            ("APP_DB_HOST", "ifx"),
            ("APP_DB_PORT", "9088"),
            ("APP_DB_DATABASE", "stores"),
            ("APP_DB_SERVER", "ids"),
            ("APP_DB_PROTOCOL", "onsoctcp"),
            ("APP_DB_SCROLLABLE_CURSOR", "true"),
            ("APP_DB_USERNAME", ""),
        ]
        .into_iter()
        .collect();

        let config =
            DatabaseConfig::from_lookup("app_db_", |k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.driver, DriverKind::Informix);
        assert_eq!(config.params.username, None);
        assert_eq!(config.params.enable_scrollable_cursor, Some(true));
        assert_eq!(
            config.descriptor().unwrap().dsn,
            "informix:host=ifx; service=9088; database=stores; server=ids; protocol=onsoctcp; EnableScrollableCursors=1"
        );
    }

    #[test]
    fn test_from_lookup_requires_driver() {
        let err = DatabaseConfig::from_lookup("DB", |_| None).unwrap_err();
        assert!(matches!(err, PdoRsError::Config(_)));
    }

    #[test]
    fn test_from_lookup_bad_port() {
        let err = DatabaseConfig::from_lookup("DB", |k| match k {
            "DB_DRIVER" => Some("mysql".to_string()),
            "DB_PORT" => Some("99999".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, PdoRsError::Config(_)));
    }
}
