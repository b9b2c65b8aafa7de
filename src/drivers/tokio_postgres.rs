use std::sync::Arc;

use async_trait::async_trait;
use tokio_postgres::types::{ToSql, Type};
use tokio_postgres::{Client, Config, NoTls};

use crate::dsn::{ConnectionDescriptor, Credentials, DriverKind};
use crate::error::{PdoRsError, Result};
use crate::traits::{Connector, Session};
use crate::types::{PlaceholderStyle, RawQueryResult, RenderedStatement, SqlValue};

/// Opens PostgreSQL sessions from `pgsql:` descriptors using tokio-postgres.
///
/// Host, port, database and user are split on `;`, so they must not contain
/// one. The password may.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPostgresConnector;

impl TokioPostgresConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for TokioPostgresConnector {
    async fn open(
        &self,
        descriptor: &ConnectionDescriptor,
        credentials: Option<&Credentials>,
    ) -> Result<Arc<dyn Session>> {
        if descriptor.driver != DriverKind::Pgsql {
            return Err(PdoRsError::UnsupportedDriver(format!(
                "{} (tokio-postgres only serves {})",
                descriptor.driver,
                DriverKind::Pgsql
            )));
        }

        let config = pg_config(&descriptor.dsn, credentials)?;
        let (client, connection) = config
            .connect(NoTls)
            .await
            .map_err(|e| PdoRsError::connection(driver_message(&e)))?;

        // Spawn the connection handler
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "PostgreSQL connection error");
            }
        });

        Ok(Arc::new(TokioPostgresSession { client }))
    }
}

/// Translates `pgsql:host=..;port=..;dbname=..;user=..;password=..` into a
/// tokio-postgres config. Empty values are skipped. Everything after
/// `password=` is taken verbatim; the other values cannot contain `;`.
fn pg_config(dsn: &str, credentials: Option<&Credentials>) -> Result<Config> {
    let body = dsn
        .strip_prefix("pgsql:")
        .ok_or_else(|| PdoRsError::connection(format!("not a pgsql descriptor: {}", dsn)))?;

    // The password is rendered last and may itself contain `;`.
    let (body, password) = match body.find(";password=") {
        Some(at) => (&body[..at], Some(&body[at + ";password=".len()..])),
        None => match body.strip_prefix("password=") {
            Some(password) => ("", Some(password)),
            None => (body, None),
        },
    };

    let mut config = Config::new();
    if let Some(password) = password.filter(|p| !p.is_empty()) {
        config.password(password);
    }
    for pair in body.split(';') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if value.is_empty() {
            continue;
        }
        match key {
            "host" => {
                config.host(value);
            }
            "port" => {
                let port = value
                    .parse::<u16>()
                    .map_err(|_| PdoRsError::connection(format!("invalid port: {}", value)))?;
                config.port(port);
            }
            "dbname" => {
                config.dbname(value);
            }
            "user" => {
                config.user(value);
            }
            other => {
                tracing::debug!(key = other, "ignoring unknown pgsql descriptor key");
            }
        }
    }

    if let Some(credentials) = credentials {
        if let Some(user) = &credentials.username {
            config.user(user);
        }
        if let Some(password) = &credentials.password {
            config.password(password);
        }
    }

    Ok(config)
}

/// Formats database errors PDO-style so the classifier can read the SQLSTATE.
fn driver_message(error: &tokio_postgres::Error) -> String {
    match error.as_db_error() {
        Some(db) => format!("SQLSTATE[{}]: {}", db.code().code(), db.message()),
        None => error.to_string(),
    }
}

/// A PostgreSQL session backed by a tokio-postgres client.
pub struct TokioPostgresSession {
    client: Client,
}

#[async_trait]
impl Session for TokioPostgresSession {
    async fn execute(&self, statement: &RenderedStatement) -> Result<RawQueryResult> {
        let (sql, params) = statement.to_positional(PlaceholderStyle::Dollar)?;

        // Convert SqlValue params to tokio-postgres compatible types
        let converted_params: Vec<Box<dyn ToSql + Sync + Send>> =
            params.iter().map(sql_value_to_tosql).collect();

        let param_refs: Vec<&(dyn ToSql + Sync)> = converted_params
            .iter()
            .map(|b| b.as_ref() as &(dyn ToSql + Sync))
            .collect();

        if !statement.kind.returns_rows() {
            let affected = self
                .client
                .execute(sql.as_str(), &param_refs)
                .await
                .map_err(|e| PdoRsError::query(driver_message(&e)))?;
            return Ok(RawQueryResult::affected(affected));
        }

        let rows = self
            .client
            .query(sql.as_str(), &param_refs)
            .await
            .map_err(|e| PdoRsError::query(driver_message(&e)))?;

        // Extract column names
        let columns: Vec<String> = match rows.first() {
            Some(row) => row.columns().iter().map(|c| c.name().to_string()).collect(),
            None => Vec::new(),
        };

        let result_rows = rows
            .iter()
            .map(|row| {
                row.columns()
                    .iter()
                    .enumerate()
                    .map(|(i, col)| row_value(row, i, col.name(), col.type_()))
                    .collect::<Result<Vec<SqlValue>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RawQueryResult::new(columns, result_rows))
    }
}

/// Convert a SqlValue to a boxed ToSql trait object.
fn sql_value_to_tosql(value: &SqlValue) -> Box<dyn ToSql + Sync + Send> {
    match value {
        SqlValue::Null => Box::new(None::<String>),
        SqlValue::Text(s) => Box::new(s.clone()),
        SqlValue::Int32(i) => Box::new(*i),
        SqlValue::Int64(i) => Box::new(*i),
        SqlValue::Float64(v) => Box::new(*v),
        SqlValue::Bool(b) => Box::new(*b),
    }
}

/// Convert a column value to a SqlValue. Types without a `SqlValue`
/// counterpart are read as text; a column that cannot be read that way
/// (NUMERIC, DATE, TIMESTAMP, UUID, ...) fails the statement. Cast it to
/// text in the select list to read it.
fn row_value(
    row: &tokio_postgres::Row,
    index: usize,
    column: &str,
    type_: &Type,
) -> Result<SqlValue> {
    let value: std::result::Result<SqlValue, tokio_postgres::Error> = if *type_ == Type::INT2 {
        row.try_get::<_, Option<i16>>(index)
            .map(|v| v.map(i32::from).into())
    } else if *type_ == Type::INT4 {
        row.try_get::<_, Option<i32>>(index).map(Into::into)
    } else if *type_ == Type::INT8 {
        row.try_get::<_, Option<i64>>(index).map(Into::into)
    } else if *type_ == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(index)
            .map(|v| v.map(f64::from).into())
    } else if *type_ == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(index).map(Into::into)
    } else if *type_ == Type::BOOL {
        row.try_get::<_, Option<bool>>(index).map(Into::into)
    } else {
        row.try_get::<_, Option<String>>(index).map(Into::into)
    };

    value.map_err(|e| unreadable_column(column, type_, &e))
}

fn unreadable_column(column: &str, type_: &Type, cause: &dyn std::fmt::Display) -> PdoRsError {
    PdoRsError::query(format!(
        "cannot read column {} of type {}: {}",
        column, type_, cause
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pg_config_from_descriptor() {
        let config = pg_config(
            "pgsql:host=db.local;port=6432;dbname=shop;user=app;password=secret",
            None,
        )
        .unwrap();
        assert_eq!(config.get_dbname(), Some("shop"));
        assert_eq!(config.get_user(), Some("app"));
        assert_eq!(config.get_ports(), &[6432u16]);
        assert_eq!(config.get_password(), Some(&b"secret"[..]));
    }

    #[test]
    fn test_pg_config_skips_empty_values() {
        let config = pg_config("pgsql:host=localhost;port=;dbname=shop;user=;password=", None)
            .unwrap();
        assert!(config.get_ports().is_empty());
        assert_eq!(config.get_user(), None);
    }

    #[test]
    fn test_pg_config_rejects_other_descriptors() {
        let err = pg_config("mysql:host=localhost;dbname=shop", None).unwrap_err();
        assert!(matches!(err, PdoRsError::ConnectionFailed(_)));
    }

    #[test]
    fn test_pg_config_bad_port() {
        let err = pg_config("pgsql:host=localhost;port=abc;dbname=shop", None).unwrap_err();
        assert!(matches!(err, PdoRsError::ConnectionFailed(_)));
    }

    #[test]
    fn test_pg_config_password_with_semicolon() {
        let config = pg_config(
            "pgsql:host=localhost;port=5432;dbname=shop;user=app;password=se;cr=et",
            None,
        )
        .unwrap();
        assert_eq!(config.get_password(), Some(&b"se;cr=et"[..]));
        assert_eq!(config.get_user(), Some("app"));
        assert_eq!(config.get_dbname(), Some("shop"));
    }

    #[test]
    fn test_unreadable_column_is_an_error() {
        let err = unreadable_column("created", &Type::TIMESTAMPTZ, &"wrong type");
        let record = err.error_record().unwrap();
        assert!(matches!(err, PdoRsError::QueryFailed(_)));
        assert!(record.raw().contains("created"));
        assert!(record.raw().contains("timestamptz"));
    }
}
