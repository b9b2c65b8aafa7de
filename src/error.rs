use thiserror::Error;

use crate::classify::ErrorRecord;
use crate::dsn::DriverKind;

/// Error type for pdors operations
#[derive(Debug, Error)]
pub enum PdoRsError {
    #[error("Unsupported driver: {0}")]
    UnsupportedDriver(String),

    #[error("Missing required parameter '{parameter}' for {driver}")]
    MissingRequiredParameter {
        driver: DriverKind,
        parameter: &'static str,
    },

    #[error("Invalid statement: {0}")]
    InvalidStatement(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(ErrorRecord),

    #[error("Query failed: {0}")]
    QueryFailed(ErrorRecord),

    #[error("Table {table} was not created")]
    TableNotCreated {
        table: String,
        cause: Option<ErrorRecord>,
    },

    #[error("Expected {expected} row(s), got {actual}")]
    UnexpectedRowCount { expected: usize, actual: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl PdoRsError {
    /// Wraps a raw driver message from a failed open.
    pub fn connection(raw: impl Into<String>) -> Self {
        Self::ConnectionFailed(ErrorRecord::from_raw(raw))
    }

    /// Wraps a raw driver message from a failed prepare or execute.
    pub fn query(raw: impl Into<String>) -> Self {
        Self::QueryFailed(ErrorRecord::from_raw(raw))
    }

    /// Returns the classified driver error, if this error came from the driver.
    pub fn error_record(&self) -> Option<&ErrorRecord> {
        match self {
            Self::ConnectionFailed(record) | Self::QueryFailed(record) => Some(record),
            Self::TableNotCreated { cause, .. } => cause.as_ref(),
            _ => None,
        }
    }
}

/// Result type alias for pdors operations
pub type Result<T> = std::result::Result<T, PdoRsError>;
