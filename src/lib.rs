//! pdors - driver-specific connection descriptors and MySQL-dialect statement
//! builders over a PDO-style database client
//!
//! # Example
//! ```ignore
//! use std::sync::Arc;
//! use pdors::{ConnectionParameters, DriverKind, PdoRsClient, Select, WhereClause};
//! use pdors::drivers::TokioPostgresConnector;
//!
//! let params = ConnectionParameters::new()
//!     .server("localhost")
//!     .port(5432)
//!     .database("test")
//!     .username("app")
//!     .password("secret");
//! let client = PdoRsClient::connect(DriverKind::Pgsql, &params, Arc::new(TokioPostgresConnector)).await?;
//! let querier = client.querier();
//!
//! querier.create_table("test", "firstName VARCHAR(30)").await?;
//! let rows = querier
//!     .select(Select::from("test").where_(WhereClause::eq("firstName", "Al")).limit(5))
//!     .await?
//!     .rows();
//! ```

pub mod builders;
pub mod classify;
pub mod clauses;
pub mod config;
pub mod drivers;
pub mod dsn;
pub mod error;
pub mod provider;
pub mod querier;
pub mod traits;
pub mod types;

mod client;

// Re-export main types for convenient access
pub use builders::{
    AlterDatabase, AlterTable, CreateTable, Delete, DropTable, Insert, Select, StatementRequest,
    TableExists, Update,
};
pub use classify::{classify_error, ErrorCategory, ErrorClassifier, ErrorRecord};
pub use clauses::{Limit, WhereClause};
pub use client::PdoRsClient;
pub use config::DatabaseConfig;
pub use dsn::{
    build_connection_descriptor, ConnectionDescriptor, ConnectionParameters, Credentials,
    DriverKind,
};
pub use error::{PdoRsError, Result};
pub use provider::ReusingSessionProvider;
pub use querier::{Querier, TableExistence};
pub use traits::{Connector, Session, SessionProvider};
pub use types::{
    BindMap, PlaceholderStyle, QueryResult, RawQueryResult, RenderedStatement, Row, SqlValue,
    StatementKind,
};
