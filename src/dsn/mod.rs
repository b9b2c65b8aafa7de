//! Driver-specific connection descriptors.

mod dialect;
mod driver_kind;
mod params;

pub use dialect::{dialect_for, Dialect, DialectOutput, RequiredParameter};
pub use driver_kind::DriverKind;
pub use params::{ConnectionParameters, Credentials};

use crate::error::{PdoRsError, Result};

/// Everything a client needs to open a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub driver: DriverKind,
    /// The driver-specific connection string. May embed a password when
    /// `credentials_inline` is set.
    pub dsn: String,
    pub credentials_inline: bool,
    /// Credentials to pass alongside the descriptor. `None` when they are
    /// embedded or the driver takes none.
    pub credentials: Option<Credentials>,
    /// Sqlite only. The caller asked for an in-memory database; the dsn is
    /// still built from `database`.
    pub in_memory_hint: bool,
}

/// Builds the connection descriptor for `driver`.
///
/// Pure: identical inputs give identical descriptors.
pub fn build_connection_descriptor(
    driver: DriverKind,
    params: &ConnectionParameters,
) -> Result<ConnectionDescriptor> {
    let dialect = dialect_for(driver);

    if let Some(missing) = dialect.required().iter().find(|p| !p.is_set(params)) {
        return Err(PdoRsError::MissingRequiredParameter {
            driver,
            parameter: missing.name(),
        });
    }

    let DialectOutput {
        dsn,
        credentials_inline,
    } = dialect.render(params);

    let credentials = (!credentials_inline && dialect.accepts_credentials())
        .then(|| params.credentials());

    Ok(ConnectionDescriptor {
        driver,
        dsn,
        credentials_inline,
        credentials,
        in_memory_hint: driver == DriverKind::Sqlite && params.create_in_memory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_params() -> ConnectionParameters {
        ConnectionParameters::new()
            .server("localhost")
            .database("test")
            .username("root")
            .password("secret")
            .port(5432)
            .protocol("TCPIP")
            .host("ifxhost")
            .enable_scrollable_cursor(true)
            .sqlite_suffix("sqlite3")
    }

    fn dsn(driver: DriverKind, params: &ConnectionParameters) -> ConnectionDescriptor {
        build_connection_descriptor(driver, params).unwrap()
    }

    #[test]
    fn test_cubrid() {
        let d = dsn(DriverKind::Cubrid, &full_params());
        assert_eq!(d.dsn, "cubrid:dbname=test;host=localhost;port=5432");
        assert!(!d.credentials_inline);
        assert_eq!(d.credentials.unwrap().username.as_deref(), Some("root"));
    }

    #[test]
    fn test_dblib() {
        let d = dsn(DriverKind::DbLib, &full_params());
        assert_eq!(d.dsn, "dblib:host=localhost;dbname=test");
        assert!(!d.credentials_inline);
    }

    #[test]
    fn test_firebird_database_is_verbatim() {
        let params = ConnectionParameters::new().database("hostname/3050:/path/to/DATABASE.FDB");
        let d = dsn(DriverKind::Firebird, &params);
        assert_eq!(d.dsn, "firebird:dbname=hostname/3050:/path/to/DATABASE.FDB");
    }

    #[test]
    fn test_ibm() {
        let d = dsn(DriverKind::Ibm, &full_params());
        assert_eq!(
            d.dsn,
            "ibm:DRIVER={IBM DB2 ODBC DRIVER};DATABASE=test;HOSTNAME=localhost;PORT=5432;PROTOCOL=TCPIP;"
        );
    }

    #[test]
    fn test_informix() {
        let d = dsn(DriverKind::Informix, &full_params());
        assert_eq!(
            d.dsn,
            "informix:host=ifxhost; service=5432; database=test; server=localhost; protocol=TCPIP; EnableScrollableCursors=1"
        );
    }

    #[test]
    fn test_mysql() {
        let d = dsn(DriverKind::MySql, &full_params());
        assert_eq!(d.dsn, "mysql:host=localhost;dbname=test");
        assert!(!d.credentials_inline);
        let credentials = d.credentials.unwrap();
        assert_eq!(credentials.username.as_deref(), Some("root"));
        assert_eq!(credentials.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_oci_with_and_without_server() {
        let params = ConnectionParameters::new().server("//localhost:1521").database("mydb");
        assert_eq!(dsn(DriverKind::Oci, &params).dsn, "oci:dbname=//localhost:1521/mydb;");

        let params = ConnectionParameters::new().database("mydb");
        assert_eq!(dsn(DriverKind::Oci, &params).dsn, "oci:dbname=mydb;");
    }

    #[test]
    fn test_odbc_inline_when_server_port_protocol_present() {
        let d = dsn(DriverKind::Odbc, &full_params());
        assert_eq!(
            d.dsn,
            "odbc:DRIVER={IBM DB2 ODBC DRIVER};HOSTNAME=localhost;PORT=5432;DATABASE=test;PROTOCOL=TCPIP;UID=root;PWD=secret;"
        );
        assert!(d.credentials_inline);
        assert!(d.credentials.is_none());
    }

    #[test]
    fn test_odbc_falls_back_to_dsn_name() {
        let params = ConnectionParameters::new()
            .server("localhost")
            .database("SAMPLE")
            .port(50000)
            .protocol("")
            .username("db2inst1");
        let d = dsn(DriverKind::Odbc, &params);
        assert_eq!(d.dsn, "odbc:SAMPLE");
        assert!(!d.credentials_inline);
        assert!(!d.dsn.contains("UID="));
        assert_eq!(d.credentials.unwrap().username.as_deref(), Some("db2inst1"));
    }

    #[test]
    fn test_pgsql_embeds_credentials() {
        let d = dsn(DriverKind::Pgsql, &full_params());
        assert_eq!(
            d.dsn,
            "pgsql:host=localhost;port=5432;dbname=test;user=root;password=secret"
        );
        assert!(d.credentials_inline);
        assert!(d.credentials.is_none());
    }

    #[test]
    fn test_sqlite() {
        let d = dsn(DriverKind::Sqlite, &full_params().create_in_memory(true));
        assert_eq!(d.dsn, "sqlite:test.sqlite3");
        assert!(!d.credentials_inline);
        assert!(d.credentials.is_none());
        assert!(d.in_memory_hint);

        let params = ConnectionParameters::new().database("/tmp/app.db");
        assert_eq!(dsn(DriverKind::Sqlite, &params).dsn, "sqlite:/tmp/app.db");
    }

    #[test]
    fn test_sqlsrv_port_handling() {
        let d = dsn(DriverKind::SqlSrv, &full_params());
        assert_eq!(d.dsn, "sqlsrv:Server=localhost,5432;DATABASE=test");

        let params = ConnectionParameters::new()
            .server("12345abcde.database.windows.net")
            .database("test");
        let d = dsn(DriverKind::SqlSrv, &params);
        assert_eq!(
            d.dsn,
            "sqlsrv:Server=12345abcde.database.windows.net,;DATABASE=test"
        );
    }

    #[test]
    fn test_four_d() {
        let d = dsn(DriverKind::FourD, &ConnectionParameters::new().server("localhost"));
        assert_eq!(d.dsn, "host=localhost");
        assert!(!d.credentials_inline);
    }

    #[test]
    fn test_missing_database() {
        let err = build_connection_descriptor(DriverKind::Sqlite, &ConnectionParameters::new())
            .unwrap_err();
        match err {
            PdoRsError::MissingRequiredParameter { driver, parameter } => {
                assert_eq!(driver, DriverKind::Sqlite);
                assert_eq!(parameter, "database");
            }
            _ => panic!("Expected MissingRequiredParameter error"),
        }
    }

    #[test]
    fn test_four_d_requires_server() {
        let params = ConnectionParameters::new().database("test");
        let err = build_connection_descriptor(DriverKind::FourD, &params).unwrap_err();
        assert!(matches!(
            err,
            PdoRsError::MissingRequiredParameter {
                parameter: "server",
                ..
            }
        ));
    }

    #[test]
    fn test_builder_is_pure() {
        let params = full_params();
        for kind in DriverKind::ALL {
            assert_eq!(dsn(kind, &params), dsn(kind, &params));
        }
    }
}
