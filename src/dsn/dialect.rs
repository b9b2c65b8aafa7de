use super::params::present;
use super::{ConnectionParameters, DriverKind};

/// A parameter a dialect cannot build a descriptor without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredParameter {
    Server,
    Database,
}

impl RequiredParameter {
    pub fn name(&self) -> &'static str {
        match self {
            RequiredParameter::Server => "server",
            RequiredParameter::Database => "database",
        }
    }

    pub(crate) fn is_set(&self, params: &ConnectionParameters) -> bool {
        match self {
            RequiredParameter::Server => present(&params.server).is_some(),
            RequiredParameter::Database => present(&params.database).is_some(),
        }
    }
}

/// Descriptor text plus whether the credentials are embedded in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectOutput {
    pub dsn: String,
    pub credentials_inline: bool,
}

impl DialectOutput {
    fn separate(dsn: String) -> Self {
        Self {
            dsn,
            credentials_inline: false,
        }
    }

    fn inline(dsn: String) -> Self {
        Self {
            dsn,
            credentials_inline: true,
        }
    }
}

/// Connection-string rules for one driver.
pub trait Dialect: Send + Sync {
    fn driver(&self) -> DriverKind;

    /// Parameters that must be set and non-empty.
    fn required(&self) -> &'static [RequiredParameter] {
        &[RequiredParameter::Database]
    }

    /// Whether the client should receive username/password separately when
    /// they are not embedded in the descriptor.
    fn accepts_credentials(&self) -> bool {
        true
    }

    fn render(&self, params: &ConnectionParameters) -> DialectOutput;
}

/// Interpolates an optional value; absent values become empty text.
fn text(value: &Option<String>) -> &str {
    present(value).unwrap_or("")
}

fn port(value: Option<u16>) -> String {
    value.map(|p| p.to_string()).unwrap_or_default()
}

struct Cubrid;

impl Dialect for Cubrid {
    fn driver(&self) -> DriverKind {
        DriverKind::Cubrid
    }

    fn render(&self, p: &ConnectionParameters) -> DialectOutput {
        DialectOutput::separate(format!(
            "cubrid:dbname={};host={};port={}",
            text(&p.database),
            text(&p.server),
            port(p.port)
        ))
    }
}

struct DbLib;

impl Dialect for DbLib {
    fn driver(&self) -> DriverKind {
        DriverKind::DbLib
    }

    fn render(&self, p: &ConnectionParameters) -> DialectOutput {
        DialectOutput::separate(format!(
            "dblib:host={};dbname={}",
            text(&p.server),
            text(&p.database)
        ))
    }
}

/// `database` carries the whole target, e.g. `/path/to/DB.FDB` or
/// `hostname/port:/path/to/DB.FDB`. It is not parsed.
struct Firebird;

impl Dialect for Firebird {
    fn driver(&self) -> DriverKind {
        DriverKind::Firebird
    }

    fn render(&self, p: &ConnectionParameters) -> DialectOutput {
        DialectOutput::separate(format!("firebird:dbname={}", text(&p.database)))
    }
}

struct Ibm;

impl Dialect for Ibm {
    fn driver(&self) -> DriverKind {
        DriverKind::Ibm
    }

    fn render(&self, p: &ConnectionParameters) -> DialectOutput {
        DialectOutput::separate(format!(
            "ibm:DRIVER={{IBM DB2 ODBC DRIVER}};DATABASE={};HOSTNAME={};PORT={};PROTOCOL={};",
            text(&p.database),
            text(&p.server),
            port(p.port),
            text(&p.protocol)
        ))
    }
}

struct Informix;

impl Dialect for Informix {
    fn driver(&self) -> DriverKind {
        DriverKind::Informix
    }

    fn render(&self, p: &ConnectionParameters) -> DialectOutput {
        let scrollable = match p.enable_scrollable_cursor {
            Some(true) => "1",
            Some(false) => "0",
            None => "",
        };
        DialectOutput::separate(format!(
            "informix:host={}; service={}; database={}; server={}; protocol={}; EnableScrollableCursors={}",
            text(&p.host),
            port(p.port),
            text(&p.database),
            text(&p.server),
            text(&p.protocol),
            scrollable
        ))
    }
}

struct MySql;

impl Dialect for MySql {
    fn driver(&self) -> DriverKind {
        DriverKind::MySql
    }

    fn render(&self, p: &ConnectionParameters) -> DialectOutput {
        DialectOutput::separate(format!(
            "mysql:host={};dbname={}",
            text(&p.server),
            text(&p.database)
        ))
    }
}

/// With a server (`//localhost:1521`) this targets Instant Client, otherwise a
/// name from tnsnames.ora.
struct Oci;

impl Dialect for Oci {
    fn driver(&self) -> DriverKind {
        DriverKind::Oci
    }

    fn render(&self, p: &ConnectionParameters) -> DialectOutput {
        let dsn = match present(&p.server) {
            Some(server) => format!("oci:dbname={}/{};", server, text(&p.database)),
            None => format!("oci:dbname={};", text(&p.database)),
        };
        DialectOutput::separate(dsn)
    }
}

struct Odbc;

impl Dialect for Odbc {
    fn driver(&self) -> DriverKind {
        DriverKind::Odbc
    }

    fn render(&self, p: &ConnectionParameters) -> DialectOutput {
        match (present(&p.server), p.port, present(&p.protocol)) {
            (Some(server), Some(port), Some(protocol)) => DialectOutput::inline(format!(
                "odbc:DRIVER={{IBM DB2 ODBC DRIVER}};HOSTNAME={};PORT={};DATABASE={};PROTOCOL={};UID={};PWD={};",
                server,
                port,
                text(&p.database),
                protocol,
                text(&p.username),
                text(&p.password)
            )),
            _ => DialectOutput::separate(format!("odbc:{}", text(&p.database))),
        }
    }
}

struct Pgsql;

impl Dialect for Pgsql {
    fn driver(&self) -> DriverKind {
        DriverKind::Pgsql
    }

    fn render(&self, p: &ConnectionParameters) -> DialectOutput {
        DialectOutput::inline(format!(
            "pgsql:host={};port={};dbname={};user={};password={}",
            text(&p.server),
            port(p.port),
            text(&p.database),
            text(&p.username),
            text(&p.password)
        ))
    }
}

struct Sqlite;

impl Dialect for Sqlite {
    fn driver(&self) -> DriverKind {
        DriverKind::Sqlite
    }

    fn accepts_credentials(&self) -> bool {
        false
    }

    fn render(&self, p: &ConnectionParameters) -> DialectOutput {
        let dsn = match present(&p.sqlite_suffix) {
            Some(suffix) => format!("sqlite:{}.{}", text(&p.database), suffix),
            None => format!("sqlite:{}", text(&p.database)),
        };
        DialectOutput::separate(dsn)
    }
}

struct SqlSrv;

impl Dialect for SqlSrv {
    fn driver(&self) -> DriverKind {
        DriverKind::SqlSrv
    }

    fn render(&self, p: &ConnectionParameters) -> DialectOutput {
        DialectOutput::separate(format!(
            "sqlsrv:Server={},{};DATABASE={}",
            text(&p.server),
            port(p.port),
            text(&p.database)
        ))
    }
}

/// Experimental in PDO.
struct FourD;

impl Dialect for FourD {
    fn driver(&self) -> DriverKind {
        DriverKind::FourD
    }

    fn required(&self) -> &'static [RequiredParameter] {
        &[RequiredParameter::Server]
    }

    fn render(&self, p: &ConnectionParameters) -> DialectOutput {
        DialectOutput::separate(format!("host={}", text(&p.server)))
    }
}

/// Looks up the dialect for a driver.
pub fn dialect_for(driver: DriverKind) -> &'static dyn Dialect {
    match driver {
        DriverKind::Cubrid => &Cubrid,
        DriverKind::DbLib => &DbLib,
        DriverKind::Firebird => &Firebird,
        DriverKind::Ibm => &Ibm,
        DriverKind::Informix => &Informix,
        DriverKind::MySql => &MySql,
        DriverKind::Oci => &Oci,
        DriverKind::Odbc => &Odbc,
        DriverKind::Pgsql => &Pgsql,
        DriverKind::Sqlite => &Sqlite,
        DriverKind::SqlSrv => &SqlSrv,
        DriverKind::FourD => &FourD,
    }
}
