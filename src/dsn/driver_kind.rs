use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::PdoRsError;

/// The database drivers a descriptor can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum DriverKind {
    Cubrid,
    DbLib,
    Firebird,
    Ibm,
    Informix,
    MySql,
    Oci,
    Odbc,
    Pgsql,
    Sqlite,
    SqlSrv,
    FourD,
}

impl DriverKind {
    pub const ALL: [DriverKind; 12] = [
        DriverKind::Cubrid,
        DriverKind::DbLib,
        DriverKind::Firebird,
        DriverKind::Ibm,
        DriverKind::Informix,
        DriverKind::MySql,
        DriverKind::Oci,
        DriverKind::Odbc,
        DriverKind::Pgsql,
        DriverKind::Sqlite,
        DriverKind::SqlSrv,
        DriverKind::FourD,
    ];

    /// The PDO driver name, e.g. `PDO_MYSQL`.
    pub fn pdo_name(&self) -> &'static str {
        match self {
            DriverKind::Cubrid => "PDO_CUBRID",
            DriverKind::DbLib => "PDO_DBLIB",
            DriverKind::Firebird => "PDO_FIREBIRD",
            DriverKind::Ibm => "PDO_IBM",
            DriverKind::Informix => "PDO_INFORMIX",
            DriverKind::MySql => "PDO_MYSQL",
            DriverKind::Oci => "PDO_OCI",
            DriverKind::Odbc => "PDO_ODBC",
            DriverKind::Pgsql => "PDO_PGSQL",
            DriverKind::Sqlite => "PDO_SQLITE",
            DriverKind::SqlSrv => "PDO_SQLSRV",
            DriverKind::FourD => "PDO_4D",
        }
    }

    /// The short name used as the descriptor prefix, e.g. `mysql`.
    pub fn short_name(&self) -> &'static str {
        match self {
            DriverKind::Cubrid => "cubrid",
            DriverKind::DbLib => "dblib",
            DriverKind::Firebird => "firebird",
            DriverKind::Ibm => "ibm",
            DriverKind::Informix => "informix",
            DriverKind::MySql => "mysql",
            DriverKind::Oci => "oci",
            DriverKind::Odbc => "odbc",
            DriverKind::Pgsql => "pgsql",
            DriverKind::Sqlite => "sqlite",
            DriverKind::SqlSrv => "sqlsrv",
            DriverKind::FourD => "4d",
        }
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pdo_name())
    }
}

/// Accepts either the PDO name (`PDO_MYSQL`) or the short name (`mysql`),
/// ignoring case.
impl FromStr for DriverKind {
    type Err = PdoRsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        DriverKind::ALL
            .into_iter()
            .find(|kind| {
                name.eq_ignore_ascii_case(kind.pdo_name())
                    || name.eq_ignore_ascii_case(kind.short_name())
            })
            .ok_or_else(|| PdoRsError::UnsupportedDriver(name.to_string()))
    }
}

impl TryFrom<String> for DriverKind {
    type Error = PdoRsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pdo_and_short_names() {
        assert_eq!("PDO_MYSQL".parse::<DriverKind>().unwrap(), DriverKind::MySql);
        assert_eq!("pdo_pgsql".parse::<DriverKind>().unwrap(), DriverKind::Pgsql);
        assert_eq!("sqlsrv".parse::<DriverKind>().unwrap(), DriverKind::SqlSrv);
        assert_eq!("PDO_4D".parse::<DriverKind>().unwrap(), DriverKind::FourD);
    }

    #[test]
    fn test_parse_unknown_driver() {
        let err = "PDO_MONGO".parse::<DriverKind>().unwrap_err();
        match err {
            PdoRsError::UnsupportedDriver(name) => assert_eq!(name, "PDO_MONGO"),
            _ => panic!("Expected UnsupportedDriver error"),
        }
    }

    #[test]
    fn test_names_round_trip() {
        for kind in DriverKind::ALL {
            assert_eq!(kind.pdo_name().parse::<DriverKind>().unwrap(), kind);
            assert_eq!(kind.short_name().parse::<DriverKind>().unwrap(), kind);
        }
    }
}
