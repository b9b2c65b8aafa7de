use std::fmt;

use serde::Deserialize;

/// Named connection parameters.
///
/// Every field is optional and empty strings count as absent. Which fields a
/// driver actually reads is decided by its dialect, never by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionParameters {
    pub server: Option<String>,
    pub database: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub port: Option<u16>,
    pub protocol: Option<String>,
    /// Informix only.
    pub host: Option<String>,
    /// Informix only.
    pub enable_scrollable_cursor: Option<bool>,
    /// Sqlite file extension appended to `database`.
    pub sqlite_suffix: Option<String>,
    /// Sqlite only. Advisory; the descriptor is still built from `database`.
    pub create_in_memory: bool,
}

impl ConnectionParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn enable_scrollable_cursor(mut self, enable: bool) -> Self {
        self.enable_scrollable_cursor = Some(enable);
        self
    }

    pub fn sqlite_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.sqlite_suffix = Some(suffix.into());
        self
    }

    pub fn create_in_memory(mut self, in_memory: bool) -> Self {
        self.create_in_memory = in_memory;
        self
    }

    /// Username and password for passing to the client out-of-band.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: present(&self.username).map(str::to_string),
            password: present(&self.password).map(str::to_string),
        }
    }
}

/// Returns the value if it is set and non-empty.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Username and password handed to the client separately from the descriptor.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}
