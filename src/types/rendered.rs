use std::fmt;

use super::{BindMap, SqlValue};
use crate::error::{PdoRsError, Result};

/// The statement a `RenderedStatement` was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    CreateTable,
    AlterTable,
    AlterDatabase,
    DropTable,
    Insert,
    Delete,
    Select,
    Update,
    TableExists,
}

impl StatementKind {
    /// Whether executing the statement yields a row set.
    pub fn returns_rows(&self) -> bool {
        matches!(self, StatementKind::Select | StatementKind::TableExists)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementKind::CreateTable => "CREATE TABLE",
            StatementKind::AlterTable => "ALTER TABLE",
            StatementKind::AlterDatabase => "ALTER DATABASE",
            StatementKind::DropTable => "DROP TABLE",
            StatementKind::Insert => "INSERT",
            StatementKind::Delete => "DELETE",
            StatementKind::Select => "SELECT",
            StatementKind::Update => "UPDATE",
            StatementKind::TableExists => "TABLE EXISTS",
        };
        f.write_str(name)
    }
}

/// Positional placeholder syntax for clients without named parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `$1, $2, ...`; a repeated name reuses its number.
    Dollar,
    /// `?` per occurrence.
    Question,
}

/// SQL text with `:name` placeholders and the values bound to them.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedStatement {
    pub kind: StatementKind,
    pub text: String,
    pub bindings: BindMap,
}

impl RenderedStatement {
    pub fn new(kind: StatementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            bindings: BindMap::new(),
        }
    }

    pub fn with_bindings(mut self, bindings: BindMap) -> Self {
        self.bindings = bindings;
        self
    }

    /// Rewrites named placeholders into `style` and returns the values in
    /// parameter order.
    ///
    /// Text inside quotes (including backslash-escaped quotes) and `::` casts
    /// is left alone. A placeholder with no binding is an error.
    pub fn to_positional(&self, style: PlaceholderStyle) -> Result<(String, Vec<SqlValue>)> {
        let mut sql = String::with_capacity(self.text.len());
        let mut params: Vec<SqlValue> = Vec::new();
        let mut numbered: Vec<String> = Vec::new();

        let chars: Vec<char> = self.text.chars().collect();
        let mut quote: Option<char> = None;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if let Some(q) = quote {
                sql.push(c);
                if c == '\\' && q != '`' {
                    if let Some(&escaped) = chars.get(i + 1) {
                        sql.push(escaped);
                    }
                    i += 2;
                    continue;
                }
                if c == q {
                    quote = None;
                }
                i += 1;
                continue;
            }

            match c {
                '\'' | '"' | '`' => {
                    quote = Some(c);
                    sql.push(c);
                    i += 1;
                }
                ':' if chars.get(i + 1) == Some(&':') => {
                    sql.push_str("::");
                    i += 2;
                }
                ':' if chars
                    .get(i + 1)
                    .is_some_and(|n| n.is_ascii_alphabetic() || *n == '_') =>
                {
                    let start = i + 1;
                    let mut end = start;
                    while end < chars.len() && (chars[end].is_ascii_alphanumeric() || chars[end] == '_')
                    {
                        end += 1;
                    }
                    let name: String = chars[start..end].iter().collect();
                    let value = self.bindings.get(&name).ok_or_else(|| {
                        PdoRsError::InvalidStatement(format!("no value bound to :{}", name))
                    })?;

                    match style {
                        PlaceholderStyle::Dollar => {
                            let index = match numbered.iter().position(|n| *n == name) {
                                Some(pos) => pos + 1,
                                None => {
                                    numbered.push(name);
                                    params.push(value.clone());
                                    params.len()
                                }
                            };
                            sql.push('$');
                            sql.push_str(&index.to_string());
                        }
                        PlaceholderStyle::Question => {
                            params.push(value.clone());
                            sql.push('?');
                        }
                    }
                    i = end;
                }
                _ => {
                    sql.push(c);
                    i += 1;
                }
            }
        }

        Ok((sql, params))
    }
}

impl fmt::Display for RenderedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
