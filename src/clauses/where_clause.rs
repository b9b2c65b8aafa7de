use crate::error::Result;
use crate::types::{BindMap, SqlValue};

/// Represents a WHERE clause condition.
/// Either a raw fragment passed through verbatim or composed equality checks.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereClause {
    /// Verbatim SQL with any values it references by `:name`
    Raw { sql: String, bindings: BindMap },
    /// column = value
    Eq(String, SqlValue),
    /// clause AND clause
    And(Box<WhereClause>, Box<WhereClause>),
    /// clause OR clause
    Or(Box<WhereClause>, Box<WhereClause>),
}

impl WhereClause {
    /// A fragment used as-is, e.g. `id=1`.
    pub fn raw(sql: impl Into<String>) -> Self {
        WhereClause::Raw {
            sql: sql.into(),
            bindings: BindMap::new(),
        }
    }

    /// A fragment with its own named placeholders, e.g. `id = :id`.
    pub fn raw_bound<I, K, V>(sql: impl Into<String>, bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        WhereClause::Raw {
            sql: sql.into(),
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Creates an equality condition: column = value
    pub fn eq<V: Into<SqlValue>>(column: impl Into<String>, value: V) -> Self {
        WhereClause::Eq(column.into(), value.into())
    }

    /// Combines this clause with another using AND
    pub fn and(self, other: WhereClause) -> Self {
        WhereClause::And(Box::new(self), Box::new(other))
    }

    /// Combines this clause with another using OR
    pub fn or(self, other: WhereClause) -> Self {
        WhereClause::Or(Box::new(self), Box::new(other))
    }

    /// True for a raw fragment with no text.
    pub(crate) fn is_blank(&self) -> bool {
        matches!(self, WhereClause::Raw { sql, .. } if sql.trim().is_empty())
    }

    /// Names bound by raw fragments anywhere in this clause.
    pub(crate) fn raw_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_raw_names(&mut names);
        names
    }

    fn collect_raw_names(&self, names: &mut Vec<String>) {
        match self {
            WhereClause::Raw { bindings, .. } => {
                names.extend(bindings.names().map(str::to_string));
            }
            WhereClause::Eq(..) => {}
            WhereClause::And(left, right) | WhereClause::Or(left, right) => {
                left.collect_raw_names(names);
                right.collect_raw_names(names);
            }
        }
    }

    /// Builds the SQL fragment and adds its values to `bindings`.
    /// Equality values are bound as `:where_1`, `:where_2`, ... skipping names
    /// already bound or used by a raw fragment of this clause. A raw fragment
    /// binding a name that already holds a different value is an error.
    pub fn build_sql(&self, bindings: &mut BindMap) -> Result<String> {
        let reserved = self.raw_names();
        self.render(bindings, &reserved)
    }

    fn render(&self, bindings: &mut BindMap, reserved: &[String]) -> Result<String> {
        match self {
            WhereClause::Raw { sql, bindings: own } => {
                bindings.merge(own)?;
                Ok(sql.clone())
            }
            WhereClause::Eq(column, value) => {
                let name = (1..)
                    .map(|n| format!("where_{}", n))
                    .find(|name| !bindings.contains(name) && !reserved.contains(name))
                    .unwrap_or_default();
                let sql = format!("{} = :{}", column, name);
                bindings.bind(name, value.clone());
                Ok(sql)
            }
            WhereClause::And(left, right) => Ok(format!(
                "({}) AND ({})",
                left.render(bindings, reserved)?,
                right.render(bindings, reserved)?
            )),
            WhereClause::Or(left, right) => Ok(format!(
                "({}) OR ({})",
                left.render(bindings, reserved)?,
                right.render(bindings, reserved)?
            )),
        }
    }
}

impl From<&str> for WhereClause {
    fn from(sql: &str) -> Self {
        WhereClause::raw(sql)
    }
}

impl From<String> for WhereClause {
    fn from(sql: String) -> Self {
        WhereClause::raw(sql)
    }
}
