use super::required;
use crate::clauses::{non_blank, ClauseTail, Limit, WhereClause};
use crate::error::{PdoRsError, Result};
use crate::types::{placeholder_name, BindMap, RenderedStatement, SqlValue, StatementKind};

#[derive(Debug, Clone, PartialEq)]
enum Assignment {
    Raw(String),
    Bound(String, SqlValue),
}

/// `UPDATE <table> SET <assignments>` with optional WHERE, ORDER BY and LIMIT.
///
/// Assignments are either raw fragments (`hits = hits + 1`) or bound values
/// (`name = :name`), joined with `, ` in the order they were added.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    table: String,
    assignments: Vec<Assignment>,
    tail: ClauseTail,
}

impl Update {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            assignments: Vec::new(),
            tail: ClauseTail::default(),
        }
    }

    /// Appends a verbatim SET fragment.
    pub fn set_raw(mut self, fragment: impl Into<String>) -> Self {
        if let Some(fragment) = non_blank(fragment) {
            self.assignments.push(Assignment::Raw(fragment));
        }
        self
    }

    /// Appends `field = :field` bound to `value`.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.assignments
            .push(Assignment::Bound(field.into(), value.into()));
        self
    }

    pub fn where_(mut self, clause: impl Into<WhereClause>) -> Self {
        self.tail.where_clause = Some(clause.into());
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.tail.order_by = non_blank(order_by);
        self
    }

    pub fn limit(mut self, count: u64) -> Self {
        self.tail.limit = Some(Limit::new(count));
        self
    }

    pub fn build(&self) -> Result<RenderedStatement> {
        let table = required(&self.table, "table reference")?;
        if self.assignments.is_empty() {
            return Err(PdoRsError::InvalidStatement(
                "UPDATE needs at least one assignment".to_string(),
            ));
        }

        let reserved = self.tail.reserved_names();
        let mut bindings = BindMap::new();
        let mut parts = Vec::with_capacity(self.assignments.len());
        for assignment in &self.assignments {
            match assignment {
                Assignment::Raw(fragment) => parts.push(fragment.clone()),
                Assignment::Bound(field, value) => {
                    let field = required(field, "field name")?;
                    let name = placeholder_name(field, |n| {
                        bindings.contains(n) || reserved.iter().any(|r| r == n)
                    });
                    parts.push(format!("{} = :{}", field, name));
                    bindings.bind(name, value.clone());
                }
            }
        }

        let mut sql = format!("UPDATE {} SET {}", table, parts.join(", "));
        self.tail.render(&mut sql, &mut bindings)?;

        Ok(RenderedStatement::new(StatementKind::Update, sql).with_bindings(bindings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_update_raw() {
        let stmt = Update::table("test")
            .set_raw("lastName = 'X'")
            .where_("id=1")
            .build()
            .unwrap();
        assert_eq!(stmt.text, "UPDATE test SET lastName = 'X' WHERE id=1");
    }

    #[test]
    fn test_build_update_bound_with_clauses() {
        let stmt = Update::table("users")
            .set("name", "Bo")
            .set_raw("hits = hits + 1")
            .where_(WhereClause::eq("id", 7))
            .order_by("id")
            .limit(1)
            .build()
            .unwrap();
        assert_eq!(
            stmt.text,
            "UPDATE users SET name = :name, hits = hits + 1 WHERE id = :where_1 ORDER BY id LIMIT 1"
        );
        let names: Vec<&str> = stmt.bindings.names().collect();
        assert_eq!(names, ["name", "where_1"]);
    }

    #[test]
    fn test_update_without_assignments_is_rejected() {
        let err = Update::table("users").set_raw("").build().unwrap_err();
        assert!(matches!(err, PdoRsError::InvalidStatement(_)));
    }

    #[test]
    fn test_set_placeholder_avoids_where_names() {
        let stmt = Update::table("users")
            .set("id", 5)
            .where_(WhereClause::raw_bound("id = :id", [("id", 7)]))
            .build()
            .unwrap();

        assert_eq!(stmt.text, "UPDATE users SET id = :id_2 WHERE id = :id");
        assert_eq!(stmt.bindings.get("id_2"), Some(&SqlValue::Int32(5)));
        assert_eq!(stmt.bindings.get("id"), Some(&SqlValue::Int32(7)));

        let (sql, params) = stmt.to_positional(crate::types::PlaceholderStyle::Dollar).unwrap();
        assert_eq!(sql, "UPDATE users SET id = $1 WHERE id = $2");
        assert_eq!(params, vec![SqlValue::Int32(5), SqlValue::Int32(7)]);
    }
}
