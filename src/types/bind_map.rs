use super::SqlValue;
use crate::error::{PdoRsError, Result};

/// Ordered mapping from placeholder name (without the leading `:`) to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindMap {
    entries: Vec<(String, SqlValue)>,
}

impl BindMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` to `name`. Re-binding a name replaces the value and
    /// keeps its original position.
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<SqlValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Appends every binding of `other`, in order.
    ///
    /// A name already bound to the same value is kept as is. A name already
    /// bound to a different value is an error and leaves `self` unchanged.
    pub fn merge(&mut self, other: &BindMap) -> Result<()> {
        if let Some((name, _)) = other
            .iter()
            .find(|(name, value)| self.get(name).is_some_and(|bound| bound != *value))
        {
            return Err(PdoRsError::InvalidStatement(format!(
                ":{} is bound to two different values",
                name
            )));
        }
        for (name, value) in other.iter() {
            if !self.contains(name) {
                self.entries.push((name.to_string(), value.clone()));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<SqlValue>> FromIterator<(K, V)> for BindMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = BindMap::new();
        for (name, value) in iter {
            map.bind(name, value);
        }
        map
    }
}

/// Derives a placeholder name from a field name: characters outside
/// `[A-Za-z0-9_]` become `_`, and names for which `taken` holds get a numeric
/// suffix.
pub(crate) fn placeholder_name(field: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut base: String = field
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if base.is_empty() {
        base.push('p');
    }

    if !taken(base.as_str()) {
        return base;
    }
    (2..)
        .map(|n| format!("{}_{}", base, n))
        .find(|candidate| !taken(candidate.as_str()))
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebind_keeps_position() {
        let mut map = BindMap::new();
        map.bind("a", 1);
        map.bind("b", 2);
        map.bind("a", 3);

        let names: Vec<&str> = map.names().collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(map.get("a"), Some(&SqlValue::Int32(3)));
    }

    #[test]
    fn test_placeholder_name_sanitizes_and_dedupes() {
        let mut taken = BindMap::new();
        assert_eq!(placeholder_name("first name", |n| taken.contains(n)), "first_name");

        taken.bind("first_name", "x");
        assert_eq!(placeholder_name("first-name", |n| taken.contains(n)), "first_name_2");
        assert_eq!(placeholder_name("", |n| taken.contains(n)), "p");
    }

    #[test]
    fn test_merge_keeps_equal_values() {
        let mut map: BindMap = [("a", 1)].into_iter().collect();
        let other: BindMap = [("a", 1), ("b", 2)].into_iter().collect();

        map.merge(&other).unwrap();
        let names: Vec<&str> = map.names().collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_merge_rejects_conflicting_value() {
        let mut map: BindMap = [("id", 5)].into_iter().collect();
        let other: BindMap = [("x", 1), ("id", 7)].into_iter().collect();

        let err = map.merge(&other).unwrap_err();
        assert!(matches!(err, PdoRsError::InvalidStatement(_)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("id"), Some(&SqlValue::Int32(5)));
    }
}
