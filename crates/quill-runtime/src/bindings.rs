//! Binding table
//!
//! One flat namespace from names to values. Entries keep the order in which
//! a name was first bound; rebinding a name replaces its value in place.

use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name -> value mapping produced by processing a configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings {
    entries: IndexMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, returning the value it replaces
    pub fn define(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in binding order
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Copy with entries sorted by name
    pub fn sorted(&self) -> Bindings {
        let mut entries = self.entries.clone();
        entries.sort_keys();
        Bindings { entries }
    }
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let mut bindings = Bindings::new();
        for (name, value) in iter {
            bindings.define(name, value);
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_define_and_get() {
        let mut bindings = Bindings::new();
        assert!(bindings.define("x", Value::Integer(1)).is_none());
        assert_eq!(bindings.get("x"), Some(&Value::Integer(1)));
        assert!(bindings.contains("x"));
        assert!(!bindings.contains("y"));
    }

    #[test]
    fn test_rebinding_keeps_first_position() {
        let mut bindings = Bindings::new();
        bindings.define("a", Value::Integer(1));
        bindings.define("b", Value::Integer(2));
        let old = bindings.define("a", Value::text("again"));

        assert_eq!(old, Some(Value::Integer(1)));
        assert_eq!(bindings.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(bindings.get("a"), Some(&Value::text("again")));
        assert_eq!(bindings.len(), 2);
    }

    #[test]
    fn test_sorted_copy() {
        let bindings: Bindings = [("zeta", Value::Integer(1)), ("alpha", Value::Integer(2))]
            .into_iter()
            .collect();
        let sorted = bindings.sorted();
        assert_eq!(sorted.names().collect::<Vec<_>>(), vec!["alpha", "zeta"]);
        // source keeps binding order
        assert_eq!(bindings.names().next(), Some("zeta"));
    }
}
