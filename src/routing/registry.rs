//! Rule registration and enumeration.
//!
//! # Responsibilities
//! - Compile and append rules during the registration phase
//! - Reject duplicate rule names without mutating the registry
//! - Enumerate rules in registration order for dispatch and help output
//!
//! # Design Decisions
//! - Append-only: there is no removal, and order values are never reassigned
//! - Insertion order is semantically significant (first-match-wins tie-break)
//! - A registry is an explicitly constructed value, never ambient global
//!   state, so independent router instances cannot interfere

use std::collections::HashSet;

use thiserror::Error;

use crate::routing::rule::Rule;

/// Registration-time failures. Both are configuration bugs and fatal to
/// startup.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two rules must not share a name.
    #[error("duplicate rule name '{name}'")]
    DuplicateName { name: String },

    /// The rule's expression failed to compile.
    #[error("invalid pattern for rule '{name}': {source}")]
    BadPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// Ordered collection of [`Rule`]s for one router instance.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
    names: HashSet<String>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `pattern` and append it under `name`, assigning the next
    /// order value. On failure the registry is left unchanged.
    pub fn register(
        &mut self,
        pattern: &str,
        name: &str,
        description: &str,
    ) -> Result<(), RegistryError> {
        if self.names.contains(name) {
            return Err(RegistryError::DuplicateName {
                name: name.to_string(),
            });
        }
        let rule = Rule::compile(pattern, name, description, self.rules.len()).map_err(
            |source| RegistryError::BadPattern {
                name: name.to_string(),
                source,
            },
        )?;
        self.names.insert(name.to_string());
        self.rules.push(rule);
        Ok(())
    }

    /// Rules in registration order. Re-iterable; never mutates.
    pub fn all(&self) -> impl Iterator<Item = &Rule> + '_ {
        self.rules.iter()
    }

    /// `(name, description)` pairs in registration order, for help output.
    pub fn describe(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.rules.iter().map(|r| (r.name(), r.description()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_strictly_increasing_order() {
        let mut registry = RuleRegistry::new();
        registry.register("a", "first", "").unwrap();
        registry.register("b", "second", "").unwrap();
        registry.register("c", "third", "").unwrap();

        let orders: Vec<usize> = registry.all().map(Rule::order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn duplicate_name_leaves_registry_unchanged() {
        let mut registry = RuleRegistry::new();
        registry.register("a", "ping", "first").unwrap();

        let err = registry.register("b", "ping", "second").unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName { .. }));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.all().next().unwrap().pattern(), "a");
    }

    #[test]
    fn bad_pattern_leaves_registry_unchanged() {
        let mut registry = RuleRegistry::new();
        let err = registry.register(r"broken(", "broken", "").unwrap_err();
        assert!(matches!(err, RegistryError::BadPattern { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn describe_preserves_registration_order() {
        let mut registry = RuleRegistry::new();
        registry.register("a", "one", "first rule").unwrap();
        registry.register("b", "two", "second rule").unwrap();

        let described: Vec<(&str, &str)> = registry.describe().collect();
        assert_eq!(described, vec![("one", "first rule"), ("two", "second rule")]);
    }

    #[test]
    fn all_is_restartable() {
        let mut registry = RuleRegistry::new();
        registry.register("a", "one", "").unwrap();

        assert_eq!(registry.all().count(), 1);
        assert_eq!(registry.all().count(), 1);
    }
}
