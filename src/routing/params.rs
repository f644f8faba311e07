//! Extracted command parameters.

use std::collections::HashMap;

use thiserror::Error;

/// Returned by [`Params::require`] when a mandatory group is missing.
#[derive(Debug, Error)]
#[error("missing required parameter '{0}'")]
pub struct MissingParam(pub String);

/// Mapping from capture-group name to matched substring, built fresh for
/// each dispatch and handed to the bound action for the duration of its
/// call.
///
/// A group that did not participate in the match is absent from the mapping,
/// which is distinct from a group that matched the empty string.
#[derive(Debug, Default, Clone)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    pub(crate) fn insert(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    /// Look up an optional group. `None` means the group did not participate.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Look up a group the pattern guarantees when it matches.
    pub fn require(&self, name: &str) -> Result<&str, MissingParam> {
        self.get(name).ok_or_else(|| MissingParam(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_is_not_empty() {
        let mut params = Params::default();
        params.insert("title", "");

        assert_eq!(params.get("title"), Some(""));
        assert_eq!(params.get("description"), None);
        assert!(params.contains("title"));
        assert!(!params.contains("description"));
    }

    #[test]
    fn require_reports_the_missing_name() {
        let params = Params::default();
        let err = params.require("repo").unwrap_err();
        assert_eq!(err.to_string(), "missing required parameter 'repo'");
    }
}
