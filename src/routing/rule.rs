//! Command rule definition.
//!
//! # Responsibilities
//! - Compile a rule's pattern once, at registration time
//! - Carry the rule's name, description and registration order
//! - Extract named capture groups from a matching message
//!
//! # Design Decisions
//! - A pattern that fails to compile fails registration, never a live message
//! - Matching uses search semantics; anchoring is a per-pattern property
//!   (`\z` where the author wants end-of-input)
//! - Only participating capture groups land in the extracted parameters, so
//!   an omitted optional group is absent rather than empty

use regex::Regex;

use crate::routing::params::Params;

/// A named, ordered pattern-to-action binding.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    source: String,
    name: String,
    description: String,
    order: usize,
}

impl Rule {
    /// Compile a rule. The registry assigns `order`.
    pub(crate) fn compile(
        pattern: &str,
        name: &str,
        description: &str,
        order: usize,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            source: pattern.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            order,
        })
    }

    /// Unique identifier within the owning registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description, used for help output.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The pattern exactly as registered.
    pub fn pattern(&self) -> &str {
        &self.source
    }

    /// Registration sequence number, strictly increasing within a registry.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Match `text` and extract the participating named groups.
    ///
    /// Returns `None` when the rule does not match at all.
    pub fn extract(&self, text: &str) -> Option<Params> {
        let caps = self.pattern.captures(text)?;
        let mut params = Params::default();
        for name in self.pattern.capture_names().flatten() {
            if let Some(m) = caps.name(name) {
                params.insert(name, m.as_str());
            }
        }
        Some(params)
    }
}
