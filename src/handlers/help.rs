//! Command listing.

use async_trait::async_trait;

use crate::handlers::{Action, ActionError, Reply};
use crate::routing::{MessageContext, Params, RuleRegistry};

/// Answers "what commands exist" from the registry's descriptions.
///
/// The text is rendered once, when the command table is frozen; the registry
/// does not change afterward.
pub struct Help {
    text: String,
}

impl Help {
    /// Render help from everything registered so far, plus the help entry
    /// itself (which is registered after this renders).
    pub fn from_registry(registry: &RuleRegistry) -> Self {
        let mut lines: Vec<String> = registry
            .describe()
            .map(|(name, description)| format!("{name} - {description}"))
            .collect();
        lines.push("help - List all commands".to_string());
        Self {
            text: lines.join("\n"),
        }
    }
}

#[async_trait]
impl Action for Help {
    async fn call(&self, _params: &Params, _ctx: &MessageContext) -> Result<Reply, ActionError> {
        Ok(Some(self.text.clone()))
    }
}
