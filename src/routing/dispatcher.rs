//! First-match dispatch.
//!
//! # Responsibilities
//! - Walk the frozen registry in registration order
//! - Stop at the first matching rule and invoke its bound action
//! - Report an explicit outcome: handled, no match, or action failure
//!
//! # Design Decisions
//! - The action table is resolved once at build time; dispatch never looks
//!   anything up by reflection
//! - Action failures are recovered here and surfaced in the outcome; a
//!   failing action can never take down the dispatch loop
//! - Router is immutable and lock-free after `build()`; concurrent dispatch
//!   of independent messages shares nothing mutable

use std::collections::HashMap;
use std::sync::Arc;

use crate::handlers::{Action, ActionError};
use crate::routing::message::IncomingMessage;
use crate::routing::registry::{RegistryError, RuleRegistry};

/// Outcome of dispatching one message. Produced and consumed within a
/// single message-processing cycle.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// A rule matched and its action completed.
    Handled {
        rule: String,
        reply: Option<String>,
    },
    /// No rule matched. Expected and silent; the message belongs to someone
    /// else.
    NoMatch,
    /// A rule matched but its action failed. The error is opaque to the
    /// router and forwarded for user-visible reporting.
    Failed { rule: String, error: ActionError },
}

/// Registration phase of a [`Router`].
///
/// Consumed by [`build`](RouterBuilder::build); once built, no further
/// registration is possible.
#[derive(Default)]
pub struct RouterBuilder {
    registry: RuleRegistry,
    actions: HashMap<String, Arc<dyn Action>>,
}

impl RouterBuilder {
    /// Register a rule and bind its action.
    pub fn rule(
        mut self,
        pattern: &str,
        name: &str,
        description: &str,
        action: Arc<dyn Action>,
    ) -> Result<Self, RegistryError> {
        self.registry.register(pattern, name, description)?;
        self.actions.insert(name.to_string(), action);
        Ok(self)
    }

    /// Rules registered so far, for introspection during startup wiring.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Freeze the table. The transition to the serving phase is irreversible.
    pub fn build(self) -> Router {
        Router {
            registry: self.registry,
            actions: self.actions,
        }
    }
}

/// Immutable message router: a frozen rule registry plus its resolved
/// action table. Shared across tasks via `Arc`, no locks.
pub struct Router {
    registry: RuleRegistry,
    actions: HashMap<String, Arc<dyn Action>>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Match `message` against the registry in registration order and invoke
    /// the first matching rule's action.
    pub async fn dispatch(&self, message: &IncomingMessage) -> DispatchOutcome {
        for rule in self.registry.all() {
            let Some(params) = rule.extract(&message.text) else {
                continue;
            };
            tracing::debug!(
                rule = %rule.name(),
                order = rule.order(),
                sender = %message.context.sender,
                "message matched"
            );

            let Some(action) = self.actions.get(rule.name()) else {
                return DispatchOutcome::Failed {
                    rule: rule.name().to_string(),
                    error: format!("no action bound for rule '{}'", rule.name()).into(),
                };
            };

            return match action.call(&params, &message.context).await {
                Ok(reply) => DispatchOutcome::Handled {
                    rule: rule.name().to_string(),
                    reply,
                },
                Err(error) => {
                    tracing::warn!(rule = %rule.name(), error = %error, "action failed");
                    DispatchOutcome::Failed {
                        rule: rule.name().to_string(),
                        error,
                    }
                }
            };
        }

        tracing::trace!("no rule matched");
        DispatchOutcome::NoMatch
    }
}
