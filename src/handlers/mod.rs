//! Command actions.
//!
//! One action per registered rule. The routing core resolves the `name →
//! action` binding once at startup and only ever sees the opaque result;
//! side effects (GitHub API calls, credential lookups) all live here.

use async_trait::async_trait;

use crate::routing::{MessageContext, Params};

pub mod branches;
pub mod diffs;
pub mod help;
pub mod issues;
pub mod pull_requests;
pub mod releases;
pub mod remember;

/// Opaque failure raised by an action. The routing core forwards it to the
/// transport without inspecting it.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Reply text produced by a successful action, if any.
pub type Reply = Option<String>;

/// The capability every bound action implements: accept the extracted
/// parameters plus message context, return a reply or a reportable failure.
#[async_trait]
pub trait Action: Send + Sync {
    async fn call(&self, params: &Params, ctx: &MessageContext) -> Result<Reply, ActionError>;
}

/// Reply sent when a GitHub action runs for a sender with no stored token.
/// A coaching line, not a failure.
pub const UNKNOWN_TOKEN_REPLY: &str =
    "I don't know your GitHub token. Teach me with `remember my github token <token>`";
