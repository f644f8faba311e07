//! Message routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming chat message (raw text + origin context)
//!     → dispatcher.rs (iterate rules in registration order)
//!     → rule.rs (regex match, named-capture extraction)
//!     → first match wins → bound action invoked with Params
//!     → Return: Handled reply, NoMatch, or Failed
//!
//! Rule compilation (at startup):
//!     pattern table
//!     → registry.rs (compile, assign order, reject duplicate names)
//!     → RouterBuilder::build() freezes the table
//! ```
//!
//! # Design Decisions
//! - Patterns compiled at registration, immutable once the router is built
//! - First match wins; registration order is the only tie-break
//! - Deterministic: same registry and text always select the same rule
//! - Explicit NoMatch rather than an error (other listeners may share the
//!   same input stream)

pub mod dispatcher;
pub mod message;
pub mod params;
pub mod registry;
pub mod rule;

pub use dispatcher::{DispatchOutcome, Router, RouterBuilder};
pub use message::{IncomingMessage, MessageContext};
pub use params::{MissingParam, Params};
pub use registry::{RegistryError, RuleRegistry};
pub use rule::Rule;
