//! GitHub chat-command bot library.
//!
//! # Architecture Overview
//!
//! ```text
//!   chat message        ┌───────────┐    ┌──────────┐    ┌──────────┐
//!   ──────────────────▶ │ transport │───▶│ routing  │───▶│ handlers │
//!                       │  (shell)  │    │ (rules)  │    │ (actions)│
//!                       └───────────┘    └──────────┘    └────┬─────┘
//!                                                             │
//!   reply / error report                                      ▼
//!   ◀──────────────────────────────────┌──────────────────────────────┐
//!                                      │ github client + token store  │
//!                                      └──────────────────────────────┘
//! ```
//!
//! The routing core matches each message against an ordered table of named
//! regex rules (first match wins), extracts named capture groups, and hands
//! them to the bound action. Everything downstream of that hand-off (API
//! calls, credentials, retries) belongs to the action collaborators.

pub mod commands;
pub mod config;
pub mod credentials;
pub mod github;
pub mod handlers;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod transport;

pub use config::BotConfig;
pub use lifecycle::Shutdown;
pub use routing::{DispatchOutcome, IncomingMessage, Router};
