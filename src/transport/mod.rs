//! Transport adapters.
//!
//! # Design Decisions
//! - The transport owns the wire: the routing core never reads input or
//!   prints output; it only sees `IncomingMessage` and returns
//!   `DispatchOutcome`
//! - One dispatch task per message, so a slow action never blocks the next
//!   message

pub mod shell;

pub use shell::ShellAdapter;
