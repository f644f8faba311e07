//! Observability.
//!
//! # Design Decisions
//! - Structured logging via the tracing crate; fields, not format strings
//! - RUST_LOG always wins over the configured default level

pub mod logging;
