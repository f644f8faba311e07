//! Per-sender credential storage.
//!
//! # Design Decisions
//! - Tokens are keyed by the transport's sender identity; the routing core
//!   never sees them
//! - Concurrent map, no global lock; persistence is optional and best-effort

pub mod store;

pub use store::TokenStore;
