//! GitHub API collaborator.
//!
//! # Data Flow
//! ```text
//! action (extracted command parameters + sender token)
//!     → client.rs (build request, bearer auth, timeout)
//!     → GitHub REST API
//!     → types.rs (deserialize response, map API failures)
//!     → Return: typed payload or GithubError
//! ```
//!
//! # Design Decisions
//! - Every call authenticates with the sender's own token; the client holds
//!   no credentials of its own
//! - The API root is derived once at construction (github.com or an
//!   enterprise base URL) and validated there
//! - Non-2xx responses become typed errors carrying the API's message

pub mod client;
pub mod types;

pub use client::Client;
pub use types::{BranchRef, GithubError, GithubResult, RepoRef};
