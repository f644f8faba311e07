//! OS signal wiring.

use std::sync::Arc;

use crate::lifecycle::Shutdown;

/// Spawn a task that trips the shutdown coordinator on ctrl-c.
pub fn spawn_ctrl_c_listener(shutdown: Arc<Shutdown>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("ctrl-c received, shutting down");
                shutdown.trigger();
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
        }
    });
}
