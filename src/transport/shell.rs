//! Shell transport adapter.
//!
//! # Responsibilities
//! - Read one message per stdin line
//! - Dispatch each message on its own task
//! - Print replies and failure reports; stay silent on NoMatch
//!
//! # Design Decisions
//! - Concurrent dispatch: messages are independent, so the reader never
//!   waits for an action to finish
//! - Shutdown stops reading; in-flight actions finish on their own

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::lifecycle::Shutdown;
use crate::routing::{DispatchOutcome, IncomingMessage, Router};

/// Line-per-message adapter over stdin/stdout.
pub struct ShellAdapter {
    router: Arc<Router>,
    sender: String,
}

impl ShellAdapter {
    /// `sender` is the identity attached to every message read here.
    pub fn new(router: Arc<Router>, sender: impl Into<String>) -> Self {
        Self {
            router,
            sender: sender.into(),
        }
    }

    /// Read messages until EOF or shutdown.
    pub async fn run(self, shutdown: &Shutdown) -> std::io::Result<()> {
        let mut stop = shutdown.subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        tracing::info!(sender = %self.sender, "shell transport ready");
        loop {
            tokio::select! {
                _ = stop.recv() => {
                    tracing::info!("shell transport stopping");
                    break;
                }
                line = lines.next_line() => {
                    match line? {
                        Some(text) => {
                            if text.trim().is_empty() {
                                continue;
                            }
                            let router = Arc::clone(&self.router);
                            let message = IncomingMessage::new(text, self.sender.clone());
                            tokio::spawn(async move {
                                match router.dispatch(&message).await {
                                    DispatchOutcome::Handled { reply: Some(reply), .. } => {
                                        println!("{reply}");
                                    }
                                    DispatchOutcome::Handled { reply: None, .. } => {}
                                    DispatchOutcome::NoMatch => {}
                                    DispatchOutcome::Failed { rule, error } => {
                                        println!("{rule} failed: {error}");
                                    }
                                }
                            });
                        }
                        None => break,
                    }
                }
            }
        }
        Ok(())
    }
}
