//! Incoming message model.

/// Where a message came from.
///
/// The routing core passes this through to the bound action untouched; only
/// actions and the transport interpret it.
#[derive(Debug, Clone)]
pub struct MessageContext {
    /// Transport-level sender identity. Keys per-sender credentials.
    pub sender: String,
}

/// One chat message as delivered by the transport.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Raw message text. May span multiple lines.
    pub text: String,
    pub context: MessageContext,
}

impl IncomingMessage {
    pub fn new(text: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: MessageContext {
                sender: sender.into(),
            },
        }
    }
}
