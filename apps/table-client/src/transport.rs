//! Outbound side of the transport collaborator.

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

use crate::protocol::OutboundAction;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("outbound channel closed, dropped {event}")]
    Closed { event: &'static str },
}

/// Emit a named action with its payload.
pub trait Transport {
    fn emit(&mut self, action: OutboundAction) -> Result<(), TransportError>;
}

/// Sends actions to whoever holds the paired receiver.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<OutboundAction>,
}

impl ChannelTransport {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutboundAction>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Transport for ChannelTransport {
    fn emit(&mut self, action: OutboundAction) -> Result<(), TransportError> {
        let event = action.event_name();
        self.tx
            .send(action)
            .map_err(|_| TransportError::Closed { event })?;
        debug!(event, "[TRANSPORT] emitted");
        Ok(())
    }
}
