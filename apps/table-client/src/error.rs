use thiserror::Error;

use crate::domain::DomainError;
use crate::transport::TransportError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Invalid name: {detail}")]
    InvalidName { detail: String },
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("Replay error: {detail}")]
    Replay { detail: String },
}

impl ClientError {
    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Config { .. } => "CONFIG_ERROR",
            ClientError::InvalidName { .. } => "INVALID_NAME",
            ClientError::Transport(_) => "TRANSPORT_ERROR",
            ClientError::Domain(_) => "DOMAIN_ERROR",
            ClientError::Replay { .. } => "REPLAY_ERROR",
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        ClientError::Config {
            detail: detail.into(),
        }
    }
}
