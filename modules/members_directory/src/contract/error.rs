use thiserror::Error;

use crate::contract::model::MemberId;

/// Failures reported by a [`DirectoryGateway`](crate::client::DirectoryGateway).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Member not found: {id}")]
    NotFound { id: MemberId },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Server responded with HTTP {status}")]
    Server { status: u16 },

    #[error("Malformed response: {message}")]
    Decode { message: String },
}

impl GatewayError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn not_found(id: MemberId) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn server(status: u16) -> Self {
        Self::Server { status }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
