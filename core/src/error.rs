//! Error types for the consumption API client.
//!
//! # Design
//! Every failure the UI can observe collapses to one display string, but the
//! variant is kept so callers that care (logging, retry affordances) can
//! still tell a server-reported error from a dead connection.

use thiserror::Error;

/// Message shown when no response was received at all.
pub const CONNECTIVITY_MESSAGE: &str = "could not connect to the server";

/// Errors produced while building, executing, or parsing API requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// The request never got a response (refused, DNS, timeout, reset).
    #[error("{}", CONNECTIVITY_MESSAGE)]
    Connectivity { reason: String },

    /// The request could not be constructed locally.
    #[error("{message}")]
    Local { message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        ApiError::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn connectivity(reason: impl Into<String>) -> Self {
        ApiError::Connectivity {
            reason: reason.into(),
        }
    }

    pub fn local(message: impl Into<String>) -> Self {
        ApiError::Local {
            message: message.into(),
        }
    }

    /// HTTP status for `Remote` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
