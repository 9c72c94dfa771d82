//! Error types for request dispatch failures.
//!
//! Every variant ends up as the `exception` text of a failed envelope, so the
//! messages are written for the remote caller rather than the operator.

use thiserror::Error;

use crate::target::CallError;

/// Errors surfaced while interpreting and executing a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The decoded line is not a usable request mapping.
    #[error("malformed request: {message}")]
    MalformedRequest { message: String },

    /// The `action` field names no known action.
    #[error("Unknown action: {action}")]
    UnknownAction { action: String },

    /// The method body panicked.
    #[error("method '{name}' panicked")]
    Panicked { name: String },

    /// Method lookup, argument binding, or the method itself failed.
    #[error(transparent)]
    Call(#[from] CallError),
}

impl DispatchError {
    /// Creates a malformed request error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
        }
    }

    /// Creates an unknown action error.
    pub fn unknown_action(action: impl Into<String>) -> Self {
        Self::UnknownAction {
            action: action.into(),
        }
    }

    /// Creates a panicked-method error.
    pub fn panicked(name: impl Into<String>) -> Self {
        Self::Panicked { name: name.into() }
    }
}
