//! Error types for event listening and notification dispatch

use thiserror::Error;

/// Errors that can occur while attaching listeners and handling events
#[derive(Error, Debug)]
pub enum ListenerError {
    /// No declaration for the requested event in the ABI
    #[error("No declaration for event '{event}' in ABI type '{abi}'")]
    DeclarationNotFound { event: String, abi: String },

    /// Event declaration could not be parsed
    #[error("Invalid declaration for event '{event}': {reason}")]
    InvalidDeclaration { event: String, reason: String },

    /// Log could not be decoded against the event ABI
    #[error("Failed to decode '{event}' log from contract '{contract}': {reason}")]
    DecodingError {
        event: String,
        contract: String,
        reason: String,
    },
}

/// Result type for listener operations
pub type Result<T> = std::result::Result<T, ListenerError>;

/// Errors that can occur delivering a notification
#[derive(Error, Debug)]
pub enum DispatchError {
    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("Webhook returned error status {0}")]
    Status(u16),
}

impl DispatchError {
    /// Short label for the failure counter
    pub fn reason_label(&self) -> &'static str {
        match self {
            DispatchError::Http(e) if e.is_timeout() => "timeout",
            DispatchError::Http(e) if e.is_connect() => "connect",
            DispatchError::Http(_) => "http",
            DispatchError::Status(_) => "status",
        }
    }
}
