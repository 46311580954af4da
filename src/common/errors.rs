//! # Error Taxonomy
//!
//! Collaborators (RPC connections, file sessions) fail with plain
//! [`anyhow::Error`] values. Each client converts those into one of the
//! domain errors below at the call boundary, exactly once, using
//! [`describe_failure`].
//!
//! - [`SigningError`]: validation, connection and remote-call failures of the
//!   signing client
//! - [`TransferError`]: connect, not-found and session failures of the
//!   transfer client

use std::fmt;
use thiserror::Error;

/// Renders a collaborator failure, including its context chain.
pub fn describe_failure(err: &anyhow::Error) -> String {
    let message = format!("{:#}", err);
    if message.trim().is_empty() {
        "unknown error".to_string()
    } else {
        message
    }
}

/// Errors raised by the signing client.
#[derive(Debug, Error)]
pub enum SigningError {
    /// Mandatory identity parameters were absent from both input and config.
    #[error(
        "ERROR: The following parameters must be provided either in configuration or input: {}",
        .missing.join(", ")
    )]
    Validation { missing: Vec<&'static str> },

    /// The remote connection could not be created.
    #[error("Failed to initialize RPC client: {0}")]
    Connection(String),

    /// The remote call failed in transport or returned a failure status.
    #[error("{operation} failed: {reason}")]
    RemoteCall {
        operation: &'static str,
        reason: RemoteFailure,
    },
}

impl SigningError {
    pub fn remote(operation: &'static str, reason: RemoteFailure) -> Self {
        SigningError::RemoteCall { operation, reason }
    }

    /// Human names of the missing parameters, empty for other kinds.
    pub fn missing_parameters(&self) -> &[&'static str] {
        match self {
            SigningError::Validation { missing } => missing,
            _ => &[],
        }
    }

    /// Status code of a domain failure, if this error carries one.
    pub fn status_code(&self) -> Option<&str> {
        match self {
            SigningError::RemoteCall {
                reason: RemoteFailure::Status { code, .. },
                ..
            } => Some(code),
            _ => None,
        }
    }
}

/// Why a remote call failed after the connection was established.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteFailure {
    #[error("RPC request failed: {0}")]
    Transport(String),

    #[error("{message} (Code: {code})")]
    Status { code: String, message: String },

    #[error("unexpected response: {0}")]
    MalformedResponse(String),

    #[error("could not encode request: {0}")]
    InvalidRequest(String),
}

/// The file operation a [`TransferError`] occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferAction {
    Upload,
    Download,
    Delete,
}

impl fmt::Display for TransferAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            TransferAction::Upload => "upload",
            TransferAction::Download => "download",
            TransferAction::Delete => "delete",
        };
        f.write_str(verb)
    }
}

/// Root cause of a [`TransferError`], for programmatic branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferErrorKind {
    Connect,
    NotFound,
    Session,
}

/// Errors raised by the transfer client.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Failed to connect to SFTP server: {0}")]
    Connect(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Session(String),

    /// Any of the above, prefixed with the operation it interrupted.
    #[error("Failed to {action} file: {cause}")]
    Failed {
        action: TransferAction,
        cause: Box<TransferError>,
    },
}

impl TransferError {
    pub fn failed(action: TransferAction, cause: TransferError) -> Self {
        match cause {
            already @ TransferError::Failed { .. } => already,
            cause => TransferError::Failed {
                action,
                cause: Box::new(cause),
            },
        }
    }

    pub fn kind(&self) -> TransferErrorKind {
        match self {
            TransferError::Connect(_) => TransferErrorKind::Connect,
            TransferError::NotFound(_) => TransferErrorKind::NotFound,
            TransferError::Session(_) => TransferErrorKind::Session,
            TransferError::Failed { cause, .. } => cause.kind(),
        }
    }

    pub fn action(&self) -> Option<TransferAction> {
        match self {
            TransferError::Failed { action, .. } => Some(*action),
            _ => None,
        }
    }
}
