//! Unified error types and result handling.
//!
//! Aggregation and Local Store transitions never fail; every variant here is raised either at
//! the write boundary (validation), by the sync adapter (authentication and cross-record
//! invariants), or by the remote store itself.

use sea_orm::DbErr;
use thiserror::Error;

/// Classification of a failure reported by the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// The access rules rejected the operation (wrong owner partition, revoked token)
    PermissionDenied,
    /// Network, unavailable, or resource-exhausted conditions; the user may try again
    Transient,
    /// Anything the store reported that does not fit the other classes
    Unclassified,
}

/// A failed remote operation, carrying enough detail for the caller to classify it.
#[derive(Debug, Clone, Error)]
#[error("{kind:?}: {message}")]
pub struct RemoteError {
    /// Failure class
    pub kind: RemoteErrorKind,
    /// Message reported by the store
    pub message: String,
}

impl RemoteError {
    /// Builds a `PermissionDenied` error.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self {
            kind: RemoteErrorKind::PermissionDenied,
            message: message.into(),
        }
    }

    /// Builds a `Transient` error.
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            kind: RemoteErrorKind::Transient,
            message: message.into(),
        }
    }

    /// Builds an `Unclassified` error.
    pub fn unclassified(message: impl Into<String>) -> Self {
        Self {
            kind: RemoteErrorKind::Unclassified,
            message: message.into(),
        }
    }
}

/// Main error type for hisab operations
#[derive(Debug, Error)]
pub enum Error {
    /// A write was attempted without a live credential
    #[error("Not authenticated: sign in before changing data")]
    NotAuthenticated,

    /// Another wishlist priority type already uses this order
    #[error("Priority order {order} is already used by another priority type")]
    PriorityOrderConflict {
        /// The conflicting order value
        order: u32,
    },

    /// Refused to delete the only remaining wishlist priority type
    #[error("Cannot delete the last remaining priority type")]
    LastPriorityType,

    /// Failure reported by the remote store
    #[error("Remote store error: {0}")]
    Remote(#[from] RemoteError),

    /// Input rejected before any remote call was attempted
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// Human-readable reason
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Document (de)serialization failure at the normalization boundary
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] failure.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Returns the remote failure class, if this error came from the remote store.
    #[must_use]
    pub fn remote_kind(&self) -> Option<RemoteErrorKind> {
        match self {
            Self::Remote(remote) => Some(remote.kind),
            _ => None,
        }
    }

    /// Message suitable for showing to the user.
    ///
    /// Every failed mutation must surface as one of these; nothing fails silently.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "Please sign in to save your changes.".to_string(),
            Self::PriorityOrderConflict { order } => {
                format!("Priority order {order} is already taken. Choose a different order.")
            }
            Self::LastPriorityType => "At least one priority type must remain.".to_string(),
            Self::Remote(remote) => match remote.kind {
                RemoteErrorKind::PermissionDenied => {
                    "You do not have permission to change this data. Check the access rules for your account."
                        .to_string()
                }
                RemoteErrorKind::Transient => {
                    "The server is unavailable right now. Please try again.".to_string()
                }
                RemoteErrorKind::Unclassified => {
                    format!("Something went wrong: {}", remote.message)
                }
            },
            Self::Validation { field, message } => format!("Please check {field}: {message}"),
            Self::Config { .. } | Self::Serialization(_) | Self::Io(_) | Self::EnvVar(_) => {
                format!("Something went wrong: {self}")
            }
        }
    }
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        let remote = match &err {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => RemoteError::transient(err.to_string()),
            _ => RemoteError::unclassified(err.to_string()),
        };
        Self::Remote(remote)
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
