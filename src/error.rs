//! Error types for the telemetry bridge.
//!
//! Nothing here escapes the manager's public surface: every failure is
//! absorbed locally with a log line and a safe default (discard the event,
//! or auto-unbind the stale id). The one fallible public call is
//! [`crate::host::VariableKind::parse`], which rejects malformed variable
//! kinds at construction time.

use crate::types::VariableId;
use thiserror::Error;

/// Main error type for bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Value update for a topic with no live entry. Expected under normal
    /// unbind races.
    #[error("update for unbound topic: {0}")]
    UnknownTopic(String),

    /// A bound variable id no longer resolves in the host engine.
    #[error("bound variable no longer exists: {0}")]
    StaleVariable(VariableId),

    /// A value update arrived before any execution target exists.
    #[error("no active execution target")]
    NoActiveTarget,

    /// Variable kind is not one of the supported kinds.
    #[error("invalid variable kind: {0}")]
    InvalidVariableType(String),
}

/// Result type for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
