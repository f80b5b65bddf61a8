//! # Error Types
//!
//! Errors raised by the typed primitives in this crate. Validation of raw
//! JSON never produces these; see `bse-schema` for structured violations.

use thiserror::Error;

/// Top-level error type for `bse-core`.
#[derive(Error, Debug)]
pub enum BseError {
    /// A string did not name any basis set role.
    #[error("unknown basis set role: {0:?}")]
    UnknownRole(String),

    /// A string did not name any auxiliary (fitting) role.
    #[error("unknown auxiliary role: {0:?}")]
    UnknownAuxiliaryRole(String),

    /// The orbital role has no auxiliary counterpart.
    #[error("role '{0}' is not an auxiliary role")]
    NotAnAuxiliaryRole(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
