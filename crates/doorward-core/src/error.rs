//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A player identity token could not be parsed as a UUID.
    #[error("invalid player identity: {0}")]
    InvalidIdentity(String),

    /// A location key was empty.
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    /// No door is bound at the requested location.
    #[error("no door is bound at {0}")]
    UnknownLocation(String),

    /// A PIN candidate is not exactly four decimal digits.
    #[error("invalid PIN format: exactly 4 numeric digits are required")]
    InvalidFormat,

    /// An infrastructure error (e.g. a poisoned registry lock).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
