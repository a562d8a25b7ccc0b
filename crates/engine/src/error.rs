//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown before any network call when a precondition fails.
//! - [`Auth`] thrown for an expired or missing session token, so callers can
//!   redirect to re-authentication instead of showing a generic message.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`Auth`]: EngineError::Auth
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Authentication required: {0}")]
    Auth(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Ledger error: {0}")]
    Server(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Network(a), Self::Network(b)) => a == b,
            (Self::Auth(a), Self::Auth(b)) => a == b,
            (Self::BadRequest(a), Self::BadRequest(b)) => a == b,
            (Self::Server(a), Self::Server(b)) => a == b,
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
