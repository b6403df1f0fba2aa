//! Common error types

use thiserror::Error;

/// Errors raised while parsing shared domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Unknown trust domain name
    #[error("unknown trust domain: {0}")]
    UnknownDomain(String),
}
