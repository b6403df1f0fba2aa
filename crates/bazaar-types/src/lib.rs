//! Bazaar Types - Shared domain types
//!
//! This crate contains the identity types used across Bazaar crates:
//! - Subject identifiers
//! - Trust domains (user, admin, superadmin)
//! - Resolved principals and their roles

pub mod domain;
pub mod error;
pub mod principal;
pub mod subject;

pub use domain::*;
pub use error::*;
pub use principal::*;
pub use subject::*;
