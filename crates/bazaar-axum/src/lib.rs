//! Bazaar Axum Integration
//!
//! Middleware and extractors that bind a router to one trust domain.
//!
//! # Overview
//!
//! - [`PrincipalLayer`] reads the `Authorization` header once per request,
//!   resolves it for its domain and stores a [`RequestContext`] in the
//!   request extensions. It never rejects a request.
//! - [`Caller`] hands that context to handlers.
//! - [`AuthRejection`] renders denials as JSON error responses.
//!
//! # Quick Start
//!
//! ```ignore
//! use bazaar_axum::{Caller, PrincipalLayer};
//! use bazaar_types::TrustDomain;
//! use axum::{Router, routing::get};
//!
//! async fn whoami(caller: Caller) -> String {
//!     caller.principal().kind().to_string()
//! }
//!
//! let app = Router::new()
//!     .route("/me", get(whoami))
//!     .layer(PrincipalLayer::new(resolver, TrustDomain::User));
//! ```

pub mod context;
pub mod error;
pub mod extractors;
pub mod layer;

// Re-export primary types
pub use context::RequestContext;
pub use error::{AuthRejection, ErrorBody, ErrorDetail};
pub use extractors::Caller;
pub use layer::{bearer_token, PrincipalLayer, PrincipalService};
