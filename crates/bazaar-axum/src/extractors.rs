//! Axum extractors for the resolved caller.
//!
//! # Usage
//!
//! ```ignore
//! use bazaar_axum::Caller;
//!
//! async fn handler(caller: Caller) -> String {
//!     match caller.principal().id() {
//!         Some(id) => format!("Hello, {id}!"),
//!         None => "Hello, guest!".to_string(),
//!     }
//! }
//! ```

use std::ops::Deref;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::context::RequestContext;
use crate::error::AuthRejection;

/// The request's [`RequestContext`].
///
/// Anonymous callers extract successfully; whether they may proceed is the
/// capability gate's decision. Fails only when the route has no
/// `PrincipalLayer`.
#[derive(Debug, Clone)]
pub struct Caller(pub RequestContext);

impl Deref for Caller {
    type Target = RequestContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(Self)
            .ok_or(AuthRejection::MissingContext)
    }
}
