//! Tower middleware that attaches the resolved principal to each request.
//!
//! One [`PrincipalLayer`] is installed per trust-domain router. It reads the
//! `Authorization` header, resolves it against that domain only and inserts a
//! [`RequestContext`] into the request extensions before calling the inner
//! service exactly once. It never produces a response of its own.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};

use axum::http::{header, HeaderMap, Request};
use bazaar_auth_core::PrincipalResolver;
use bazaar_types::{Principal, TrustDomain};
use futures::future::BoxFuture;
use pin_project_lite::pin_project;
use tower::{Layer, Service};

use crate::context::RequestContext;

/// Accepted credential prefixes, matched case-sensitively.
const TOKEN_PREFIXES: [&str; 2] = ["Bearer ", "JWT "];

/// Extract the raw token from an `Authorization` header.
///
/// Returns `None` when the header is absent, not valid UTF-8, carries an
/// unknown scheme or an empty token.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    TOKEN_PREFIXES
        .iter()
        .find_map(|prefix| value.strip_prefix(prefix))
        .filter(|token| !token.is_empty())
}

/// Tower layer binding a router to one trust domain.
#[derive(Clone)]
pub struct PrincipalLayer {
    resolver: Arc<PrincipalResolver>,
    domain: TrustDomain,
}

impl PrincipalLayer {
    #[must_use]
    pub fn new(resolver: Arc<PrincipalResolver>, domain: TrustDomain) -> Self {
        Self { resolver, domain }
    }
}

impl<S> Layer<S> for PrincipalLayer {
    type Service = PrincipalService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PrincipalService {
            inner,
            resolver: Arc::clone(&self.resolver),
            domain: self.domain,
        }
    }
}

/// Service produced by [`PrincipalLayer`].
#[derive(Clone)]
pub struct PrincipalService<S> {
    inner: S,
    resolver: Arc<PrincipalResolver>,
    domain: TrustDomain,
}

impl<S, B> Service<Request<B>> for PrincipalService<S>
where
    S: Service<Request<B>> + Clone + Send + 'static,
    S::Future: Send,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = PrincipalFuture<S, B>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let token = bearer_token(req.headers()).map(str::to_owned);
        let resolver = Arc::clone(&self.resolver);
        let domain = self.domain;

        let resolving: BoxFuture<'static, Principal> = Box::pin(async move {
            resolver.resolve_credential(token.as_deref(), domain).await
        });

        // Keep the instance that was driven to readiness
        let clone = self.inner.clone();
        let inner = std::mem::replace(&mut self.inner, clone);

        PrincipalFuture {
            state: State::Resolving {
                resolving,
                inner: Some(inner),
                req: Some(req),
                domain,
            },
        }
    }
}

pin_project! {
    /// Future for [`PrincipalService`].
    pub struct PrincipalFuture<S, B>
    where
        S: Service<Request<B>>,
    {
        #[pin]
        state: State<S, B>,
    }
}

pin_project! {
    #[project = StateProj]
    enum State<S, B>
    where
        S: Service<Request<B>>,
    {
        Resolving {
            resolving: BoxFuture<'static, Principal>,
            inner: Option<S>,
            req: Option<Request<B>>,
            domain: TrustDomain,
        },
        Calling {
            #[pin]
            future: S::Future,
        },
    }
}

impl<S, B> Future for PrincipalFuture<S, B>
where
    S: Service<Request<B>>,
{
    type Output = Result<S::Response, S::Error>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        loop {
            let this = self.as_mut().project();

            match this.state.project() {
                StateProj::Resolving {
                    resolving,
                    inner,
                    req,
                    domain,
                } => {
                    let principal = ready!(resolving.as_mut().poll(cx));
                    let (Some(mut service), Some(mut request)) = (inner.take(), req.take()) else {
                        panic!("polled after completion");
                    };

                    tracing::debug!(domain = %domain, principal = principal.kind(), "Resolved caller");
                    request
                        .extensions_mut()
                        .insert(RequestContext::new(*domain, principal));

                    let future = service.call(request);
                    self.as_mut()
                        .project()
                        .state
                        .set(State::Calling { future });
                }
                StateProj::Calling { future } => {
                    return future.poll(cx);
                }
            }
        }
    }
}
