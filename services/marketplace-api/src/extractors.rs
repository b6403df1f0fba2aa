//! Request metadata extractors

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts, OriginalUri};
use axum::http::header;
use axum::http::request::Parts;
use bazaar_auth_core::LoginMeta;

/// Where a login attempt came from, for the audit trail.
///
/// Never rejects: a missing peer address or `User-Agent` is simply recorded
/// as absent.
#[derive(Debug, Clone)]
pub struct ClientMeta(pub LoginMeta);

impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Nested routers strip their prefix from `parts.uri`
        let route = parts
            .extensions
            .get::<OriginalUri>()
            .map_or_else(|| parts.uri.path(), |uri| uri.0.path())
            .to_string();

        let ip_address = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip().to_string());

        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Ok(Self(LoginMeta {
            route,
            ip_address,
            user_agent,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use bazaar_auth_core::ConnectionOrigin;

    async fn extract(req: Request<()>) -> LoginMeta {
        let (mut parts, _) = req.into_parts();
        let ClientMeta(meta) = ClientMeta::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        meta
    }

    #[tokio::test]
    async fn test_full_metadata() {
        let mut req = Request::builder()
            .uri("/login")
            .header(header::USER_AGENT, "Mozilla/5.0 (iPhone) Mobile/15E148")
            .body(())
            .unwrap();
        req.extensions_mut()
            .insert(OriginalUri("/api/user/login".parse().unwrap()));
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 7], 51234))));

        let meta = extract(req).await;
        assert_eq!(meta.route, "/api/user/login");
        assert_eq!(meta.ip_address.as_deref(), Some("10.0.0.7"));
        assert_eq!(meta.origin(), ConnectionOrigin::Mobile);
    }

    #[tokio::test]
    async fn test_bare_request() {
        let req = Request::builder().uri("/login").body(()).unwrap();
        let meta = extract(req).await;
        assert_eq!(meta.route, "/login");
        assert_eq!(meta.ip_address, None);
        assert_eq!(meta.origin(), ConnectionOrigin::Web);
    }
}
