//! Router assembly
//!
//! Each trust domain is a nested router with its own `PrincipalLayer`, so a
//! token is only ever resolved against the domain whose path it arrived on.

use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use bazaar_axum::PrincipalLayer;
use bazaar_db::{SuperAdminRepository, UserRepository};
use bazaar_types::TrustDomain;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, admin, superadmin, user};
use crate::state::AppState;

/// Build the full application router
pub fn build_router<U, S>(state: AppState<U, S>) -> Router
where
    U: UserRepository + 'static,
    S: SuperAdminRepository + 'static,
{
    let user_routes = Router::new()
        .route("/register", post(user::register::<U, S>))
        .route("/me", get(user::me::<U, S>))
        .route("/seller", post(user::activate_seller::<U, S>))
        .route("/password", post(user::change_password::<U, S>));

    let admin_routes = Router::new()
        .route("/me", get(admin::me::<U, S>))
        .route("/users/{id}/roles", post(admin::set_user_roles::<U, S>))
        .route("/users/{id}/password", post(admin::change_user_password::<U, S>));

    let superadmin_routes = Router::new()
        .route("/bootstrap", post(superadmin::bootstrap::<U, S>))
        .route("/me", get(superadmin::me::<U, S>))
        .route("/superadmins", get(superadmin::list::<U, S>));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready::<U, S>))
        .nest("/api/user", domain_router(&state, TrustDomain::User, user_routes))
        .nest("/api/admin", domain_router(&state, TrustDomain::Admin, admin_routes))
        .nest(
            "/api/superadmin",
            domain_router(&state, TrustDomain::SuperAdmin, superadmin_routes),
        )
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Add the shared endpoints and bind the router to `domain`
fn domain_router<U, S>(
    state: &AppState<U, S>,
    domain: TrustDomain,
    routes: Router<AppState<U, S>>,
) -> Router<AppState<U, S>>
where
    U: UserRepository + 'static,
    S: SuperAdminRepository + 'static,
{
    let resolver = Arc::new(state.auth.resolver().clone());

    routes
        .route("/login", post(handlers::login::<U, S>))
        .route("/authorize", post(handlers::authorize::<U, S>))
        .layer(PrincipalLayer::new(resolver, domain))
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
