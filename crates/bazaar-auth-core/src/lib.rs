//! Bazaar Auth Core - Authentication and authorization logic
//!
//! Three trust domains (user, admin, superadmin) share one request pipeline
//! but never each other's tokens, subjects or keys:
//!
//! - [`TokenCodec`] mints and verifies domain-scoped signed tokens
//! - [`PrincipalResolver`] turns a bearer token into a [`Principal`](bazaar_types::Principal)
//! - [`CapabilityGate`] evaluates [`Capability`] requirements before an operation runs
//! - [`SessionIssuer`] checks credentials and issues tokens at login

pub mod account;
pub mod audit;
pub mod config;
pub mod crypto;
pub mod error;
pub mod gate;
pub mod password;
pub mod resolver;
pub mod service;
pub mod session;
pub mod subject;
pub mod token;

pub use account::{AccountError, AccountManager, NewSuperAdmin, NewUser};
pub use audit::{ConnectionOrigin, LoginAudit, LoginMeta};
pub use config::AuthConfig;
pub use crypto::{constant_time_eq, KeyError, SigningKey, SigningKeys};
pub use error::{AuthError, Denial, LoginError, TokenError};
pub use gate::{Capability, CapabilityGate};
pub use password::{
    hash_password, validate_new_password, verify_password, PasswordError, MIN_PASSWORD_LENGTH,
};
pub use resolver::PrincipalResolver;
pub use service::AuthService;
pub use session::{Credential, IssuedSession, SessionIssuer};
pub use subject::{Subject, SubjectStore, SubjectStores, SuperAdminSubjects, UserSubjects};
pub use token::{ClaimSet, IssuedToken, SuperAdminClaims, TokenCodec, UserClaims};
