//! Domain-scoped signed tokens
//!
//! Tokens are HS256 JWTs. Each trust domain has its own key, its own `aud`
//! value and its own claim schema; a token is only ever decoded with the
//! schema of the domain that receives it.

use bazaar_types::{Principal, SubjectId, TrustDomain};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{AuthConfig, TokenError};

/// Claims of a regular-user token (user and admin domains)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserClaims {
    /// Subject identity reference
    pub sub: SubjectId,
    /// Kind tag, equal to the domain the token was minted for
    pub kind: TrustDomain,
    /// Audience, see [`TrustDomain::audience`]
    pub aud: String,
    pub email: String,
    pub username: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
}

/// Claims of a super-admin token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuperAdminClaims {
    pub sub: SubjectId,
    pub kind: TrustDomain,
    pub aud: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Decoded claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimSet {
    User(UserClaims),
    SuperAdmin(SuperAdminClaims),
}

impl ClaimSet {
    /// Identity reference carried by the token
    pub fn subject(&self) -> SubjectId {
        match self {
            Self::User(c) => c.sub,
            Self::SuperAdmin(c) => c.sub,
        }
    }

    /// Kind tag carried by the token
    pub fn domain(&self) -> TrustDomain {
        match self {
            Self::User(c) => c.kind,
            Self::SuperAdmin(c) => c.kind,
        }
    }

    pub fn issued_at(&self) -> i64 {
        match self {
            Self::User(c) => c.iat,
            Self::SuperAdmin(c) => c.iat,
        }
    }

    pub fn expires_at(&self) -> i64 {
        match self {
            Self::User(c) => c.exp,
            Self::SuperAdmin(c) => c.exp,
        }
    }
}

/// A freshly minted token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub domain: TrustDomain,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Token encoder/decoder.
///
/// Pure over the configured keys and the current time.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    config: AuthConfig,
}

impl TokenCodec {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Mint a token for `principal` scoped to `domain`
    pub fn encode(&self, principal: &Principal, domain: TrustDomain) -> Result<String, TokenError> {
        self.issue_at(principal, domain, Utc::now()).map(|issued| issued.token)
    }

    /// Mint a token as of `issued_at`.
    ///
    /// The principal variant must belong to the domain: regular users for
    /// user/admin, the super-admin for superadmin. Anything else (including
    /// anonymous) is refused with [`TokenError::DomainMismatch`].
    pub fn issue_at(
        &self,
        principal: &Principal,
        domain: TrustDomain,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let ttl = ChronoDuration::from_std(self.config.token_ttl(domain))
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        let expires_at = issued_at + ttl;
        let key = self.config.keys.get(domain).encoding_key();
        let header = Header::new(Algorithm::HS256);

        let token = match (principal, domain) {
            (Principal::RegularUser(user), TrustDomain::User | TrustDomain::Admin) => {
                let claims = UserClaims {
                    sub: user.id,
                    kind: domain,
                    aud: domain.audience().to_string(),
                    email: user.email.clone(),
                    username: user.username.clone(),
                    iat: issued_at.timestamp(),
                    exp: expires_at.timestamp(),
                };
                encode(&header, &claims, key)
            }
            (Principal::SuperAdmin(admin), TrustDomain::SuperAdmin) => {
                let claims = SuperAdminClaims {
                    sub: admin.id,
                    kind: domain,
                    aud: domain.audience().to_string(),
                    username: admin.username.clone(),
                    iat: issued_at.timestamp(),
                    exp: expires_at.timestamp(),
                };
                encode(&header, &claims, key)
            }
            _ => return Err(TokenError::DomainMismatch),
        }
        .map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            TokenError::Encoding(e.to_string())
        })?;

        Ok(IssuedToken {
            token,
            domain,
            issued_at,
            expires_at,
        })
    }

    /// Verify a token for `domain` and return its claims.
    ///
    /// Only the claim schema of `domain` is attempted. Signature, audience,
    /// expiry (no leeway) and the kind tag are all checked.
    pub fn decode(&self, token: &str, domain: TrustDomain) -> Result<ClaimSet, TokenError> {
        let claims = match domain {
            TrustDomain::User | TrustDomain::Admin => {
                ClaimSet::User(self.decode_as::<UserClaims>(token, domain)?)
            }
            TrustDomain::SuperAdmin => {
                ClaimSet::SuperAdmin(self.decode_as::<SuperAdminClaims>(token, domain)?)
            }
        };

        if claims.domain() != domain {
            tracing::debug!(
                expected = %domain,
                actual = %claims.domain(),
                "Token kind tag does not match endpoint domain"
            );
            return Err(TokenError::DomainMismatch);
        }

        Ok(claims)
    }

    fn decode_as<T: DeserializeOwned>(
        &self,
        token: &str,
        domain: TrustDomain,
    ) -> Result<T, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_audience(&[domain.audience()]);
        validation.set_required_spec_claims(&["exp", "iat", "sub", "aud"]);

        let key = self.config.keys.get(domain).decoding_key();
        let data = decode::<T>(token, key, &validation).map_err(|e| {
            tracing::debug!(domain = %domain, "Token validation failed: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidAudience => TokenError::DomainMismatch,
                _ => TokenError::Malformed,
            }
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SigningKey, SigningKeys};
    use bazaar_types::{RegularUser, Roles, SuperAdmin};

    fn codec() -> TokenCodec {
        TokenCodec::new(AuthConfig::new(SigningKeys::new(
            SigningKey::new([1u8; 32]).unwrap(),
            SigningKey::new([2u8; 32]).unwrap(),
            SigningKey::new([3u8; 32]).unwrap(),
        )))
    }

    fn shared_codec() -> TokenCodec {
        TokenCodec::new(AuthConfig::new(SigningKeys::shared(
            SigningKey::new([4u8; 32]).unwrap(),
        )))
    }

    fn user() -> Principal {
        Principal::RegularUser(RegularUser {
            id: SubjectId::new(),
            email: "ana@example.com".into(),
            username: "ana".into(),
            roles: Roles {
                is_staff: true,
                ..Roles::default()
            },
        })
    }

    fn superadmin() -> Principal {
        Principal::SuperAdmin(SuperAdmin {
            id: SubjectId::new(),
            username: "root".into(),
            email: "root@example.com".into(),
        })
    }

    #[test]
    fn test_roundtrip_every_domain() {
        let codec = codec();
        for (principal, domain) in [
            (user(), TrustDomain::User),
            (user(), TrustDomain::Admin),
            (superadmin(), TrustDomain::SuperAdmin),
        ] {
            let token = codec.encode(&principal, domain).unwrap();
            let claims = codec.decode(&token, domain).unwrap();
            assert_eq!(claims.subject(), principal.id().unwrap());
            assert_eq!(claims.domain(), domain);
        }
    }

    #[test]
    fn test_superadmin_lifetime_is_eight_hours() {
        let codec = codec();
        let now = Utc::now();
        let issued = codec
            .issue_at(&superadmin(), TrustDomain::SuperAdmin, now)
            .unwrap();
        assert_eq!(issued.expires_at - issued.issued_at, ChronoDuration::hours(8));

        let issued = codec.issue_at(&user(), TrustDomain::User, now).unwrap();
        assert_eq!(issued.expires_at - issued.issued_at, ChronoDuration::hours(24));
    }

    #[test]
    fn test_principal_must_match_domain() {
        let codec = codec();
        assert_eq!(
            codec.encode(&superadmin(), TrustDomain::User),
            Err(TokenError::DomainMismatch)
        );
        assert_eq!(
            codec.encode(&user(), TrustDomain::SuperAdmin),
            Err(TokenError::DomainMismatch)
        );
        assert_eq!(
            codec.encode(&Principal::Anonymous, TrustDomain::User),
            Err(TokenError::DomainMismatch)
        );
    }

    #[test]
    fn test_expired_token() {
        let codec = codec();
        let issued = codec
            .issue_at(&user(), TrustDomain::User, Utc::now() - ChronoDuration::hours(25))
            .unwrap();
        assert_eq!(
            codec.decode(&issued.token, TrustDomain::User),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_cross_domain_rejected_with_independent_keys() {
        let codec = codec();
        let token = codec.encode(&user(), TrustDomain::User).unwrap();
        assert!(codec.decode(&token, TrustDomain::Admin).is_err());
        assert!(codec.decode(&token, TrustDomain::SuperAdmin).is_err());
    }

    #[test]
    fn test_cross_domain_rejected_with_shared_key() {
        let codec = shared_codec();

        let user_token = codec.encode(&user(), TrustDomain::User).unwrap();
        assert_eq!(
            codec.decode(&user_token, TrustDomain::Admin),
            Err(TokenError::DomainMismatch)
        );

        // Super-admin claims never parse as user claims, and vice versa.
        let sa_token = codec.encode(&superadmin(), TrustDomain::SuperAdmin).unwrap();
        assert!(codec.decode(&sa_token, TrustDomain::User).is_err());
        assert!(codec.decode(&user_token, TrustDomain::SuperAdmin).is_err());
    }

    #[test]
    fn test_tampered_signature() {
        let codec = codec();
        let token = codec.encode(&user(), TrustDomain::User).unwrap();
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert_eq!(
            codec.decode(&tampered, TrustDomain::User),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = codec();
        for garbage in ["", "abc", "a.b.c", "..", "Bearer x"] {
            assert_eq!(
                codec.decode(garbage, TrustDomain::User),
                Err(TokenError::Malformed)
            );
        }
    }
}
