//! Trust domain types

use serde::{Deserialize, Serialize};

use crate::TypeError;

/// One of the three disjoint identity universes.
///
/// Every endpoint belongs to exactly one domain and only accepts tokens
/// minted for that domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustDomain {
    /// Regular marketplace users (buyers and sellers)
    User,
    /// Staff back office, backed by the regular user store
    Admin,
    /// The single super-administrator, with its own credential store
    SuperAdmin,
}

impl TrustDomain {
    /// All domains, in pipeline order
    pub const ALL: [TrustDomain; 3] = [Self::User, Self::Admin, Self::SuperAdmin];

    /// Audience claim carried by tokens of this domain
    pub const fn audience(&self) -> &'static str {
        match self {
            Self::User => "bazaar:user",
            Self::Admin => "bazaar:admin",
            Self::SuperAdmin => "bazaar:superadmin",
        }
    }

    /// Default token lifetime in hours
    pub const fn default_ttl_hours(&self) -> u32 {
        match self {
            Self::User | Self::Admin => 24,
            Self::SuperAdmin => 8,
        }
    }

    /// Whether subjects of this domain come from the regular user store
    pub const fn uses_user_store(&self) -> bool {
        matches!(self, Self::User | Self::Admin)
    }
}

impl std::fmt::Display for TrustDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
            Self::SuperAdmin => write!(f, "superadmin"),
        }
    }
}

impl std::str::FromStr for TrustDomain {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::SuperAdmin),
            other => Err(TypeError::UnknownDomain(other.to_string())),
        }
    }
}
