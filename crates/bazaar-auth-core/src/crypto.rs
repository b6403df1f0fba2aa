//! Signing key material
//!
//! Each trust domain owns its own HMAC key so that a leaked key only lets an
//! attacker forge tokens for that one domain.

use bazaar_types::TrustDomain;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::sync::Arc;

/// Pre-computed HS256 key for one trust domain.
///
/// The raw bytes are kept only for the shared-key check and never printed.
#[derive(Clone)]
pub struct SigningKey {
    key_bytes: Arc<[u8]>,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    /// Minimum allowed key length in bytes (256 bits)
    pub const MIN_KEY_LENGTH: usize = 32;

    /// Create a new signing key from bytes.
    ///
    /// # Errors
    /// Returns error if key is too short (less than 32 bytes).
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, KeyError> {
        let key_bytes = key.as_ref();
        if key_bytes.len() < Self::MIN_KEY_LENGTH {
            return Err(KeyError::KeyTooShort {
                actual: key_bytes.len(),
                minimum: Self::MIN_KEY_LENGTH,
            });
        }
        Ok(Self {
            key_bytes: Arc::from(key_bytes),
            encoding: EncodingKey::from_secret(key_bytes),
            decoding: DecodingKey::from_secret(key_bytes),
        })
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }

    /// Whether two keys hold the same material (constant time)
    pub fn same_material(&self, other: &SigningKey) -> bool {
        constant_time_eq(&self.key_bytes, &other.key_bytes)
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("key_length", &self.key_bytes.len())
            .finish_non_exhaustive()
    }
}

/// Errors that can occur when creating a signing key
#[derive(Debug, Clone, thiserror::Error)]
pub enum KeyError {
    #[error("signing key too short: got {actual} bytes, need at least {minimum}")]
    KeyTooShort { actual: usize, minimum: usize },
}

/// Per-domain key map
#[derive(Debug, Clone)]
pub struct SigningKeys {
    user: SigningKey,
    admin: SigningKey,
    superadmin: SigningKey,
}

impl SigningKeys {
    /// One independent key per domain
    pub fn new(user: SigningKey, admin: SigningKey, superadmin: SigningKey) -> Self {
        Self {
            user,
            admin,
            superadmin,
        }
    }

    /// The same key for every domain.
    ///
    /// Domain separation then rests on the audience and kind claims alone.
    pub fn shared(key: SigningKey) -> Self {
        Self {
            user: key.clone(),
            admin: key.clone(),
            superadmin: key,
        }
    }

    /// Key for a domain
    pub fn get(&self, domain: TrustDomain) -> &SigningKey {
        match domain {
            TrustDomain::User => &self.user,
            TrustDomain::Admin => &self.admin,
            TrustDomain::SuperAdmin => &self.superadmin,
        }
    }

    /// Pairs of domains signing with the same material
    pub fn shared_pairs(&self) -> Vec<(TrustDomain, TrustDomain)> {
        let mut pairs = Vec::new();
        for (i, a) in TrustDomain::ALL.iter().enumerate() {
            for b in &TrustDomain::ALL[i + 1..] {
                if self.get(*a).same_material(self.get(*b)) {
                    pairs.push((*a, *b));
                }
            }
        }
        pairs
    }
}

/// Constant-time byte slice comparison.
///
/// Returns `false` immediately if lengths differ (length is not secret);
/// otherwise compares every byte.
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let result = a
        .iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y));

    result == 0
}
