use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Decoded payload of a verified access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>, // Subject as issued by the identity provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    pub permissions: HashSet<String>,
    pub exp: u64, // Expiration time (as UTC timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// Shape of the token payload before the checker has confirmed that the
/// claims it depends on are present.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenPayload {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub permissions: Option<HashSet<String>>,
    #[serde(default)]
    pub exp: Option<u64>,
    #[serde(default)]
    pub iat: Option<u64>,
}

impl TokenPayload {
    /// Returns `None` when the payload carries no `permissions` or `exp` claim.
    pub(crate) fn into_claims(self) -> Option<Claims> {
        Some(Claims {
            sub: self.sub,
            iss: self.iss,
            permissions: self.permissions?,
            exp: self.exp?,
            iat: self.iat,
        })
    }
}
