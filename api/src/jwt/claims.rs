// src/jwt/claims.rs
use serde::{Deserialize, Serialize};

use crate::session::role::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,      // account email
    pub role: Role,
    pub upstream: String, // opaque token issued by the rental API
    pub jti: String,
    pub iat: usize,
    pub exp: usize,
}

impl SessionClaims {
    /// Seconds until expiry, zero once expired.
    pub fn remaining_secs(&self, now: i64) -> u64 {
        (self.exp as i64 - now).max(0) as u64
    }
}
