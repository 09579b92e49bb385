// src/jwt/jwt_helper.rs
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::error::SessionError;
use crate::jwt::claims::SessionClaims;
use crate::session::role::Role;

/// Signs and verifies the session tokens kept in the role cookies.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl SessionKeys {
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        SessionKeys {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    pub fn issue(&self, role: Role, sub: &str, upstream: &str) -> Result<String, SessionError> {
        self.issue_at(role, sub, upstream, Utc::now().timestamp())
    }

    pub fn issue_at(
        &self,
        role: Role,
        sub: &str,
        upstream: &str,
        now: i64,
    ) -> Result<String, SessionError> {
        let claims = SessionClaims {
            sub: sub.to_string(),
            role,
            upstream: upstream.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.max(0) as usize,
            exp: (now.max(0) as u64 + self.ttl_secs) as usize,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(SessionError::Encode)
    }

    /// Checks signature, expiry and that the token was issued for `role`.
    /// Revocation is checked separately by the gate.
    pub fn verify(&self, token: &str, role: Role) -> Result<SessionClaims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<SessionClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::Invalid(err),
            })?;

        if claims.role != role {
            return Err(SessionError::RoleMismatch {
                expected: role,
                found: claims.role,
            });
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::new(b"test-secret", 3600)
    }

    #[test]
    fn issued_token_verifies_for_its_role() {
        let keys = keys();
        let token = keys.issue(Role::User, "a@b.com", "upstream-1").unwrap();

        let claims = keys.verify(&token, Role::User).unwrap();
        assert_eq!(claims.sub, "a@b.com");
        assert_eq!(claims.upstream, "upstream-1");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_for_another_role_is_rejected() {
        let keys = keys();
        let token = keys.issue(Role::User, "a@b.com", "t").unwrap();

        assert!(matches!(
            keys.verify(&token, Role::Admin),
            Err(SessionError::RoleMismatch {
                expected: Role::Admin,
                found: Role::User
            })
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = keys();
        let two_hours_ago = Utc::now().timestamp() - 7200;
        let token = keys.issue_at(Role::User, "a@b.com", "t", two_hours_ago).unwrap();

        assert!(matches!(keys.verify(&token, Role::User), Err(SessionError::Expired)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let forged = SessionKeys::new(b"other", 3600)
            .issue(Role::Admin, "x@y.z", "t")
            .unwrap();

        assert!(matches!(keys().verify(&forged, Role::Admin), Err(SessionError::Invalid(_))));
    }

    #[test]
    fn opaque_string_is_not_a_session() {
        assert!(keys().verify("legacy-local-storage-token", Role::User).is_err());
    }
}
