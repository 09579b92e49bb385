use tracing::{debug, warn};

use crate::error::SessionError;
use crate::jwt::claims::SessionClaims;
use crate::jwt::jwt_helper::SessionKeys;
use crate::routes::table::Access;
use crate::services::redis_service::RevocationList;
use crate::session::role::Role;
use crate::session::store::TokenStore;

/// What a page request is allowed to do after the access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Render(Option<SessionClaims>),
    Redirect {
        to: &'static str,
        prompt: Option<&'static str>,
    },
}

/// How one role's stored token fared on this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSession {
    Absent,
    Live(SessionClaims),
    /// Expired, revoked, forged or issued for another role. The cookie goes.
    Stale,
    /// The revocation list could not be asked. Not trusted, not dropped.
    Unverified,
}

/// Every role's session, resolved once per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSessions {
    roles: Vec<(Role, RoleSession)>,
}

impl RequestSessions {
    pub fn state(&self, role: Role) -> Option<&RoleSession> {
        self.roles
            .iter()
            .find(|(candidate, _)| *candidate == role)
            .map(|(_, state)| state)
    }

    pub fn live(&self, role: Role) -> Option<&SessionClaims> {
        match self.state(role) {
            Some(RoleSession::Live(claims)) => Some(claims),
            _ => None,
        }
    }

    pub fn stale_roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles
            .iter()
            .filter(|(_, state)| *state == RoleSession::Stale)
            .map(|(role, _)| *role)
    }

    /// The single access check applied to every route entry.
    pub fn decide(&self, access: Access) -> GateDecision {
        match access {
            Access::Public => GateDecision::Render(None),
            Access::Protected(role) => match self.live(role) {
                Some(claims) => GateDecision::Render(Some(claims.clone())),
                None => {
                    debug!(%role, "no live session, redirecting to login");
                    GateDecision::Redirect {
                        to: role.login_path(),
                        prompt: role.login_prompt(),
                    }
                }
            },
            Access::Guest(role) => match self.live(role) {
                Some(_) => GateDecision::Redirect {
                    to: role.home_path(),
                    prompt: None,
                },
                None => GateDecision::Render(None),
            },
        }
    }
}

/// Reads every role's token out of `store`, ready for [`SessionGate::resolve`].
pub fn stored_tokens<S: TokenStore + ?Sized>(store: &S) -> Vec<(Role, Option<String>)> {
    Role::ALL
        .into_iter()
        .map(|role| (role, store.token(role.token_key())))
        .collect()
}

/// Verifies stored tokens against the signing keys and the revocation list.
pub struct SessionGate<'a> {
    keys: &'a SessionKeys,
    revocations: &'a dyn RevocationList,
}

impl<'a> SessionGate<'a> {
    pub fn new(keys: &'a SessionKeys, revocations: &'a dyn RevocationList) -> Self {
        SessionGate { keys, revocations }
    }

    /// Resolves a stored token into a live session for `role`.
    pub async fn session(
        &self,
        token: Option<String>,
        role: Role,
    ) -> Result<SessionClaims, SessionError> {
        let token = token.ok_or(SessionError::Missing)?;
        let claims = self.keys.verify(&token, role)?;
        if self.revocations.is_revoked(&claims.jti).await? {
            return Err(SessionError::Revoked);
        }
        Ok(claims)
    }

    pub async fn resolve(&self, tokens: Vec<(Role, Option<String>)>) -> RequestSessions {
        let mut roles = Vec::with_capacity(tokens.len());
        for (role, token) in tokens {
            let state = match self.session(token, role).await {
                Ok(claims) => RoleSession::Live(claims),
                Err(SessionError::Missing) => RoleSession::Absent,
                Err(SessionError::Revocation(source)) => {
                    warn!(%role, error = %source, "revocation lookup failed, treating session as invalid");
                    RoleSession::Unverified
                }
                Err(err) => {
                    debug!(%role, error = %err, "rejected session");
                    RoleSession::Stale
                }
            };
            roles.push((role, state));
        }
        RequestSessions { roles }
    }
}
