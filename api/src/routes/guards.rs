use std::convert::Infallible;

use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;

use crate::error::SessionError;
use crate::jwt::claims::SessionClaims;
use crate::session::gate::{stored_tokens, RequestSessions, RoleSession};
use crate::session::role::Role;
use crate::state::AppState;

/// Verifies every role cookie on the first call and caches the result for
/// the rest of the request.
pub async fn request_sessions<'r>(request: &'r Request<'_>) -> &'r RequestSessions {
    request
        .local_cache_async(async {
            match request.rocket().state::<AppState>() {
                Some(state) => {
                    let tokens = stored_tokens(request.cookies());
                    state.gate().resolve(tokens).await
                }
                None => RequestSessions::default(),
            }
        })
        .await
}

/// All role sessions of the current request.
pub struct Sessions<'r>(pub &'r RequestSessions);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Sessions<'r> {
    type Error = Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(Sessions(request_sessions(request).await))
    }
}

/// A verified end-user session, required by the booking actions.
#[derive(Debug, Clone)]
pub struct UserSession(pub SessionClaims);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for UserSession {
    type Error = SessionError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let error = match request_sessions(request).await.state(Role::User) {
            Some(RoleSession::Live(claims)) => return Outcome::Success(UserSession(claims.clone())),
            None | Some(RoleSession::Absent) => SessionError::Missing,
            Some(_) => SessionError::Rejected(Role::User),
        };
        tracing::debug!(error = %error, "booking action without a user session");
        Outcome::Error((Status::Unauthorized, error))
    }
}
