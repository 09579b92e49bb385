use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Cookie, Header, Method};
use rocket::{Data, Request, Response};

use crate::routes::guards::request_sessions;
use crate::session::gate::RequestSessions;

/// Drops session cookies that no longer verify (expired, revoked, forged)
/// so the browser stops presenting them.
pub struct StaleSessionFairing;

#[rocket::async_trait]
impl Fairing for StaleSessionFairing {
    fn info(&self) -> Info {
        Info {
            name: "Stale session cleanup",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        // preflights carry no cookies worth checking
        if request.method() == Method::Options {
            return;
        }
        request_sessions(request).await;
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let sessions = request.local_cache(RequestSessions::default);

        for role in sessions.stale_roles() {
            let key = role.token_key();
            // a login on this same request already replaced the cookie
            let replaced = response
                .headers()
                .get("Set-Cookie")
                .any(|value| value.starts_with(&format!("{key}=")));
            if replaced {
                continue;
            }

            let mut removal = Cookie::build((key, "")).path("/").build();
            removal.make_removal();
            response.adjoin_header(Header::new("Set-Cookie", removal.to_string()));
        }
    }
}
