use std::path::PathBuf;

use chrono::Utc;
use rocket::form::Form;
use rocket::http::{CookieJar, Status};
use rocket::response::{Flash, Redirect};
use rocket::{get, options, post, FromForm, State};
use tracing::{error, info, warn};

use crate::bookings::list::{ShowFilter, SortOrder};
use crate::forms::login::{interpret_login, LoginForm, LoginOutcome, GENERIC_FAILURE};
use crate::routes::guards::UserSession;
use crate::routes::pages::{bookings_view, load_bookings, login_view, FetchedBookings, SESSION_EXPIRED};
use crate::routes::{not_found_view, PageResponse};
use crate::session::role::Role;
use crate::session::store::TokenStore;
use crate::state::AppState;
use crate::views::{Modal, Toast};

pub const LOGIN_IN_PROGRESS: &str = "A login request is already in progress";

#[post("/login", data = "<form>")]
pub async fn user_login(
    form: Form<LoginForm>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> PageResponse {
    submit_login(Role::User, form.into_inner(), cookies, state).await
}

#[post("/provider", data = "<form>")]
pub async fn provider_login(
    form: Form<LoginForm>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> PageResponse {
    submit_login(Role::Provider, form.into_inner(), cookies, state).await
}

#[post("/admin", data = "<form>")]
pub async fn admin_login(
    form: Form<LoginForm>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> PageResponse {
    submit_login(Role::Admin, form.into_inner(), cookies, state).await
}

async fn submit_login(
    role: Role,
    form: LoginForm,
    cookies: &CookieJar<'_>,
    state: &AppState,
) -> PageResponse {
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => {
            return PageResponse::status(
                Status::UnprocessableEntity,
                login_view(role, Some(errors.into())),
            );
        }
    };

    let Some(_ticket) = state.logins.begin(role, &credentials.email) else {
        return PageResponse::status(
            Status::Conflict,
            login_view(role, None).with_toast(Some(Toast::error(LOGIN_IN_PROGRESS))),
        );
    };

    let result = state.api.login(role, &credentials).await;
    match interpret_login(result) {
        LoginOutcome::Success { token, message } => {
            match state.sessions.issue(role, &credentials.email, &token) {
                Ok(session) => {
                    info!(%role, email = %credentials.email, "signed in");
                    cookies.store_token(role.token_key(), session);
                    PageResponse::Flash(Flash::success(Redirect::to(role.home_path()), message))
                }
                Err(err) => {
                    error!(error = %err, "could not issue session token");
                    PageResponse::status(
                        Status::InternalServerError,
                        login_view(role, None).with_toast(Some(Toast::error(GENERIC_FAILURE))),
                    )
                }
            }
        }
        LoginOutcome::Rejected { status, message } => {
            let status = Status::from_code(status).unwrap_or(Status::Unauthorized);
            PageResponse::status(
                status,
                login_view(role, None).with_toast(Some(Toast::error(message))),
            )
        }
        LoginOutcome::Failed { message } => PageResponse::status(
            Status::BadGateway,
            login_view(role, None).with_toast(Some(Toast::error(message))),
        ),
    }
}

/// Booking ids are opaque database ids; anything else never reaches the API.
fn is_booking_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Where a cancel lands once the rental API has dropped the session.
fn session_expired(fetched: FetchedBookings) -> PageResponse {
    let message = fetched
        .toast
        .map(|toast| toast.message)
        .unwrap_or_else(|| SESSION_EXPIRED.to_string());
    PageResponse::Flash(Flash::error(Redirect::to(Role::User.login_path()), message))
}

#[get("/bookings/<id>/cancel?<sort>&<show>")]
pub async fn confirm_cancel(
    id: &str,
    sort: Option<SortOrder>,
    show: Option<ShowFilter>,
    session: UserSession,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> PageResponse {
    if !is_booking_id(id) {
        return PageResponse::status(Status::NotFound, not_found_view(&format!("/bookings/{id}/cancel")));
    }
    let fetched = load_bookings(state, cookies, &session.0).await;
    if fetched.session_expired {
        return session_expired(fetched);
    }
    let view = bookings_view(&fetched.list, sort.unwrap_or_default(), show.unwrap_or_default())
        .with_toast(fetched.toast)
        .with_modal(Modal::confirm_cancel());
    PageResponse::ok(view)
}

#[derive(Debug, Default, FromForm)]
pub struct CancelForm {
    #[field(default = false)]
    pub confirm: bool,
}

#[post("/bookings/<id>/cancel?<sort>&<show>", data = "<form>")]
pub async fn cancel_booking(
    id: &str,
    sort: Option<SortOrder>,
    show: Option<ShowFilter>,
    session: UserSession,
    form: Form<CancelForm>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> PageResponse {
    if !is_booking_id(id) {
        return PageResponse::status(Status::NotFound, not_found_view(&format!("/bookings/{id}/cancel")));
    }

    let fetched = load_bookings(state, cookies, &session.0).await;
    if fetched.session_expired {
        // the upstream token is dead, nothing is sent with it
        return session_expired(fetched);
    }
    let (sort, show) = (sort.unwrap_or_default(), show.unwrap_or_default());
    let mut list = fetched.list;
    if !form.confirm {
        // dismissed: nothing is sent
        return PageResponse::ok(bookings_view(&list, sort, show).with_toast(fetched.toast));
    }

    match state.api.cancel_booking(&session.0.upstream, id).await {
        Ok(envelope) if envelope.is_success() => {
            info!(booking = id, user = %session.0.sub, "booking canceled");
            list.mark_canceled(id);
            let view = bookings_view(&list, sort, show)
                .with_modal(Modal::canceled())
                .navigate_to("/userprofile");
            PageResponse::ok(view)
        }
        outcome => {
            match outcome {
                Ok(envelope) => {
                    warn!(booking = id, status = envelope.status, "cancel booking refused");
                    if envelope.status == 401 {
                        cookies.clear_token(Role::User.token_key());
                    }
                }
                Err(err) => error!(booking = id, error = %err, "error in cancel booking"),
            }
            let view = bookings_view(&list, sort, show).with_modal(Modal::cancel_failed());
            PageResponse::status(Status::BadGateway, view)
        }
    }
}

#[post("/logout/<role>")]
pub async fn logout(role: Role, cookies: &CookieJar<'_>, state: &State<AppState>) -> Redirect {
    if let Some(token) = cookies.token(role.token_key()) {
        if let Ok(claims) = state.sessions.verify(&token, role) {
            let ttl = claims.remaining_secs(Utc::now().timestamp());
            if let Err(err) = state.revocations.revoke(&claims.jti, ttl).await {
                error!(%role, error = %err, "could not revoke session");
            }
            info!(%role, email = %claims.sub, "signed out");
        }
    }
    cookies.clear_token(role.token_key());
    Redirect::to(role.login_path())
}

#[options("/<_path..>")]
pub fn all_options(_path: PathBuf) -> Status {
    Status::Ok
}
