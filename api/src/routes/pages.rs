use rocket::http::uri::Origin;
use rocket::http::{CookieJar, Status};
use rocket::request::FlashMessage;
use rocket::{get, State};
use tracing::{error, info, warn};

use crate::bookings::list::{BookingList, ShowFilter, SortOrder};
use crate::forms::login::{InlineErrors, GENERIC_FAILURE, TRANSPORT_FAILURE};
use crate::jwt::claims::SessionClaims;
use crate::routes::guards::Sessions;
use crate::routes::table::{Page, Resolved};
use crate::routes::{not_found_view, PageResponse};
use crate::session::gate::GateDecision;
use crate::session::role::Role;
use crate::session::store::TokenStore;
use crate::state::AppState;
use crate::views::{
    BookingCard, BookingsData, DashboardData, LoginData, PageData, PageView, SessionInfo,
    ShellData, Toast,
};

pub const SESSION_EXPIRED: &str = "Your session has expired, please log in again.";

/// Every page goes through the route table and the session gate here.
#[get("/<_..>?<sort>&<show>", rank = 100)]
pub async fn page(
    origin: &Origin<'_>,
    sort: Option<SortOrder>,
    show: Option<ShowFilter>,
    sessions: Sessions<'_>,
    cookies: &CookieJar<'_>,
    flash: Option<FlashMessage<'_>>,
    state: &State<AppState>,
) -> PageResponse {
    let path = origin.path().as_str();
    let Some(Resolved { entry, params }) = state.routes.resolve(path) else {
        return PageResponse::status(Status::NotFound, not_found_view(path));
    };

    let session = match sessions.0.decide(entry.access) {
        GateDecision::Redirect { to, prompt } => return PageResponse::redirect(to, prompt),
        GateDecision::Render(session) => session,
    };

    let toast = flash.as_ref().map(Toast::from_flash);

    match (entry.page, session) {
        (Page::NotFound, _) => {
            PageResponse::status(Status::NotFound, not_found_view(path).with_toast(toast))
        }
        (Page::UserLogin, _) => PageResponse::ok(login_view(Role::User, None).with_toast(toast)),
        (Page::ProviderLogin, _) => {
            PageResponse::ok(login_view(Role::Provider, None).with_toast(toast))
        }
        (Page::AdminLogin, _) => PageResponse::ok(login_view(Role::Admin, None).with_toast(toast)),
        (Page::UserBookings, Some(session)) => {
            let fetched = load_bookings(state, cookies, &session).await;
            let view = bookings_view(
                &fetched.list,
                sort.unwrap_or_default(),
                show.unwrap_or_default(),
            );
            PageResponse::ok(view.with_toast(fetched.toast.or(toast)))
        }
        (Page::AdminDashboard, Some(session)) => {
            info!(admin = %session.sub, "welcome to dashboard");
            let data = DashboardData {
                greeting: "Admin Dashboard".to_string(),
                session: SessionInfo::from(&session),
            };
            PageResponse::ok(PageView::new(Page::AdminDashboard, PageData::Dashboard(data)).with_toast(toast))
        }
        (page, session) => {
            let data = ShellData {
                params,
                session: session.as_ref().map(SessionInfo::from),
            };
            PageResponse::ok(PageView::new(page, PageData::Shell(data)).with_toast(toast))
        }
    }
}

pub fn login_view(role: Role, errors: Option<InlineErrors>) -> PageView {
    PageView::new(
        Page::login_for(role),
        PageData::Login(LoginData { role, errors }),
    )
}

pub fn bookings_view(list: &BookingList, sort: SortOrder, show: ShowFilter) -> PageView {
    let bookings = list
        .visible(sort, show)
        .into_iter()
        .map(BookingCard::from)
        .collect();

    PageView::new(
        Page::UserBookings,
        PageData::Bookings(BookingsData {
            sort,
            show,
            bookings,
        }),
    )
}

/// One page load's worth of bookings.
#[derive(Debug, Default)]
pub struct FetchedBookings {
    pub list: BookingList,
    pub toast: Option<Toast>,
    /// The rental API refused the upstream token; the cookie is already gone.
    pub session_expired: bool,
}

/// Fetches the user's bookings for one page load. Failures leave an empty
/// list and a toast; a 401 also drops the stale session cookie.
pub async fn load_bookings(
    state: &AppState,
    cookies: &CookieJar<'_>,
    session: &SessionClaims,
) -> FetchedBookings {
    match state.api.user_bookings(&session.upstream).await {
        Ok(envelope) if envelope.is_success() => FetchedBookings {
            list: BookingList::new(envelope.payload.data),
            ..Default::default()
        },
        Ok(envelope) if envelope.status == 401 => {
            warn!(user = %session.sub, "rental api rejected the session");
            cookies.clear_token(Role::User.token_key());
            FetchedBookings {
                toast: Some(Toast::error(non_empty_or(envelope.payload.msg, SESSION_EXPIRED))),
                session_expired: true,
                ..Default::default()
            }
        }
        Ok(envelope) => {
            warn!(status = envelope.status, "fetching bookings failed");
            FetchedBookings {
                toast: Some(Toast::error(non_empty_or(envelope.payload.msg, GENERIC_FAILURE))),
                ..Default::default()
            }
        }
        Err(err) => {
            error!(error = %err, "error fetching booking data");
            FetchedBookings {
                toast: Some(Toast::error(TRANSPORT_FAILURE)),
                ..Default::default()
            }
        }
    }
}

pub fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
