pub mod actions;
pub mod guards;
pub mod pages;
pub mod table;

use rocket::http::Status;
use rocket::response::{Flash, Redirect};
use rocket::serde::json::Json;
use rocket::{catch, Request, Responder, Route};

use crate::routes::table::Page;
use crate::session::role::Role;
use crate::views::{NotFoundData, PageData, PageView, ShellData};

#[derive(Responder)]
pub enum PageResponse {
    View((Status, Json<PageView>)),
    Redirect(Redirect),
    Flash(Flash<Redirect>),
}

impl PageResponse {
    pub fn ok(view: PageView) -> Self {
        PageResponse::View((Status::Ok, Json(view)))
    }

    pub fn status(status: Status, view: PageView) -> Self {
        PageResponse::View((status, Json(view)))
    }

    /// Navigation, with an optional one-shot message for the next page.
    pub fn redirect(to: &'static str, prompt: Option<&'static str>) -> Self {
        match prompt {
            Some(message) => PageResponse::Flash(Flash::error(Redirect::to(to), message)),
            None => PageResponse::Redirect(Redirect::to(to)),
        }
    }
}

pub fn routes() -> Vec<Route> {
    rocket::routes![
        pages::page,
        actions::user_login,
        actions::provider_login,
        actions::admin_login,
        actions::confirm_cancel,
        actions::cancel_booking,
        actions::logout,
        actions::all_options,
    ]
}

pub fn not_found_view(path: &str) -> PageView {
    PageView::new(
        Page::NotFound,
        PageData::NotFound(NotFoundData {
            path: path.to_string(),
        }),
    )
}

#[catch(404)]
pub fn not_found(req: &Request) -> Json<PageView> {
    Json(not_found_view(req.uri().path().as_str()))
}

/// Action routes refuse requests without a user session.
#[catch(401)]
pub fn unauthorized(_req: &Request) -> Json<PageView> {
    Json(
        PageView::new(
            Page::UserLogin,
            PageData::Shell(ShellData {
                params: Default::default(),
                session: None,
            }),
        )
        .navigate_to(Role::User.login_path()),
    )
}

