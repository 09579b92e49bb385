pub mod bookings;
pub mod config;
pub mod error;
pub mod forms;
pub mod jwt;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod views;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::http::Header;
use rocket::{catchers, Build, Request, Response, Rocket};

use crate::services::session_fairing::StaleSessionFairing;
use crate::state::AppState;

/// CORS headers for the browser app. Session cookies are only sent to a
/// named origin, so credentials are allowed only when one is configured.
pub struct Cors {
    pub allowed_origin: String,
}

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new(
            "Access-Control-Allow-Origin",
            self.allowed_origin.clone(),
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, DELETE, OPTIONS",
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "Content-Type, Authorization",
        ));
        if self.allowed_origin != "*" {
            response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
        }
    }
}

pub fn build_rocket(figment: Figment, state: AppState, cors: Cors) -> Rocket<Build> {
    rocket::custom(figment)
        .manage(state)
        .attach(cors)
        .attach(StaleSessionFairing)
        .mount("/", routes::routes())
        .register(
            "/",
            catchers![routes::not_found, routes::unauthorized],
        )
}
