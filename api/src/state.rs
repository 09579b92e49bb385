use std::sync::Arc;

use crate::jwt::jwt_helper::SessionKeys;
use crate::routes::table::RouteTable;
use crate::services::redis_service::RevocationList;
use crate::services::user_service::RentalApi;
use crate::session::gate::SessionGate;
use crate::session::in_flight::InFlight;

/// Everything the handlers share, managed by Rocket.
pub struct AppState {
    pub api: Arc<dyn RentalApi>,
    pub sessions: SessionKeys,
    pub revocations: Arc<dyn RevocationList>,
    pub routes: RouteTable,
    pub logins: InFlight,
}

impl AppState {
    pub fn new(
        api: Arc<dyn RentalApi>,
        sessions: SessionKeys,
        revocations: Arc<dyn RevocationList>,
        routes: RouteTable,
    ) -> Self {
        AppState {
            api,
            sessions,
            revocations,
            routes,
            logins: InFlight::default(),
        }
    }

    pub fn gate(&self) -> SessionGate<'_> {
        SessionGate::new(&self.sessions, self.revocations.as_ref())
    }
}
