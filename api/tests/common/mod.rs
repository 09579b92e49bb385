use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rocket::figment::Figment;
use rocket::local::asynchronous::Client;
use serde_json::json;

use rentify_web::error::{RevocationError, ServiceError};
use rentify_web::jwt::jwt_helper::SessionKeys;
use rentify_web::models::booking::Booking;
use rentify_web::models::response::{ApiEnvelope, BookingsPayload, MessagePayload};
use rentify_web::models::user::{Credentials, LoginPayload};
use rentify_web::routes::table::RouteTable;
use rentify_web::services::redis_service::{MemoryRevocations, RevocationList};
use rentify_web::services::user_service::RentalApi;
use rentify_web::session::role::Role;
use rentify_web::state::AppState;
use rentify_web::{build_rocket, Cors};

pub const SECRET: &[u8] = b"integration-secret";

/// Rental API stand-in with canned statuses and call counters.
pub struct FakeApi {
    pub login_status: u16,
    pub login_msg: String,
    /// How long a login call stays pending before answering.
    pub login_delay: Duration,
    pub bookings_status: u16,
    pub cancel_status: u16,
    /// Every call fails as if the API answered with something unreadable.
    pub unreachable: bool,
    pub bookings: Mutex<Vec<Booking>>,
    pub login_calls: AtomicUsize,
    pub booking_calls: AtomicUsize,
    pub cancel_calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        FakeApi {
            login_status: 200,
            login_msg: "Login successful".to_string(),
            login_delay: Duration::ZERO,
            bookings_status: 200,
            cancel_status: 200,
            unreachable: false,
            bookings: Mutex::new(sample_bookings()),
            login_calls: AtomicUsize::new(0),
            booking_calls: AtomicUsize::new(0),
            cancel_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn cancel_calls(&self) -> Vec<String> {
        self.cancel_calls.lock().unwrap().clone()
    }

    fn check_reachable(&self, path: &str) -> Result<(), ServiceError> {
        if !self.unreachable {
            return Ok(());
        }
        Err(ServiceError::Decode {
            url: format!("http://api.test{path}"),
            source: serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
        })
    }
}

#[rocket::async_trait]
impl RentalApi for FakeApi {
    async fn login(
        &self,
        _role: Role,
        credentials: &Credentials,
    ) -> Result<ApiEnvelope<LoginPayload>, ServiceError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if !self.login_delay.is_zero() {
            tokio::time::sleep(self.login_delay).await;
        }
        self.check_reachable("/user/login")?;
        Ok(ApiEnvelope {
            status: self.login_status,
            payload: LoginPayload {
                msg: self.login_msg.clone(),
                token: (self.login_status == 200).then(|| format!("upstream-{}", credentials.email)),
            },
        })
    }

    async fn user_bookings(
        &self,
        _token: &str,
    ) -> Result<ApiEnvelope<BookingsPayload>, ServiceError> {
        self.booking_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable("/user/bookings")?;
        let data = if self.bookings_status == 200 {
            self.bookings.lock().unwrap().clone()
        } else {
            Vec::new()
        };
        Ok(ApiEnvelope {
            status: self.bookings_status,
            payload: BookingsPayload {
                msg: String::new(),
                data,
            },
        })
    }

    async fn cancel_booking(
        &self,
        _token: &str,
        booking_id: &str,
    ) -> Result<ApiEnvelope<MessagePayload>, ServiceError> {
        self.cancel_calls.lock().unwrap().push(booking_id.to_string());
        Ok(ApiEnvelope {
            status: self.cancel_status,
            payload: MessagePayload {
                msg: "done".to_string(),
            },
        })
    }
}

pub fn sample_bookings() -> Vec<Booking> {
    serde_json::from_value(json!([
        {
            "_id": "b1", "roomType": "Suite", "amount": 3000, "status": "confirmed",
            "bookingDate": "2024-02-01T08:00:00.000Z", "checkInDate": "2024-02-10T00:00:00.000Z",
            "checkOutDate": "2024-02-12T00:00:00.000Z", "adults": 2, "children": 1,
            "image": ["https://img/b1-a.jpg", "https://img/b1-b.jpg"], "Adress": "1 Hill Rd",
            "providerId": "p1", "roomId": "r1", "userId": "u1"
        },
        {
            "_id": "b2", "roomType": "Single", "amount": 1000, "status": "confirmed",
            "image": [], "providerId": "p2", "roomId": "r2", "userId": "u1"
        },
        {
            "_id": "b3", "roomType": "Double", "amount": 2000, "status": "pending",
            "image": ["https://img/b3.jpg"], "providerId": "p3", "roomId": "r3", "userId": "u1"
        }
    ]))
    .unwrap()
}

/// Revocation list that counts lookups.
#[derive(Default)]
pub struct CountingRevocations {
    inner: MemoryRevocations,
    pub lookups: AtomicUsize,
}

impl CountingRevocations {
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[rocket::async_trait]
impl RevocationList for CountingRevocations {
    async fn revoke(&self, jti: &str, ttl_secs: u64) -> Result<(), RevocationError> {
        self.inner.revoke(jti, ttl_secs).await
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, RevocationError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.is_revoked(jti).await
    }
}

pub fn keys() -> SessionKeys {
    SessionKeys::new(SECRET, 3600)
}

pub async fn tracked(api: Arc<FakeApi>) -> Client {
    Client::tracked(rocket(api, Arc::new(MemoryRevocations::default())))
        .await
        .expect("valid rocket instance")
}

pub async fn untracked(api: Arc<FakeApi>) -> Client {
    Client::untracked(rocket(api, Arc::new(MemoryRevocations::default())))
        .await
        .expect("valid rocket instance")
}

pub async fn counting(api: Arc<FakeApi>) -> (Client, Arc<CountingRevocations>) {
    let revocations = Arc::new(CountingRevocations::default());
    let client = Client::untracked(rocket(api, revocations.clone()))
        .await
        .expect("valid rocket instance");
    (client, revocations)
}

fn rocket(api: Arc<FakeApi>, revocations: Arc<dyn RevocationList>) -> rocket::Rocket<rocket::Build> {
    let state = AppState::new(api, keys(), revocations, RouteTable::rentify().unwrap());
    let figment = Figment::from(rocket::Config::debug_default()).merge(("log_level", "off"));
    build_rocket(
        figment,
        state,
        Cors {
            allowed_origin: "*".to_string(),
        },
    )
}
