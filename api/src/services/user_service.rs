use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::ServiceError;
use crate::models::response::{ApiEnvelope, BookingsPayload, MessagePayload};
use crate::models::user::{Credentials, LoginPayload};
use crate::session::role::Role;

/// Calls made against the remote rental API. Every call yields the response
/// status alongside the body so callers can branch on it directly.
#[rocket::async_trait]
pub trait RentalApi: Send + Sync {
    async fn login(
        &self,
        role: Role,
        credentials: &Credentials,
    ) -> Result<ApiEnvelope<LoginPayload>, ServiceError>;

    async fn user_bookings(&self, token: &str)
        -> Result<ApiEnvelope<BookingsPayload>, ServiceError>;

    async fn cancel_booking(
        &self,
        token: &str,
        booking_id: &str,
    ) -> Result<ApiEnvelope<MessagePayload>, ServiceError>;
}

pub struct HttpRentalApi {
    client: Client,
    base_url: String,
}

impl HttpRentalApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ServiceError::Client)?;

        Ok(HttpRentalApi {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T>(&self, url: String, request: RequestBuilder) -> Result<ApiEnvelope<T>, ServiceError>
    where
        T: DeserializeOwned + Default,
    {
        let response = request.send().await.map_err(|source| ServiceError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|source| ServiceError::Transport {
            url: url.clone(),
            source,
        })?;

        tracing::debug!(%url, status = status.as_u16(), "rental api responded");

        let payload = if body.is_empty() {
            T::default()
        } else {
            match serde_json::from_slice(&body) {
                Ok(payload) => payload,
                Err(source) if status.is_success() => {
                    return Err(ServiceError::Decode { url, source });
                }
                // error pages are not always json; the status alone carries the meaning
                Err(_) => T::default(),
            }
        };

        Ok(ApiEnvelope {
            status: status.as_u16(),
            payload,
        })
    }
}

fn login_path(role: Role) -> &'static str {
    match role {
        Role::User => "/user/login",
        Role::Provider => "/provider/login",
        Role::Admin => "/admin/login",
    }
}

#[rocket::async_trait]
impl RentalApi for HttpRentalApi {
    async fn login(
        &self,
        role: Role,
        credentials: &Credentials,
    ) -> Result<ApiEnvelope<LoginPayload>, ServiceError> {
        let url = self.url(login_path(role));
        let request = self.client.post(&url).json(credentials);
        self.send(url, request).await
    }

    async fn user_bookings(
        &self,
        token: &str,
    ) -> Result<ApiEnvelope<BookingsPayload>, ServiceError> {
        let url = self.url("/user/bookings");
        let request = self.client.get(&url).bearer_auth(token);
        self.send(url, request).await
    }

    async fn cancel_booking(
        &self,
        token: &str,
        booking_id: &str,
    ) -> Result<ApiEnvelope<MessagePayload>, ServiceError> {
        let url = self.url(&format!("/user/bookings/{booking_id}/cancel"));
        let request = self.client.patch(&url).bearer_auth(token);
        self.send(url, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let api = HttpRentalApi::new("http://api.local/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.url("/user/bookings"), "http://api.local/user/bookings");
    }

    #[test]
    fn each_role_logs_in_against_its_own_endpoint() {
        assert_eq!(login_path(Role::User), "/user/login");
        assert_eq!(login_path(Role::Provider), "/provider/login");
        assert_eq!(login_path(Role::Admin), "/admin/login");
    }
}
