use serde::Deserialize;

use crate::models::booking::Booking;

/// A rental API response: the numeric status plus its decoded body.
#[derive(Debug, Clone)]
pub struct ApiEnvelope<T> {
    pub status: u16,
    pub payload: T,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagePayload {
    #[serde(default)]
    pub msg: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingsPayload {
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Vec<Booking>,
}
