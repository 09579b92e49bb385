use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Canceled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Canceled => "canceled",
        })
    }
}

/// A reservation as returned by the rental API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub room_type: String,
    #[serde(default)]
    pub booking_date: String,
    #[serde(default)]
    pub check_in_date: String,
    #[serde(default)]
    pub check_out_date: String,
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    pub amount: f64,
    pub status: BookingStatus,
    #[serde(rename = "image", default)]
    pub images: Vec<String>,
    #[serde(rename = "Adress", default)]
    pub address: String,
    #[serde(default)]
    pub provider_id: String,
    #[serde(default)]
    pub room_id: String,
    #[serde(default)]
    pub user_id: String,
}

/// Date part of an ISO-8601 timestamp, `2024-05-01T00:00:00Z` -> `2024-05-01`.
pub fn date_part(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_api_field_names() {
        let booking: Booking = serde_json::from_value(json!({
            "_id": "65f0",
            "roomType": "Deluxe",
            "bookingDate": "2024-03-01T10:00:00.000Z",
            "checkInDate": "2024-03-10T00:00:00.000Z",
            "checkOutDate": "2024-03-12T00:00:00.000Z",
            "adults": 2,
            "children": 1,
            "amount": 4500,
            "status": "confirmed",
            "image": ["https://cdn/a.jpg"],
            "Adress": "12 Beach Road",
            "providerId": "p1",
            "roomId": "r1",
            "userId": "u1"
        }))
        .unwrap();

        assert_eq!(booking.id, "65f0");
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.address, "12 Beach Road");
        assert_eq!(date_part(&booking.check_in_date), "2024-03-10");
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = serde_json::from_value::<Booking>(json!({
            "_id": "1", "amount": 1, "status": "refunded"
        }));
        assert!(result.is_err());
    }
}
