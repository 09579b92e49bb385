use rocket::FromFormField;
use serde::Serialize;

use crate::models::booking::{Booking, BookingStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, FromFormField)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// The "show" selector of the bookings page.
///
/// `Latest` is a plain reversal of the sorted list rather than a recency
/// filter; kept as the page has always behaved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, FromFormField)]
#[serde(rename_all = "lowercase")]
pub enum ShowFilter {
    #[default]
    All,
    Latest,
}

/// A user's bookings as fetched for one page load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingList {
    bookings: Vec<Booking>,
}

impl BookingList {
    pub fn new(bookings: Vec<Booking>) -> Self {
        BookingList { bookings }
    }

    pub fn get(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|booking| booking.id == id)
    }

    /// Bookings in display order: stable sort by amount, then the show toggle.
    pub fn visible(&self, sort: SortOrder, show: ShowFilter) -> Vec<&Booking> {
        let mut visible: Vec<&Booking> = self.bookings.iter().collect();
        match sort {
            SortOrder::Asc => visible.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
            SortOrder::Desc => visible.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
        }
        if show == ShowFilter::Latest {
            visible.reverse();
        }
        visible
    }

    /// Sets the booking's status to canceled, leaving every other field and
    /// booking untouched. Returns false if no booking has that id.
    pub fn mark_canceled(&mut self, id: &str) -> bool {
        match self.bookings.iter_mut().find(|booking| booking.id == id) {
            Some(booking) => {
                booking.status = BookingStatus::Canceled;
                true
            }
            None => false,
        }
    }
}
