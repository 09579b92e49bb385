//! JSON documents returned for pages. The browser renders these; the widgets
//! they mention (toasts, modals, carousels) are described as data only.

use std::collections::HashMap;

use rocket::request::FlashMessage;
use serde::Serialize;

use crate::bookings::list::{ShowFilter, SortOrder};
use crate::forms::login::InlineErrors;
use crate::jwt::claims::SessionClaims;
use crate::models::booking::{date_part, Booking, BookingStatus};
use crate::routes::table::Page;
use crate::session::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn error(message: impl Into<String>) -> Self {
        Toast {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    /// A flash cookie left by the previous response, shown once.
    pub fn from_flash(flash: &FlashMessage<'_>) -> Self {
        let kind = match flash.kind() {
            "success" => ToastKind::Success,
            _ => ToastKind::Error,
        };
        Toast {
            kind,
            message: flash.message().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalKind {
    Warning,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modal {
    pub kind: ModalKind,
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<String>,
}

impl Modal {
    pub fn confirm_cancel() -> Self {
        Modal {
            kind: ModalKind::Warning,
            title: "Are you sure?".to_string(),
            text: "You won't be able to revert this!".to_string(),
            confirm: Some("Yes, cancel it!".to_string()),
        }
    }

    pub fn canceled() -> Self {
        Modal {
            kind: ModalKind::Success,
            title: "Canceled!".to_string(),
            text: "Your booking has been canceled.".to_string(),
            confirm: None,
        }
    }

    pub fn cancel_failed() -> Self {
        Modal {
            kind: ModalKind::Error,
            title: "Error!".to_string(),
            text: "Failed to cancel booking. Please try again.".to_string(),
            confirm: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub page: Page,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toast: Option<Toast>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modal: Option<Modal>,
    /// Where the browser should go next, once it has shown this view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate: Option<String>,
    pub data: PageData,
}

impl PageView {
    pub fn new(page: Page, data: PageData) -> Self {
        PageView {
            page,
            toast: None,
            modal: None,
            navigate: None,
            data,
        }
    }

    pub fn with_toast(mut self, toast: Option<Toast>) -> Self {
        self.toast = toast;
        self
    }

    pub fn with_modal(mut self, modal: Modal) -> Self {
        self.modal = Some(modal);
        self
    }

    pub fn navigate_to(mut self, path: impl Into<String>) -> Self {
        self.navigate = Some(path.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PageData {
    Login(LoginData),
    Bookings(BookingsData),
    Dashboard(DashboardData),
    Shell(ShellData),
    NotFound(NotFoundData),
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginData {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<InlineErrors>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub role: Role,
    pub email: String,
    pub expires_at: usize,
}

impl From<&SessionClaims> for SessionInfo {
    fn from(claims: &SessionClaims) -> Self {
        SessionInfo {
            role: claims.role,
            email: claims.sub.clone(),
            expires_at: claims.exp,
        }
    }
}

/// Pages rendered entirely by the browser: the view only says which page,
/// with its path parameters and the session, if any.
#[derive(Debug, Clone, Serialize)]
pub struct ShellData {
    pub params: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub greeting: String,
    pub session: SessionInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotFoundData {
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingsData {
    pub sort: SortOrder,
    pub show: ShowFilter,
    pub bookings: Vec<BookingCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelAction {
    pub label: &'static str,
    pub disabled: bool,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatAction {
    pub href: &'static str,
    pub provider_id: String,
    pub booking_id: String,
    pub room_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingCard {
    pub id: String,
    pub room_type: String,
    pub images: Vec<String>,
    pub booking_date: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub amount: f64,
    pub adults: u32,
    pub children: u32,
    pub status: BookingStatus,
    pub address: String,
    pub cancel: CancelAction,
    pub chat: ChatAction,
}

impl From<&Booking> for BookingCard {
    fn from(booking: &Booking) -> Self {
        let canceled = booking.status == BookingStatus::Canceled;
        BookingCard {
            id: booking.id.clone(),
            room_type: booking.room_type.clone(),
            images: booking.images.clone(),
            booking_date: date_part(&booking.booking_date).to_string(),
            check_in_date: date_part(&booking.check_in_date).to_string(),
            check_out_date: date_part(&booking.check_out_date).to_string(),
            amount: booking.amount,
            adults: booking.adults,
            children: booking.children,
            status: booking.status,
            address: booking.address.clone(),
            cancel: CancelAction {
                label: if canceled { "Booking Canceled" } else { "Cancel Booking" },
                disabled: canceled,
                href: format!("/bookings/{}/cancel", booking.id),
            },
            chat: ChatAction {
                href: "/chat",
                provider_id: booking.provider_id.clone(),
                booking_id: booking.id.clone(),
                room_id: booking.room_id.clone(),
                user_id: booking.user_id.clone(),
            },
        }
    }
}
