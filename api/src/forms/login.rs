//! Login form validation and interpretation of the login response.

use std::sync::OnceLock;

use regex::Regex;
use rocket::FromForm;
use serde::Serialize;
use tracing::{error, warn};

use crate::error::ServiceError;
use crate::models::response::ApiEnvelope;
use crate::models::user::{Credentials, LoginPayload};

/// Characters that satisfy the password symbol rule.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Validation errors are dismissed after this long whether or not the
/// input was corrected.
pub const ERROR_DISMISS_AFTER_MS: u64 = 1000;

pub const INVALID_EMAIL: &str = "Invalid email address";
pub const SHORT_PASSWORD: &str = "Password must be at least 6 characters long";
pub const WEAK_PASSWORD: &str = "Password must be at least 6 characters long and contain an uppercase letter, a lowercase letter, a symbol, and a number";

pub const GENERIC_FAILURE: &str = "Some thing went wrong please try after some time";
pub const TRANSPORT_FAILURE: &str = "An error occurred.";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

pub fn validate_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= 6
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Field errors as shown next to the form, with their dismissal deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineErrors {
    #[serde(flatten)]
    pub fields: FieldErrors,
    pub dismiss_after_ms: u64,
}

impl From<FieldErrors> for InlineErrors {
    fn from(fields: FieldErrors) -> Self {
        InlineErrors {
            fields,
            dismiss_after_ms: ERROR_DISMISS_AFTER_MS,
        }
    }
}

#[derive(Debug, Clone, Default, FromForm)]
pub struct LoginForm {
    #[field(default = String::new())]
    pub email: String,
    #[field(default = String::new())]
    pub password: String,
}

impl LoginForm {
    /// Email is checked first; a bad email reports on both fields.
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        if !validate_email(&self.email) {
            return Err(FieldErrors {
                email: Some(INVALID_EMAIL.to_string()),
                password: Some(SHORT_PASSWORD.to_string()),
            });
        }
        if !validate_password(&self.password) {
            return Err(FieldErrors {
                email: None,
                password: Some(WEAK_PASSWORD.to_string()),
            });
        }
        Ok(Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success { token: String, message: String },
    /// The API refused the credentials (401) or knows no such account (404).
    Rejected { status: u16, message: String },
    Failed { message: String },
}

pub fn interpret_login(result: Result<ApiEnvelope<LoginPayload>, ServiceError>) -> LoginOutcome {
    let envelope = match result {
        Ok(envelope) => envelope,
        Err(err) => {
            error!(error = %err, "login request failed");
            return LoginOutcome::Failed {
                message: TRANSPORT_FAILURE.to_string(),
            };
        }
    };

    match envelope.status {
        200 => match envelope.payload.token {
            Some(token) if !token.is_empty() => LoginOutcome::Success {
                token,
                message: envelope.payload.msg,
            },
            _ => {
                warn!("login succeeded without a token");
                LoginOutcome::Failed {
                    message: GENERIC_FAILURE.to_string(),
                }
            }
        },
        status @ (401 | 404) => LoginOutcome::Rejected {
            status,
            message: envelope.payload.msg,
        },
        status => {
            warn!(status, "unexpected login response");
            LoginOutcome::Failed {
                message: GENERIC_FAILURE.to_string(),
            }
        }
    }
}
