use std::fmt;
use std::str::FromStr;

use rocket::request::FromParam;
use serde::{Deserialize, Serialize};

/// The three independent account spaces of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Provider,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Provider, Role::Admin];

    /// Storage key the role's session token lives under.
    pub fn token_key(self) -> &'static str {
        match self {
            Role::User => "userAccessToken",
            Role::Provider => "providerAccessToken",
            Role::Admin => "admin",
        }
    }

    pub fn login_path(self) -> &'static str {
        match self {
            Role::User => "/login",
            Role::Provider => "/provider",
            Role::Admin => "/admin",
        }
    }

    pub fn home_path(self) -> &'static str {
        match self {
            Role::User => "/home",
            Role::Provider => "/provider/dashboard",
            Role::Admin => "/admin/dashboard",
        }
    }

    /// Message shown on the login page after a gated redirect, if any.
    pub fn login_prompt(self) -> Option<&'static str> {
        match self {
            Role::Admin => Some("Please log in to access the admin dashboard."),
            Role::User | Role::Provider => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Provider => "provider",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "provider" => Ok(Role::Provider),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl<'a> FromParam<'a> for Role {
    type Error = UnknownRole;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        param.parse()
    }
}
