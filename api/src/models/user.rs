use serde::{Deserialize, Serialize};

/// Validated login credentials, sent as the login request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub token: Option<String>,
}
