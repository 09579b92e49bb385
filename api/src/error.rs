use thiserror::Error;

use crate::session::role::Role;

/// Failures talking to the remote rental API.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unreadable response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no session token present")]
    Missing,
    #[error("failed to sign session token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
    #[error("session token expired")]
    Expired,
    #[error("invalid session token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
    #[error("session token belongs to {found}, expected {expected}")]
    RoleMismatch { expected: Role, found: Role },
    #[error("session has been revoked")]
    Revoked,
    #[error("{0} session did not verify on this request")]
    Rejected(Role),
    #[error(transparent)]
    Revocation(#[from] RevocationError),
}

#[derive(Debug, Error)]
pub enum RevocationError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("duplicate route pattern `{0}`")]
    Duplicate(String),
    #[error("invalid route pattern `{0}`: {1}")]
    InvalidPattern(String, &'static str),
}

/// Everything that can stop the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] Box<rocket::figment::Error>),
    #[error(transparent)]
    Routes(#[from] RouteTableError),
    #[error("could not connect to redis: {0}")]
    Redis(#[from] redis::RedisError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("server error: {0}")]
    Launch(#[from] Box<rocket::Error>),
}
