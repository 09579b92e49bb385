use std::collections::HashMap;

use chrono::Utc;
use redis::{aio::Connection, AsyncCommands, Client};
use tokio::sync::Mutex;

use crate::error::RevocationError;

/// Session ids that were logged out before their natural expiry.
#[rocket::async_trait]
pub trait RevocationList: Send + Sync {
    async fn revoke(&self, jti: &str, ttl_secs: u64) -> Result<(), RevocationError>;
    async fn is_revoked(&self, jti: &str) -> Result<bool, RevocationError>;
}

pub struct RedisRevocations {
    connection: Mutex<Connection>,
}

fn revoked_key(jti: &str) -> String {
    format!("rentify:revoked:{jti}")
}

pub async fn setup_redis(url: &str) -> Result<RedisRevocations, redis::RedisError> {
    let client = Client::open(url)?;
    let connection = client.get_async_connection().await?;

    tracing::info!(%url, "connected to redis");

    Ok(RedisRevocations {
        connection: Mutex::new(connection),
    })
}

#[rocket::async_trait]
impl RevocationList for RedisRevocations {
    async fn revoke(&self, jti: &str, ttl_secs: u64) -> Result<(), RevocationError> {
        let mut connection = self.connection.lock().await;
        // entries vanish once the token would have expired anyway
        connection
            .set_ex::<_, _, ()>(revoked_key(jti), 1u8, ttl_secs.max(1) as usize)
            .await?;
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, RevocationError> {
        let mut connection = self.connection.lock().await;
        let revoked: bool = connection.exists(revoked_key(jti)).await?;
        Ok(revoked)
    }
}

/// Single-process revocation list, used when no redis url is configured.
#[derive(Debug, Default)]
pub struct MemoryRevocations {
    entries: Mutex<HashMap<String, i64>>,
}

#[rocket::async_trait]
impl RevocationList for MemoryRevocations {
    async fn revoke(&self, jti: &str, ttl_secs: u64) -> Result<(), RevocationError> {
        let now = Utc::now().timestamp();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, expires_at| *expires_at > now);
        entries.insert(jti.to_string(), now + ttl_secs.max(1) as i64);
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, RevocationError> {
        let now = Utc::now().timestamp();
        let entries = self.entries.lock().await;
        Ok(entries.get(jti).is_some_and(|expires_at| *expires_at > now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_revocation_is_visible_until_ttl() {
        let list = MemoryRevocations::default();
        assert!(!list.is_revoked("a").await.unwrap());

        list.revoke("a", 60).await.unwrap();
        assert!(list.is_revoked("a").await.unwrap());
        assert!(!list.is_revoked("b").await.unwrap());
    }

    #[test]
    fn redis_keys_are_namespaced() {
        assert_eq!(revoked_key("abc"), "rentify:revoked:abc");
    }
}
