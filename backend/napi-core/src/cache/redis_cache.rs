use super::{CacheProvider, CacheRole};
use crate::config::CacheEndpoint;
use crate::error::CacheError;

use common::ErrorLocation;

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;

/// Redis-backed provider owning its own connection.
///
/// Keys are prefixed with the role namespace.
pub struct RedisCache {
    connection: MultiplexedConnection,
    namespace: &'static str,
}

impl RedisCache {
    /// Connect and verify the backend answers, within `timeout` if one is set.
    pub async fn connect(
        endpoint: &CacheEndpoint,
        role: CacheRole,
        timeout: Option<Duration>,
    ) -> Result<Self, CacheError> {
        let connection_error = |message: String| CacheError::Connection {
            endpoint: endpoint.to_string(),
            message,
            location: ErrorLocation::caller(),
        };

        let client = redis::Client::open(endpoint.redis_url())
            .map_err(|e| connection_error(e.to_string()))?;

        let connecting = client.get_multiplexed_async_connection();
        let connected = match timeout {
            Some(limit) => tokio::time::timeout(limit, connecting)
                .await
                .map_err(|_| connection_error(format!("no answer within {}s", limit.as_secs())))?,
            None => connecting.await,
        };
        let mut connection = connected.map_err(|e| connection_error(e.to_string()))?;

        redis::cmd("PING")
            .query_async::<String>(&mut connection)
            .await
            .map_err(|e| connection_error(e.to_string()))?;

        debug!("Connected {role} cache to {endpoint}");

        Ok(Self {
            connection,
            namespace: role.namespace(),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }
}

#[async_trait]
impl CacheProvider for RedisCache {
    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut connection = self.connection.clone();
        let value: Option<Vec<u8>> = connection.get(self.key(key)).await?;
        Ok(value)
    }

    async fn save(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();
        let _: () = connection
            .set_ex(self.key(key), value, ttl.as_secs().max(1))
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();
        let _: () = connection.del(self.key(key)).await?;
        Ok(())
    }
}
