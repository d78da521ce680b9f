use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, info};

use crate::store::{KeyValueStore, StoreError, UpdateFn};

/// WATCH/MULTI/EXEC attempts before an update gives up.
const MAX_UPDATE_ATTEMPTS: usize = 5;

/// Redis-backed session state. Connections are opened per operation from
/// the shared client.
#[derive(Clone)]
pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    pub fn open(redis_url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)?;
        info!("Redis client initialized");
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        conn.set::<_, _, ()>(key, value).await?;
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(key).await?;
        Ok(())
    }

    /// Optimistic transaction: the write is discarded and retried if another
    /// client touched the key between WATCH and EXEC. Each call opens its own
    /// connection, so the WATCH is not shared with other requests.
    async fn update(&self, key: &str, apply: &UpdateFn<'_>) -> Result<String, StoreError> {
        let mut conn = self.connection().await?;
        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            redis::cmd("WATCH")
                .arg(key)
                .query_async::<_, ()>(&mut conn)
                .await?;
            let current: Option<String> = conn.get(key).await?;
            let next = match apply(current) {
                Ok(next) => next,
                Err(e) => {
                    redis::cmd("UNWATCH")
                        .query_async::<_, ()>(&mut conn)
                        .await?;
                    return Err(e);
                }
            };

            let committed: Option<()> = redis::pipe()
                .atomic()
                .set(key, &next)
                .ignore()
                .query_async(&mut conn)
                .await?;
            if committed.is_some() {
                return Ok(next);
            }
            debug!("Update of {key} conflicted (attempt {attempt}), retrying");
        }
        Err(StoreError::Contention(key.to_string()))
    }
}
