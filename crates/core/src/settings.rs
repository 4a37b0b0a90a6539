//! The settings store: a per-key TTL read-through cache
//! over `salon_db::queries::settings`, with typed access via
//! `salon_types::SettingValue`.

use chrono::{DateTime, Utc};
use salon_db::queries::settings as db;
use salon_types::SettingValue;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

struct CacheEntry {
    value: SettingValue,
    fetched_at: DateTime<Utc>,
}

/// Process-local read-through cache, one entry per key, each with its own
/// TTL clock.
pub struct Store {
    pool: PgPool,
    cache: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Store {
    pub fn new(pool: PgPool) -> Self {
        Self::with_ttl(pool, Duration::from_secs(60))
    }

    pub fn with_ttl(pool: PgPool, ttl: Duration) -> Self {
        Self { pool, cache: RwLock::new(HashMap::new()), ttl }
    }

    /// Reads a key, falling back to `default` whenever the store is
    /// empty, unreachable, or the key has never been set — a missing
    /// backing store never fails the caller.
    pub async fn get(&self, key: &str, default: SettingValue) -> SettingValue {
        if let Some(cached) = self.read_cache_if_fresh(key).await {
            return cached;
        }
        match db::get(&self.pool, key).await {
            Ok(Some(row)) => {
                let parsed = SettingValue::parse(&row.value);
                self.write_cache(key, parsed.clone()).await;
                parsed
            }
            Ok(None) => default,
            Err(err) => {
                tracing::warn!(key, error = %err, "settings store unreachable, using default");
                default
            }
        }
    }

    pub async fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key, SettingValue::Int(default)).await.as_i64().unwrap_or(default)
    }

    pub async fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key, SettingValue::Bool(default)).await.as_bool().unwrap_or(default)
    }

    /// Writes through to the DB, then invalidates the cache entry rather
    /// than refreshing it in place.
    pub async fn set(&self, key: &str, value: SettingValue) -> Result<(), sqlx::Error> {
        db::set(&self.pool, key, &value.to_storage_string()).await?;
        self.cache.write().await.remove(key);
        Ok(())
    }

    async fn read_cache_if_fresh(&self, key: &str) -> Option<SettingValue> {
        let cache = self.cache.read().await;
        let entry = cache.get(key)?;
        let age = Utc::now().signed_duration_since(entry.fetched_at);
        if age.to_std().ok()? < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    async fn write_cache(&self, key: &str, value: SettingValue) {
        self.cache
            .write()
            .await
            .insert(key.to_string(), CacheEntry { value, fetched_at: Utc::now() });
    }
}

pub type SharedStore = Arc<Store>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_entry_is_plain_data() {
        let entry = CacheEntry { value: SettingValue::Int(5), fetched_at: Utc::now() };
        assert_eq!(entry.value.as_i64(), Some(5));
    }
}
