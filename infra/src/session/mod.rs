//! Session store implementations
//!
//! - **Cookie**: the whole session sealed into the cookie (default)
//! - **Memory**: server-side map, single instance only
//! - **Redis**: server-side in Redis, shared between instances

use std::sync::Arc;
use std::time::Duration;

use pa_core::services::SessionStore;
use pa_shared::{CacheConfig, SessionBackend, SessionConfig};

use crate::InfrastructureError;

pub mod cookie_store;
pub mod memory_store;
mod seal;

#[cfg(feature = "redis-cache")]
pub mod redis_store;

pub use cookie_store::CookieSessionStore;
pub use memory_store::MemorySessionStore;
pub use seal::CookieSealer;

#[cfg(feature = "redis-cache")]
pub use redis_store::RedisSessionStore;

#[cfg(test)]
mod tests;

/// Build the store selected by `SESSION_BACKEND`
pub async fn create_session_store(
    config: &SessionConfig,
    cache: &CacheConfig,
) -> Result<Arc<dyn SessionStore>, InfrastructureError> {
    match config.backend {
        SessionBackend::Cookie => Ok(Arc::new(CookieSessionStore::new(config))),
        SessionBackend::Memory => {
            tracing::warn!("Using in-memory sessions, they are lost on restart");
            let store = MemorySessionStore::new(config);
            store.start_cleanup_task(Duration::from_secs(config.cleanup_interval.max(1)));
            Ok(Arc::new(store))
        }
        #[cfg(feature = "redis-cache")]
        SessionBackend::Redis => {
            let client = crate::cache::RedisClient::new(cache.clone()).await?;
            Ok(Arc::new(RedisSessionStore::new(client, config)))
        }
        #[cfg(not(feature = "redis-cache"))]
        SessionBackend::Redis => {
            let _ = cache;
            Err(InfrastructureError::Config(
                "SESSION_BACKEND=redis requires the redis-cache feature".to_string(),
            ))
        }
    }
}
