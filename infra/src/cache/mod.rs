//! Redis access for server-side session storage

pub mod redis_client;

pub use redis_client::RedisClient;

pub use pa_shared::CacheConfig;
