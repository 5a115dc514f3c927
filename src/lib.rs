use std::sync::Arc;

use crate::config::{Config, StoreBackend};
use redis::Client as RedisClient;

use crate::cache::{
    GeoIndexStore, MemoryStore, NearbyKeys, RankedResultCache, RedisGeoIndex, RedisRankedCache,
};
use crate::services::{NearbyService, RegistrationService};

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod result;
pub mod router;
pub mod routes;
pub mod services;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub nearby: Arc<NearbyService>,
    pub registration: Arc<RegistrationService>,
}

impl AppState {
    /// 按配置选择 Redis 或内存存储
    pub fn from_config(config: Config) -> Result<Self, redis::RedisError> {
        match config.store_backend {
            StoreBackend::Redis => {
                let url = config.redis_url.clone().ok_or_else(|| {
                    redis::RedisError::from((
                        redis::ErrorKind::InvalidClientConfig,
                        "REDIS_URL is required for the redis backend",
                    ))
                })?;
                let redis_client = Arc::new(RedisClient::open(url)?);
                let keys = NearbyKeys::from_config(&config);
                let geo_index = Arc::new(RedisGeoIndex::new(
                    redis_client.clone(),
                    keys.geo_index_key(),
                ));
                let ranked_cache = Arc::new(RedisRankedCache::new(redis_client));
                Ok(Self::with_stores(config, geo_index, ranked_cache))
            }
            StoreBackend::Memory => {
                let store = Arc::new(MemoryStore::new());
                Ok(Self::with_stores(config, store.clone(), store))
            }
        }
    }

    pub fn with_stores(
        config: Config,
        geo_index: Arc<dyn GeoIndexStore>,
        ranked_cache: Arc<dyn RankedResultCache>,
    ) -> Self {
        let nearby = NearbyService::new(geo_index.clone(), ranked_cache, &config);
        let registration = RegistrationService::new(geo_index, config.store_timeout());

        Self {
            config,
            nearby: Arc::new(nearby),
            registration: Arc::new(registration),
        }
    }
}
