use std::env;
use std::time::Duration;

use serde::Deserialize;

use crate::cache::keys::{DEFAULT_GEO_INDEX_KEY, DEFAULT_RANKED_KEY_PREFIX};

const DEFAULT_MAX_RESULTS: u64 = 1000;

/// 存储后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            "redis" => StoreBackend::Redis,
            other => {
                tracing::warn!("Unknown STORE_BACKEND '{}', falling back to redis", other);
                StoreBackend::Redis
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub redis_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    /// 全局GEO索引键
    pub geo_index_key: String,
    /// 每个用户附近的人有序集合的键前缀
    pub ranked_key_prefix: String,
    pub nearby_cache_ttl_secs: u64,
    pub nearby_max_results: u64,
    pub store_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            redis_url: None,
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            api_base_uri: "/api".to_string(),
            geo_index_key: DEFAULT_GEO_INDEX_KEY.to_string(),
            ranked_key_prefix: DEFAULT_RANKED_KEY_PREFIX.to_string(),
            nearby_cache_ttl_secs: 600,
            nearby_max_results: DEFAULT_MAX_RESULTS,
            store_timeout_ms: 2000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let defaults = Config::default();
        let store_backend = env::var("STORE_BACKEND")
            .map(|v| StoreBackend::parse(&v))
            .unwrap_or(StoreBackend::Redis);

        // redis 后端必须提供连接地址
        let redis_url = match store_backend {
            StoreBackend::Redis => Some(env::var("REDIS_URL")?),
            StoreBackend::Memory => env::var("REDIS_URL").ok(),
        };

        Ok(Config {
            store_backend,
            redis_url,
            server_host: env::var("SERVER_HOST")?,
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            api_base_uri: env::var("API_BASE_URI").unwrap_or(defaults.api_base_uri),
            geo_index_key: env::var("GEO_INDEX_KEY").unwrap_or(defaults.geo_index_key),
            ranked_key_prefix: env::var("RANKED_KEY_PREFIX").unwrap_or(defaults.ranked_key_prefix),
            nearby_cache_ttl_secs: env::var("NEARBY_CACHE_TTL")
                .ok()
                .and_then(|v| v.trim_end_matches('s').parse().ok())
                .unwrap_or(defaults.nearby_cache_ttl_secs),
            nearby_max_results: env::var("NEARBY_MAX_RESULTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|max: &u64| *max > 0)
                .unwrap_or(defaults.nearby_max_results),
            store_timeout_ms: env::var("STORE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.store_timeout_ms),
        })
    }

    /// 有序集合过期时间，`None` 表示不过期
    pub fn nearby_cache_ttl(&self) -> Option<Duration> {
        match self.nearby_cache_ttl_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// 半径查询的数量上限，Redis 不接受 COUNT 0
    pub fn max_results(&self) -> u64 {
        match self.nearby_max_results {
            0 => DEFAULT_MAX_RESULTS,
            max => max,
        }
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_names() {
        assert_eq!(StoreBackend::parse("memory"), StoreBackend::Memory);
        assert_eq!(StoreBackend::parse(" Redis "), StoreBackend::Redis);
        assert_eq!(StoreBackend::parse("etcd"), StoreBackend::Redis);
    }

    #[test]
    fn zero_ttl_disables_expiry() {
        let config = Config {
            nearby_cache_ttl_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.nearby_cache_ttl(), None);
        assert_eq!(
            Config::default().nearby_cache_ttl(),
            Some(Duration::from_secs(600))
        );
    }

    #[test]
    fn zero_max_results_falls_back_to_default() {
        let config = Config {
            nearby_max_results: 0,
            ..Config::default()
        };
        assert_eq!(config.max_results(), 1000);

        let config = Config {
            nearby_max_results: 20,
            ..Config::default()
        };
        assert_eq!(config.max_results(), 20);
    }
}
