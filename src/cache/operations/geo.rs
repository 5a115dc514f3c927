use std::sync::Arc;

use async_trait::async_trait;
use redis::{Client as RedisClient, Script};

use crate::cache::traits::GeoIndexStore;
use crate::error::{NearbyError, Result};
use crate::models::{LocationRecord, RadiusQuery};
use crate::utils::is_valid_coordinate;

/// 用 Lua 脚本把 "成员是否存在 + GEOSEARCHSTORE + 设置过期" 合成一个原子操作
///
/// KEYS[1] GEO索引键，KEYS[2] 结果有序集合键
/// ARGV: 成员, 半径(km), 排序, 数量上限, 过期秒数(0 表示不过期)
/// 成员不存在时返回 -1
const GEO_SEARCH_STORE_SCRIPT: &str = r#"
if not redis.call('ZSCORE', KEYS[1], ARGV[1]) then
    return -1
end
local count = redis.call('GEOSEARCHSTORE', KEYS[2], KEYS[1],
    'FROMMEMBER', ARGV[1], 'BYRADIUS', ARGV[2], 'km', ARGV[3],
    'COUNT', ARGV[4], 'STOREDIST')
if count > 0 and tonumber(ARGV[5]) > 0 then
    redis.call('EXPIRE', KEYS[2], ARGV[5])
end
return count
"#;

/// 基于 Redis GEO 命令的全局位置索引
pub struct RedisGeoIndex {
    redis_client: Arc<RedisClient>,
    index_key: String,
    search_store: Script,
}

impl RedisGeoIndex {
    pub fn new(redis_client: Arc<RedisClient>, index_key: impl Into<String>) -> Self {
        Self {
            redis_client,
            index_key: index_key.into(),
            search_store: Script::new(GEO_SEARCH_STORE_SCRIPT),
        }
    }
}

#[async_trait]
impl GeoIndexStore for RedisGeoIndex {
    async fn upsert(&self, record: &LocationRecord) -> Result<()> {
        if !is_valid_coordinate(record.longitude, record.latitude) {
            return Err(NearbyError::InvalidCoordinate {
                longitude: record.longitude,
                latitude: record.latitude,
            });
        }

        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        // GEOADD 对已存在的成员覆盖坐标并返回0，不能当作失败
        let added: redis::RedisResult<i64> = redis::cmd("GEOADD")
            .arg(&self.index_key)
            .arg(record.longitude)
            .arg(record.latitude)
            .arg(&record.member_id)
            .query_async(&mut conn)
            .await;

        match added {
            Ok(added) => {
                tracing::debug!(
                    "GEOADD {} {} ({}, {}) added={}",
                    self.index_key,
                    record.member_id,
                    record.longitude,
                    record.latitude,
                    added
                );
                Ok(())
            }
            // Redis 只接受 ±85.05112878 以内的纬度
            Err(e) if e.to_string().contains("invalid longitude,latitude") => {
                Err(NearbyError::InvalidCoordinate {
                    longitude: record.longitude,
                    latitude: record.latitude,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn query_within_radius(&self, query: &RadiusQuery<'_>) -> Result<u64> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        let ttl_secs = query.ttl.map(|ttl| ttl.as_secs().max(1)).unwrap_or(0);
        let count: i64 = self
            .search_store
            .key(&self.index_key)
            .key(query.store_key)
            .arg(query.member_id)
            .arg(query.radius_km)
            .arg(query.order.as_str())
            .arg(query.limit)
            .arg(ttl_secs)
            .invoke_async(&mut conn)
            .await?;

        if count < 0 {
            return Err(NearbyError::MemberNotRegistered(query.member_id.to_string()));
        }

        Ok(count as u64)
    }
}
