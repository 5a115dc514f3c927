use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

use crate::cache::traits::RankedResultCache;
use crate::error::Result;

/// 附近的人有序集合操作，score 为距离（km）
pub struct RedisRankedCache {
    redis_client: Arc<RedisClient>,
}

impl RedisRankedCache {
    pub fn new(redis_client: Arc<RedisClient>) -> Self {
        Self { redis_client }
    }
}

#[async_trait]
impl RankedResultCache for RedisRankedCache {
    async fn range_by_rank(
        &self,
        store_key: &str,
        start: u64,
        end: u64,
    ) -> Result<Vec<(String, f64)>> {
        // 起始排名超出 isize 不可能命中任何成员，结束排名超出时截断
        let Ok(start) = isize::try_from(start) else {
            return Ok(Vec::new());
        };
        let end = isize::try_from(end).unwrap_or(isize::MAX);

        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        // 对应 Redis 原生命令: ZRANGE key start end WITHSCORES
        let members: Vec<(String, f64)> = conn.zrange_withscores(store_key, start, end).await?;
        Ok(members)
    }

    async fn remove_member(&self, store_key: &str, member_id: &str) -> Result<bool> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        let removed: i64 = conn.zrem(store_key, member_id).await?;
        Ok(removed > 0)
    }
}
