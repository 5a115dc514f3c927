use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::cache::{GeoIndexStore, NearbyKeys, RankedResultCache};
use crate::config::Config;
use crate::error::{NearbyError, Result};
use crate::models::{NeighborEntry, NeighborPage, PageRequest, RadiusQuery, SortOrder};

/// 附近的人搜索半径（千米）
pub const SEARCH_RADIUS_KM: f64 = 100.0;

/// 分页查询附近的人
///
/// 第1页：以用户当前位置做半径查询，结果按距离写入该用户的有序集合，再把用户自己
/// 从集合中删除。之后的页直接按排名从有序集合中读取，不再查询GEO索引。
/// 服务本身无状态，所有状态都在存储中。
pub struct NearbyService {
    geo_index: Arc<dyn GeoIndexStore>,
    ranked_cache: Arc<dyn RankedResultCache>,
    keys: NearbyKeys,
    max_results: u64,
    cache_ttl: Option<Duration>,
    store_timeout: Duration,
}

impl NearbyService {
    pub fn new(
        geo_index: Arc<dyn GeoIndexStore>,
        ranked_cache: Arc<dyn RankedResultCache>,
        config: &Config,
    ) -> Self {
        Self {
            geo_index,
            ranked_cache,
            keys: NearbyKeys::from_config(config),
            max_results: config.max_results(),
            cache_ttl: config.nearby_cache_ttl(),
            store_timeout: config.store_timeout(),
        }
    }

    pub async fn list_nearby(&self, request: &PageRequest) -> Result<NeighborPage> {
        let (start, end) = request.rank_range()?;
        let store_key = self.keys.ranked_set_key(&request.member_id);

        // 从第1页开始查时刷新有序集合，以后页直接从有序集合中查
        if request.is_first_page() && self.refresh(&request.member_id, &store_key).await? == 0 {
            return Ok(Vec::new());
        }

        let members = timeout(
            self.store_timeout,
            self.ranked_cache.range_by_rank(&store_key, start, end),
        )
        .await??;

        tracing::debug!(
            "Nearby page {} (size {}) for {}: {} members",
            request.page_index,
            request.page_size,
            request.member_id,
            members.len()
        );
        // 第1页删除自己失败或超时后，集合里可能仍有查询者本人
        Ok(members
            .into_iter()
            .filter(|(member, _)| member != &request.member_id)
            .map(NeighborEntry::from)
            .collect())
    }

    /// 重新生成有序集合并排除查询者自己，返回半径查询写入的成员数
    async fn refresh(&self, member_id: &str, store_key: &str) -> Result<u64> {
        let query = RadiusQuery {
            member_id,
            radius_km: SEARCH_RADIUS_KM,
            limit: self.max_results,
            order: SortOrder::Asc,
            store_key,
            ttl: self.cache_ttl,
        };

        let count = timeout(self.store_timeout, self.geo_index.query_within_radius(&query))
            .await??;
        if count == 0 {
            return Ok(0);
        }

        // 自己不能出现在自己附近的人里，删除失败要让调用方知道并重试整个第1页
        let removed = match timeout(
            self.store_timeout,
            self.ranked_cache.remove_member(store_key, member_id),
        )
        .await
        {
            Ok(Ok(removed)) => removed,
            Ok(Err(e)) => {
                tracing::error!("Failed to remove {} from {}: {}", member_id, store_key, e);
                return Err(NearbyError::PostProcessingFailure {
                    member: member_id.to_string(),
                    reason: e.to_string(),
                });
            }
            Err(_) => {
                tracing::error!("Timed out removing {} from {}", member_id, store_key);
                return Err(NearbyError::PostProcessingFailure {
                    member: member_id.to_string(),
                    reason: "store operation timed out".to_string(),
                });
            }
        };

        tracing::debug!(
            "Refreshed {} with {} members (self removed: {})",
            store_key,
            count,
            removed
        );
        Ok(count)
    }
}
