use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::cache::traits::{GeoIndexStore, RankedResultCache};
use crate::error::{NearbyError, Result};
use crate::models::{LocationRecord, RadiusQuery, SortOrder};
use crate::utils::{calculate_distance, is_valid_coordinate};

#[derive(Debug)]
struct RankedSet {
    // 按 (距离, 成员) 升序
    entries: Vec<(String, f64)>,
    expires_at: Option<Instant>,
}

impl RankedSet {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

#[derive(Debug, Default)]
struct Inner {
    // 成员 -> (经度, 纬度)
    locations: HashMap<String, (f64, f64)>,
    ranked: HashMap<String, RankedSet>,
}

/// 进程内存储，同时实现GEO索引与有序集合，用于本地开发和测试
///
/// 半径查询并写入结果的整个过程持有写锁，对读者来说是原子的。
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn position(&self, member_id: &str) -> Option<(f64, f64)> {
        self.inner.read().await.locations.get(member_id).copied()
    }

    pub async fn member_count(&self) -> usize {
        self.inner.read().await.locations.len()
    }
}

fn by_distance(a: &(String, f64), b: &(String, f64)) -> Ordering {
    a.1.partial_cmp(&b.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
}

#[async_trait]
impl GeoIndexStore for MemoryStore {
    async fn upsert(&self, record: &LocationRecord) -> Result<()> {
        if !is_valid_coordinate(record.longitude, record.latitude) {
            return Err(NearbyError::InvalidCoordinate {
                longitude: record.longitude,
                latitude: record.latitude,
            });
        }

        let mut inner = self.inner.write().await;
        inner.locations.insert(
            record.member_id.clone(),
            (record.longitude, record.latitude),
        );
        Ok(())
    }

    async fn query_within_radius(&self, query: &RadiusQuery<'_>) -> Result<u64> {
        let mut inner = self.inner.write().await;

        let (lon, lat) = inner
            .locations
            .get(query.member_id)
            .copied()
            .ok_or_else(|| NearbyError::MemberNotRegistered(query.member_id.to_string()))?;

        let mut found: Vec<(String, f64)> = inner
            .locations
            .iter()
            .map(|(member, (m_lon, m_lat))| {
                (member.clone(), calculate_distance(lon, lat, *m_lon, *m_lat))
            })
            .filter(|(_, distance)| *distance <= query.radius_km)
            .collect();

        found.sort_by(by_distance);
        if query.order == SortOrder::Desc {
            found.reverse();
        }
        found.truncate(usize::try_from(query.limit).unwrap_or(usize::MAX));
        // 有序集合始终按距离升序保存
        found.sort_by(by_distance);

        let count = found.len() as u64;
        if found.is_empty() {
            inner.ranked.remove(query.store_key);
        } else {
            let expires_at = query.ttl.map(|ttl| Instant::now() + ttl);
            inner.ranked.insert(
                query.store_key.to_string(),
                RankedSet {
                    entries: found,
                    expires_at,
                },
            );
        }

        Ok(count)
    }
}

#[async_trait]
impl RankedResultCache for MemoryStore {
    async fn range_by_rank(
        &self,
        store_key: &str,
        start: u64,
        end: u64,
    ) -> Result<Vec<(String, f64)>> {
        let inner = self.inner.read().await;

        let Some(set) = inner.ranked.get(store_key).filter(|s| s.is_live(Instant::now())) else {
            return Ok(Vec::new());
        };
        if start > end {
            return Ok(Vec::new());
        }

        let take = usize::try_from((end - start).saturating_add(1)).unwrap_or(usize::MAX);
        let skip = usize::try_from(start).unwrap_or(usize::MAX);
        Ok(set.entries.iter().skip(skip).take(take).cloned().collect())
    }

    async fn remove_member(&self, store_key: &str, member_id: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let now = Instant::now();

        let Some(set) = inner.ranked.get_mut(store_key) else {
            return Ok(false);
        };
        if !set.is_live(now) {
            inner.ranked.remove(store_key);
            return Ok(false);
        }

        let before = set.entries.len();
        set.entries.retain(|(member, _)| member != member_id);
        let removed = set.entries.len() != before;

        // 与 Redis 一致：有序集合为空时键随之消失
        if set.entries.is_empty() {
            inner.ranked.remove(store_key);
        }

        Ok(removed)
    }
}
