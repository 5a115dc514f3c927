use async_trait::async_trait;

use crate::error::Result;
use crate::models::{LocationRecord, RadiusQuery};

/// 全局GEO索引
#[async_trait]
pub trait GeoIndexStore: Send + Sync {
    /// 写入或覆盖成员坐标
    async fn upsert(&self, record: &LocationRecord) -> Result<()>;

    /// 以成员当前位置为中心做半径查询，按距离排序后整体写入 `query.store_key`，
    /// 覆盖旧集合。写入要么全部完成要么不发生。返回写入的成员数（包含查询者自身），
    /// 成员不存在时返回 `MemberNotRegistered`。
    async fn query_within_radius(&self, query: &RadiusQuery<'_>) -> Result<u64>;
}

/// 按距离升序排列的附近的人有序集合
#[async_trait]
pub trait RankedResultCache: Send + Sync {
    /// 从0开始的闭区间排名读取；键不存在或越界时返回空列表
    async fn range_by_rank(
        &self,
        store_key: &str,
        start: u64,
        end: u64,
    ) -> Result<Vec<(String, f64)>>;

    /// 幂等删除，成员不存在时返回 false
    async fn remove_member(&self, store_key: &str, member_id: &str) -> Result<bool>;
}
