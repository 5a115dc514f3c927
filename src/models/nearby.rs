use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NearbyError, Result};
use crate::utils::is_valid_coordinate;

/// 用户位置记录，每个用户在GEO索引中只保留最后一次上报的位置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub member_id: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl LocationRecord {
    /// 在任何存储调用之前校验用户ID与经纬度
    pub fn new(member_id: &str, longitude: f64, latitude: f64) -> Result<Self> {
        if member_id.trim().is_empty() {
            return Err(NearbyError::InvalidMemberId);
        }
        if !is_valid_coordinate(longitude, latitude) {
            return Err(NearbyError::InvalidCoordinate {
                longitude,
                latitude,
            });
        }

        Ok(Self {
            member_id: member_id.to_string(),
            longitude,
            latitude,
        })
    }
}

/// 附近的人，距离单位千米
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborEntry {
    pub member_id: String,
    pub distance: f64,
}

impl From<(String, f64)> for NeighborEntry {
    fn from((member_id, distance): (String, f64)) -> Self {
        Self {
            member_id,
            distance,
        }
    }
}

pub type NeighborPage = Vec<NeighborEntry>;

/// 分页请求，page_index 从1开始
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub member_id: String,
    pub page_index: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(member_id: impl Into<String>, page_index: u64, page_size: u64) -> Self {
        Self {
            member_id: member_id.into(),
            page_index,
            page_size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.member_id.trim().is_empty() {
            return Err(NearbyError::InvalidMemberId);
        }
        if self.page_index < 1 {
            return Err(NearbyError::InvalidPageRequest(
                "page_index must be at least 1".to_string(),
            ));
        }
        if self.page_size < 1 {
            return Err(NearbyError::InvalidPageRequest(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// 第一页会重新执行半径查询并刷新有序集合
    pub fn is_first_page(&self) -> bool {
        self.page_index == 1
    }

    /// 计算从0开始的闭区间排名 [start, end]
    pub fn rank_range(&self) -> Result<(u64, u64)> {
        self.validate()?;

        let overflow = || NearbyError::InvalidPageRequest("page range overflows".to_string());
        let start = (self.page_index - 1)
            .checked_mul(self.page_size)
            .ok_or_else(overflow)?;
        let end = self
            .page_index
            .checked_mul(self.page_size)
            .ok_or_else(overflow)?
            - 1;

        Ok((start, end))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// 半径查询并把 (成员, 距离) 写入 `store_key` 对应的有序集合
#[derive(Debug, Clone)]
pub struct RadiusQuery<'a> {
    pub member_id: &'a str,
    pub radius_km: f64,
    pub limit: u64,
    pub order: SortOrder,
    pub store_key: &'a str,
    pub ttl: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_range_follows_page_arithmetic() {
        assert_eq!(PageRequest::new("a", 1, 10).rank_range().unwrap(), (0, 9));
        assert_eq!(PageRequest::new("a", 3, 5).rank_range().unwrap(), (10, 14));
        assert_eq!(PageRequest::new("a", 2, 1).rank_range().unwrap(), (1, 1));
    }

    #[test]
    fn rejects_zero_page_index_and_size() {
        assert!(matches!(
            PageRequest::new("a", 0, 10).validate(),
            Err(NearbyError::InvalidPageRequest(_))
        ));
        assert!(matches!(
            PageRequest::new("a", 1, 0).validate(),
            Err(NearbyError::InvalidPageRequest(_))
        ));
        assert!(matches!(
            PageRequest::new("  ", 1, 10).validate(),
            Err(NearbyError::InvalidMemberId)
        ));
    }

    #[test]
    fn rank_range_overflow_is_a_page_error() {
        let request = PageRequest::new("a", u64::MAX, 2);
        assert!(matches!(
            request.rank_range(),
            Err(NearbyError::InvalidPageRequest(_))
        ));
    }

    #[test]
    fn location_record_validates_input() {
        assert!(LocationRecord::new("a", 116.48105, 39.996794).is_ok());
        assert!(matches!(
            LocationRecord::new("a", 181.0, 0.0),
            Err(NearbyError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            LocationRecord::new("", 0.0, 0.0),
            Err(NearbyError::InvalidMemberId)
        ));
    }
}
