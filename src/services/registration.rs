use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::cache::GeoIndexStore;
use crate::error::Result;
use crate::models::LocationRecord;

/// 位置上报，校验后直接写入GEO索引，不触碰附近的人缓存
pub struct RegistrationService {
    geo_index: Arc<dyn GeoIndexStore>,
    store_timeout: Duration,
}

impl RegistrationService {
    pub fn new(geo_index: Arc<dyn GeoIndexStore>, store_timeout: Duration) -> Self {
        Self {
            geo_index,
            store_timeout,
        }
    }

    pub async fn register(&self, member_id: &str, longitude: f64, latitude: f64) -> Result<()> {
        let record = LocationRecord::new(member_id, longitude, latitude)?;

        timeout(self.store_timeout, self.geo_index.upsert(&record)).await??;
        tracing::info!(
            "Registered location for {}: ({}, {})",
            record.member_id,
            record.longitude,
            record.latitude
        );
        Ok(())
    }
}
