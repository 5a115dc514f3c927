use serde::{Deserialize, Serialize};

use crate::models::{NeighborEntry, PageRequest};

#[derive(Debug, Deserialize)]
pub struct RegisterLocationRequest {
    pub member_id: String,
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterLocationResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub member_id: String,
    pub page_index: u64,
    pub page_size: u64,
}

impl From<NearbyQuery> for PageRequest {
    fn from(query: NearbyQuery) -> Self {
        PageRequest::new(query.member_id, query.page_index, query.page_size)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NearbyMember {
    pub member_id: String,
    pub distance_km: f64,
}

impl From<NeighborEntry> for NearbyMember {
    fn from(entry: NeighborEntry) -> Self {
        Self {
            member_id: entry.member_id,
            distance_km: entry.distance,
        }
    }
}
