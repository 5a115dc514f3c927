use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::AppState;
use crate::error::NearbyError;
use crate::models::PageRequest;
use crate::result::ApiResponse;
use crate::utils::success_to_api_response;

use super::model::{NearbyMember, NearbyQuery, RegisterLocationRequest, RegisterLocationResponse};

/// 上报用户位置
#[axum::debug_handler]
pub async fn register_location(
    State(state): State<AppState>,
    Json(req): Json<RegisterLocationRequest>,
) -> Result<Json<ApiResponse<RegisterLocationResponse>>, NearbyError> {
    state
        .registration
        .register(&req.member_id, req.longitude, req.latitude)
        .await?;

    Ok(success_to_api_response(RegisterLocationResponse {
        success: true,
    }))
}

/// 分页查询附近的人
#[axum::debug_handler]
pub async fn list_nearby(
    State(state): State<AppState>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<NearbyMember>>>, NearbyError> {
    // 参数缺失或无法解析时也返回统一的错误结构
    let Query(query) = query.map_err(|e| NearbyError::InvalidPageRequest(e.body_text()))?;
    let request = PageRequest::from(query);
    let page = state.nearby.list_nearby(&request).await.inspect_err(|e| {
        tracing::warn!("Nearby query for {} failed: {}", request.member_id, e);
    })?;

    Ok(success_to_api_response(
        page.into_iter().map(NearbyMember::from).collect(),
    ))
}
