use axum::Json;
use serde::{Deserialize, Serialize};

use crate::result::ApiResponse;
use crate::utils::success_to_api_response;

/// Ping响应
#[derive(Debug, Serialize, Deserialize)]
pub struct PingResponse {
    /// 服务状态
    pub status: String,
    /// 服务器时间
    pub timestamp: i64,
}

/// 健康检查接口
pub async fn ping() -> Json<ApiResponse<PingResponse>> {
    success_to_api_response(PingResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
