use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::result::ApiResponse;
use crate::utils::error_codes;

#[derive(Debug, Error)]
pub enum NearbyError {
    #[error("invalid coordinate: longitude {longitude}, latitude {latitude}")]
    InvalidCoordinate { longitude: f64, latitude: f64 },

    #[error("member id must not be empty")]
    InvalidMemberId,

    #[error("member {0} has not registered a location")]
    MemberNotRegistered(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("invalid page request: {0}")]
    InvalidPageRequest(String),

    /// 半径查询已写入结果集，但移除自身失败
    #[error("failed to exclude {member} from its nearby set: {reason}")]
    PostProcessingFailure { member: String, reason: String },
}

pub type Result<T> = std::result::Result<T, NearbyError>;

impl From<redis::RedisError> for NearbyError {
    fn from(e: redis::RedisError) -> Self {
        NearbyError::StoreUnavailable(e.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for NearbyError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        NearbyError::StoreUnavailable("store operation timed out".to_string())
    }
}

impl NearbyError {
    pub fn status_and_code(&self) -> (StatusCode, i32) {
        match self {
            NearbyError::InvalidCoordinate { .. }
            | NearbyError::InvalidMemberId
            | NearbyError::InvalidPageRequest(_) => {
                (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR)
            }
            NearbyError::MemberNotRegistered(_) => {
                (StatusCode::NOT_FOUND, error_codes::MEMBER_NOT_REGISTERED)
            }
            NearbyError::StoreUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, error_codes::STORE_UNAVAILABLE)
            }
            NearbyError::PostProcessingFailure { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
            }
        }
    }
}

impl IntoResponse for NearbyError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = Json(ApiResponse::<()>::error(code, self.to_string()));

        (status, body).into_response()
    }
}
