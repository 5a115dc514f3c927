use axum::Json;
use serde::Serialize;

use crate::result::ApiResponse;

/// 地球平均半径（千米），与 Redis GEO 命令使用的值一致
pub const EARTH_RADIUS_KM: f64 = 6372.797_560_856;

pub fn success_to_api_response<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// 经度范围 [-180, 180]，纬度范围 [-90, 90]
pub fn is_valid_coordinate(longitude: f64, latitude: f64) -> bool {
    (-180.0..=180.0).contains(&longitude) && (-90.0..=90.0).contains(&latitude)
}

/// 半正矢公式计算两点间距离，单位千米
pub fn calculate_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let lat1_r = lat1.to_radians();
    let lat2_r = lat2.to_radians();
    let u = ((lat2 - lat1).to_radians() / 2.0).sin();
    let v = ((lon2 - lon1).to_radians() / 2.0).sin();
    let a = u * u + lat1_r.cos() * lat2_r.cos() * v * v;
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

pub mod error_codes {
    pub const SUCCESS: i32 = 0;
    pub const VALIDATION_ERROR: i32 = 1000;
    pub const MEMBER_NOT_REGISTERED: i32 = 1004;
    pub const STORE_UNAVAILABLE: i32 = 5001;
    pub const INTERNAL_ERROR: i32 = 5000;
}
