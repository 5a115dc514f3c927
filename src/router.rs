use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;
use crate::middleware::log_errors;
use crate::routes;

// 附近的人相关的路由
pub fn geo_routes() -> Router<AppState> {
    Router::new()
        .route("/geo/locations", post(routes::geo::register_location))
        .route("/geo/nearby", get(routes::geo::list_nearby))
}

// 创建主路由，所有接口挂在 api_base_uri 之下
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/ping", get(routes::health::ping))
        .merge(geo_routes());

    let base = state.config.api_base_uri.trim_matches('/').to_string();
    let router = if base.is_empty() {
        api
    } else {
        Router::new().nest(&format!("/{}", base), api)
    };

    router
        .layer(axum::middleware::from_fn(log_errors))
        .with_state(state)
}
