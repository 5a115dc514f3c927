use std::time::Instant;

use axum::{
    body::{Body, to_bytes},
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use tracing::{debug, error};

/// 错误响应体最多读取的字节数
const MAX_LOGGED_BODY: usize = 4096;

/// 记录每个请求的耗时，5xx 时把响应体一并写入错误日志
pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;
    let status = response.status();
    debug!(
        "{} {} -> {} in {:?}",
        method,
        path,
        status,
        started.elapsed()
    );

    if !status.is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(b) => b,
        Err(e) => {
            error!("{} {} -> {}, unreadable body: {}", method, path, status, e);
            parts.headers.remove(header::CONTENT_LENGTH);
            return Response::from_parts(parts, Body::empty());
        }
    };

    error!(
        "{} {} -> {}: {}",
        method,
        path,
        status,
        String::from_utf8_lossy(&bytes)
    );

    Response::from_parts(parts, Body::from(bytes))
}
