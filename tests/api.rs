use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use nearby::{AppState, cache::MemoryStore, config::Config, router::create_router};

fn app() -> Router {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::with_stores(Config::default(), store.clone(), store);
    create_router(state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn register(
    app: &Router,
    member_id: &str,
    longitude: f64,
    latitude: f64,
) -> (StatusCode, Value) {
    let body = json!({
        "member_id": member_id,
        "longitude": longitude,
        "latitude": latitude,
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/geo/locations")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

async fn nearby(
    app: &Router,
    member_id: &str,
    page_index: u64,
    page_size: u64,
) -> (StatusCode, Value) {
    let req = Request::builder()
        .uri(format!(
            "/api/geo/nearby?member_id={member_id}&page_index={page_index}&page_size={page_size}"
        ))
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

#[tokio::test]
async fn register_then_list_nearby() {
    let app = app();
    for (member, lon, lat) in [("A", 0.0, 0.0), ("B", 0.0, 0.01), ("C", 10.0, 10.0)] {
        let (status, body) = register(&app, member, lon, lat).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], 0);
        assert_eq!(body["resp_data"]["success"], true);
    }

    let (status, body) = nearby(&app, "A", 1, 10).await;
    assert_eq!(status, StatusCode::OK);
    let members = body["resp_data"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["member_id"], "B");
    let distance = members[0]["distance_km"].as_f64().unwrap();
    assert!((distance - 1.112).abs() < 0.01);

    let (status, body) = nearby(&app, "A", 2, 10).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resp_data"], json!([]));
}

#[tokio::test]
async fn unregistered_member_is_not_found() {
    let app = app();
    let (status, body) = nearby(&app, "ghost", 1, 10).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1004);
    assert!(body.get("resp_data").is_none());
}

#[tokio::test]
async fn invalid_input_is_a_bad_request() {
    let app = app();
    let (status, body) = register(&app, "A", 200.0, 0.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1000);

    register(&app, "A", 0.0, 0.0).await;
    let (status, _) = nearby(&app, "A", 0, 10).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = nearby(&app, "A", 1, 0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_query_uses_error_envelope() {
    let app = app();
    for uri in [
        "/api/geo/nearby?member_id=A&page_index=-1&page_size=10",
        "/api/geo/nearby?member_id=A&page_size=10",
    ] {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 1000);
        assert!(body["msg"].as_str().unwrap().starts_with("invalid page request"));
    }
}

#[tokio::test]
async fn oversized_page_returns_every_neighbor() {
    let app = app();
    register(&app, "A", 0.0, 0.0).await;
    register(&app, "B", 0.0, 0.01).await;

    let (status, body) = nearby(&app, "A", 1, u64::MAX).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resp_data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn ping_reports_ok() {
    let app = app();
    let req = Request::builder().uri("/api/ping").body(Body::empty()).unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resp_data"]["status"], "ok");
}
