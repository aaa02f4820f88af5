//! Router tests for the HTTP surface

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use fitagg::config::Config;
use fitagg::data::{AdviceSlipClient, SimilarMuscles};
use fitagg::server::{build_router, AppState};
use fitagg::FitnessService;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_router(server: &MockServer) -> Router {
    let config = Config {
        base_url: format!("{}/api/v2", server.uri()),
        similar_file: "does-not-exist.json".into(),
        ..Config::default()
    };
    let service = FitnessService::new(config).unwrap();
    assert_eq!(service.similar_muscles(), &SimilarMuscles::default());
    let advice = AdviceSlipClient::new(format!("{}/advice", server.uri())).unwrap();
    build_router(AppState::new(Arc::new(service), advice))
}

async fn send(router: Router, method: Method, uri: &str) -> (StatusCode, Option<String>, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, location, body)
}

fn empty_page() -> Value {
    json!({"count": 0, "next": null, "previous": null, "results": []})
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let (status, _, body) = send(create_router(&server), Method::GET, "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "fitagg");
    assert!(body["uptime"].as_str().unwrap().ends_with('s'));
}

#[tokio::test]
async fn test_list_muscles_with_and_without_slash() {
    let server = MockServer::start().await;
    for uri in ["/exercises", "/exercises/"] {
        let (status, _, body) = send(create_router(&server), Method::GET, uri).await;
        assert_eq!(status, StatusCode::OK);
        let muscles = body["muscles"].as_array().unwrap();
        assert!(muscles.contains(&json!("chest")));
        assert!(muscles.contains(&json!("back")));
    }
}

#[tokio::test]
async fn test_get_exercises_returns_enriched_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/exercise/"))
        .and(query_param("muscles", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{
                "id": 1,
                "name": "Bench Press",
                "description": "<p>Press.</p>",
                "category": 11,
                "muscles": [4],
                "muscles_secondary": [5],
                "equipment": [1]
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/exercise/"))
        .and(query_param("muscles_secondary", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .mount(&server)
        .await;

    // Non-numeric limit is treated as absent
    let (status, _, body) =
        send(create_router(&server), Method::GET, "/exercises/Chest?limit=abc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["muscle"], "chest");
    assert_eq!(body["exercises"][0]["description"], "Press.");
    assert_eq!(body["exercises"][0]["musclesSecondary"], json!([5]));
    assert_eq!(body["similarMuscles"], json!(["triceps", "shoulders"]));
    assert!(body["advice"].as_str().unwrap().contains("warm-up"));
}

#[tokio::test]
async fn test_percent_encoded_muscle_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/exercise/"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .expect(2)
        .mount(&server)
        .await;

    let (status, _, body) =
        send(create_router(&server), Method::GET, "/exercises/lower%20back?limit=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["muscle"], "lower back");
    assert_eq!(body["similarMuscles"], json!([]));
}

#[tokio::test]
async fn test_unknown_muscle_is_not_found() {
    let server = MockServer::start().await;
    let (status, _, body) = send(create_router(&server), Method::GET, "/exercises/wings").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "unknown_muscle");
    assert!(body["error"].as_str().unwrap().contains("biceps"));
}

#[tokio::test]
async fn test_upstream_failure_is_service_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/exercise/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (status, _, body) = send(create_router(&server), Method::GET, "/exercises/chest").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["kind"], "upstream_error");
}

#[tokio::test]
async fn test_unknown_routes_redirect_to_exercises() {
    let server = MockServer::start().await;

    let (status, location, _) = send(create_router(&server), Method::GET, "/nowhere").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/exercises"));

    let (status, location, _) = send(create_router(&server), Method::POST, "/nowhere").await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location.as_deref(), Some("/exercises"));
}

#[tokio::test]
async fn test_advice_of_the_day() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/advice"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"slip": {"id": 7, "advice": "Sleep well."}}"#)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let (status, _, body) = send(create_router(&server), Method::GET, "/advice").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["advice"], "Sleep well.");
}

#[tokio::test]
async fn test_advice_falls_back_when_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/advice"))
        .respond_with(ResponseTemplate::new(500).set_delay(Duration::from_millis(10)))
        .mount(&server)
        .await;

    let (status, _, body) = send(create_router(&server), Method::GET, "/advice").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["advice"], "no advice for today");
}
