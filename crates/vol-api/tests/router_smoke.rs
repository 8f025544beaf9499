use axum::{body::Body, http::Request, http::StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

#[tokio::test]
async fn livez_healthy_and_suggestions_resolve() {
    let state = vol_api::test_state();
    let app = vol_api::create_router(state);

    let livez_response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/livez")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(livez_response.status(), StatusCode::OK);

    let suggestions = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/suggestions/execution")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(suggestions.status(), StatusCode::OK);
    let bytes = suggestions.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["topStrength"], "execution");
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 4);

    let unknown = app
        .oneshot(
            Request::builder()
                .uri("/api/suggestions/liderazgo")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn impact_analysis_unavailable_without_analyzer() {
    let state = vol_api::test_state();
    let app = vol_api::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/impact-analysis")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "participations": [], "opportunities": [] }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "service_unavailable");
}
