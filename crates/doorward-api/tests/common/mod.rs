//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use doorward_access::application::registry::AccessRegistry;
use doorward_access::domain::policy::DefaultPinPolicy;
use doorward_api::effects::TracingEffects;
use doorward_api::routes;
use doorward_api::state::AppState;
use doorward_test_support::{FixedClock, SequenceRng};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build fresh application state with the default fixed-PIN policy.
pub fn test_state() -> AppState {
    test_state_with(DefaultPinPolicy::default(), SequenceRng::new(vec![]))
}

/// Build fresh application state with a custom policy and RNG.
pub fn test_state_with(policy: DefaultPinPolicy, rng: SequenceRng) -> AppState {
    AppState::new(
        Arc::new(AccessRegistry::new(policy, Box::new(rng))),
        Arc::new(FixedClock::default()),
        Arc::new(TracingEffects),
    )
}

/// Build the full app router over `state`. Uses the same route structure
/// as `main.rs`.
pub fn build_test_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/doors", routes::doors::router())
        .with_state(state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
