use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use configuration::DatabaseSettings;
use core_types::{ContactRequestInput, ContentSource};
use database::{connect_lazy, DbRepository};
use std::sync::Arc;
use tower::ServiceExt;
use web_server::extract::Payload;
use web_server::{handlers, router, AppState};

/// State whose store refuses every connection.
fn offline_state() -> Arc<AppState> {
    let settings = DatabaseSettings {
        host: "127.0.0.1".into(),
        port: 1,
        username: "postgres".into(),
        password: String::new(),
        database_name: "gridvault".into(),
        pool_size: 1,
        acquire_timeout_secs: 1,
    };
    Arc::new(AppState::new(DbRepository::new(connect_lazy(&settings))))
}

#[tokio::test]
async fn list_endpoints_answer_from_the_catalog_when_offline() {
    let state = offline_state();

    let Json(solutions) = handlers::get_solutions(State(state.clone())).await;
    assert_eq!(solutions.source, ContentSource::Static);
    assert_eq!(solutions.items.len(), 5);

    let Json(featured) = handlers::get_featured_products(State(state)).await;
    assert!(featured.items.iter().all(|p| p.is_featured));
}

#[tokio::test]
async fn detail_endpoints_report_an_outage_as_a_server_error() {
    let state = offline_state();

    let error = handlers::get_solution(Path("microgrids".to_string()), State(state))
        .await
        .unwrap_err();

    assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn invalid_contact_requests_are_rejected_before_the_store() {
    let state = offline_state();
    let input = ContactRequestInput {
        name: "Ana".into(),
        email: "not-an-address".into(),
        company: None,
        phone: None,
        message: "Please send a quote.".into(),
    };

    let error = handlers::submit_contact(State(state), Payload(input)).await.unwrap_err();

    assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn admin_write_missing_a_required_field_is_rejected_with_the_envelope() {
    let app = router(offline_state());

    let response = app
        .oneshot(post_json("/api/admin/products", r#"{"slug":"gridcube"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("name"), "{body}");
}

#[tokio::test]
async fn contact_form_without_an_email_is_rejected_with_the_envelope() {
    let app = router(offline_state());

    let response = app
        .oneshot(post_json("/api/contact", r#"{"name":"Ana","message":"Quote please"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["success"], false);
}

#[tokio::test]
async fn admin_write_that_fails_validation_is_a_bad_request() {
    let app = router(offline_state());

    let response = app
        .oneshot(post_json("/api/admin/products", r#"{"name":"GridCube","slug":"Not A Slug"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("slug"), "{body}");
}
