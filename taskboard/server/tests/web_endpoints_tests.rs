use axum::http::StatusCode;
use insta::assert_yaml_snapshot;
use serde_json::Value;

mod common;

use common::{HttpResponseSnapshot, setup};

#[tokio::test]
async fn can_check_health() {
    let mut client = setup().await.expect("Failed to set up test environment");

    let response = client.get("/health").await;

    let snapshot = HttpResponseSnapshot::new(&response, "health_check");
    assert_yaml_snapshot!(snapshot);
}

#[tokio::test]
async fn can_show_faq_to_anonymous_visitors() {
    let mut client = setup().await.expect("Failed to set up test environment");

    let response = client.get("/faq").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("href=\"/login\""));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let mut client = setup().await.expect("Failed to set up test environment");

    let response = client.get("/no_such_page").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn can_list_tasks_as_json() {
    let mut client = setup().await.expect("Failed to set up test environment");
    client.register("alice", "s3cret").await;
    client
        .post_form(
            "/add_task",
            "task_name=Write+report&user_name=alice&is_urgent=on&due_date=2025-09-30",
        )
        .await;
    client.clear_cookies();

    let response = client.get("/api/v1/tasks").await;

    assert_eq!(response.status, StatusCode::OK);
    let json: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(json["count"], 1);
    let task = &json["tasks"][0];
    assert_eq!(task["task_name"], "Write report");
    assert_eq!(task["status"], "In Progress");
    assert_eq!(task["is_urgent"], true);
    assert_eq!(task["created_by"], "alice");
}

#[tokio::test]
async fn can_serve_openapi_document() {
    let mut client = setup().await.expect("Failed to set up test environment");

    let response = client.get("/api/v1/openapi.json").await;

    assert_eq!(response.status, StatusCode::OK);
    let json: Value = serde_json::from_str(&response.body).unwrap();
    assert!(json["paths"]["/api/v1/tasks"]["get"].is_object());
    assert!(json["components"]["schemas"]["TaskJson"].is_object());
}
