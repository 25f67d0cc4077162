// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use notepress::domain::repositories::config_repository::{ConfigRepository, SCHEDULES_KEY};
use notepress::domain::services::publish_service::NoteApi;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn page_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><head><title>Api Post</title></head><body><main>Hello api</main></body></html>",
        ))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_health_and_version() {
    let app = create_test_app("http://127.0.0.1:9", "").await;
    let server = app.server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");

    server.get("/v1/version").await.assert_status_ok();
}

#[tokio::test]
async fn test_scrape_then_query_tasks_history_and_export() {
    let pages = page_server().await;
    let app = create_test_app("http://127.0.0.1:9", "").await;
    let server = app.server();

    let response = server
        .post("/api/scrape")
        .json(&json!({"url": format!("{}/post", pages.uri())}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "completed");
    let id = body["data"]["id"].as_i64().unwrap();

    let tasks: Value = server.get("/api/tasks").await.json();
    assert_eq!(tasks["data"].as_array().unwrap().len(), 1);

    let completed: Value = server
        .get("/api/tasks")
        .add_query_param("status", "completed")
        .await
        .json();
    assert_eq!(completed["data"].as_array().unwrap().len(), 1);

    let task: Value = server.get(&format!("/api/tasks/{}", id)).await.json();
    assert_eq!(task["data"]["url"], format!("{}/post", pages.uri()));

    server
        .get("/api/tasks/9999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/api/tasks")
        .add_query_param("status", "bogus")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let history: Value = server.get("/api/history").await.json();
    let entries = history["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["title"], "Api Post");

    let export_url = entries[0]["noteUrl"].as_str().unwrap().to_string();
    let export = server.get(&export_url).await;
    export.assert_status_ok();
    assert!(export.text().starts_with("# Api Post\n"));
}

#[tokio::test]
async fn test_scrape_failure_is_reported() {
    let pages = MockServer::start().await;
    let app = create_test_app("http://127.0.0.1:9", "").await;
    let server = app.server();

    let response = server
        .post("/api/scrape")
        .json(&json!({"url": format!("{}/missing", pages.uri()), "autoPublish": true}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["status"], "failed");
    assert!(body["message"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn test_scrape_rejects_invalid_url() {
    let app = create_test_app("http://127.0.0.1:9", "").await;
    let server = app.server();

    server
        .post("/api/scrape")
        .json(&json!({"url": "not a url"}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .get("/api/history")
        .add_query_param("limit", "0")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_schedule_lifecycle_is_persisted() {
    let app = create_test_app("http://127.0.0.1:9", "").await;
    let server = app.server();

    server
        .post("/api/schedule")
        .json(&json!({
            "name": "daily",
            "cronExpression": "0 9 * * *",
            "url": "https://example.com/feed"
        }))
        .await
        .assert_status_ok();

    let names: Value = server.get("/api/schedule").await.json();
    assert_eq!(names["data"], json!(["daily"]));

    let saved = app
        .context
        .config_repo
        .get(SCHEDULES_KEY)
        .await
        .unwrap()
        .unwrap();
    let saved: Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved[0]["name"], "daily");
    assert_eq!(saved[0]["cronExpression"], "0 9 * * *");

    server
        .post("/api/schedule")
        .json(&json!({
            "name": "daily",
            "cronExpression": "not cron",
            "url": "https://example.com/feed"
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(app.context.scheduler.active_tasks(), vec!["daily"]);

    server.delete("/api/schedule/daily").await.assert_status_ok();
    server.delete("/api/schedule/unknown").await.assert_status_ok();
    assert!(app.context.scheduler.active_tasks().is_empty());

    let saved = app.context.config_repo.get(SCHEDULES_KEY).await.unwrap();
    assert_eq!(saved.as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_config_updates_token_at_runtime() {
    let app = create_test_app("http://127.0.0.1:9", "").await;
    let server = app.server();
    assert!(!app.context.note_client.is_available());

    server
        .post("/api/config")
        .json(&json!({"key": "NOTE_API_TOKEN", "value": "secret"}))
        .await
        .assert_status_ok();
    server
        .post("/api/config")
        .json(&json!({"key": "theme", "value": "dark"}))
        .await
        .assert_status_ok();

    assert!(app.context.note_client.is_available());

    let config: Value = server.get("/api/config").await.json();
    assert_eq!(config["data"]["NOTE_API_TOKEN"], "********");
    assert_eq!(config["data"]["theme"], "dark");
}
