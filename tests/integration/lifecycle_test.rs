// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use notepress::domain::models::task::TaskStatus;
use notepress::domain::repositories::post_history_repository::PostHistoryRepository;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE: &str = r#"
<html>
  <head>
    <title>Fallback</title>
    <meta property="og:title" content="Lifecycle Article">
    <meta name="author" content="Alice">
    <meta property="article:tag" content="rust">
  </head>
  <body>
    <nav>Menu</nav>
    <article>
      <p>First paragraph.</p>
      <img src="/img/photo.jpg" alt="Photo">
    </article>
  </body>
</html>
"#;

async fn page_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/img/photo.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFFu8, 0xD8, 0xFF]))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_scrape_and_post_to_remote() {
    let pages = page_server().await;
    let note = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"url": "https://assets.note.test/photo.jpg"}
        })))
        .expect(1)
        .mount(&note)
        .await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"id": 7, "note_url": "https://note.test/n/n7", "key": "n7"}
        })))
        .expect(1)
        .mount(&note)
        .await;

    let app = create_test_app(&note.uri(), "token").await;
    let task = app
        .context
        .scheduler
        .execute_scrape_and_post(&format!("{}/article", pages.uri()), true)
        .await
        .unwrap();

    assert_eq!(task.status, TaskStatus::Completed);

    let history = app.context.history_repo.find_recent(10).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].note_url, "https://note.test/n/n7");
    assert_eq!(history[0].note_id, "n7");
    assert_eq!(history[0].title, "Lifecycle Article");

    let requests = note.received_requests().await.unwrap();
    let create = requests
        .iter()
        .find(|r| r.url.path() == "/notes")
        .unwrap();
    let body: Value = serde_json::from_slice(&create.body).unwrap();
    assert_eq!(body["name"], "Lifecycle Article");
    assert_eq!(body["status"], "publish");
    assert_eq!(body["eyecatch"], "https://assets.note.test/photo.jpg");
    assert_eq!(body["hashtags"], json!(["rust"]));
    let text = body["body"].as_str().unwrap();
    assert!(text.starts_with("First paragraph."));
    assert!(text.contains("![Photo](https://assets.note.test/photo.jpg)"));
    assert!(text.contains("Author: Alice"));
}

#[tokio::test]
async fn test_remote_failure_exports_markdown() {
    let pages = page_server().await;
    let note = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "down"})))
        .mount(&note)
        .await;

    let app = create_test_app(&note.uri(), "token").await;
    let task = app
        .context
        .scheduler
        .execute_scrape_and_post(&format!("{}/article", pages.uri()), false)
        .await
        .unwrap();

    assert_eq!(task.status, TaskStatus::Completed);

    let history = app.context.history_repo.find_recent(10).await.unwrap();
    let file_name = history[0].note_url.strip_prefix("/exports/").unwrap();
    let markdown = std::fs::read_to_string(app.export_dir.path().join(file_name)).unwrap();
    assert!(markdown.starts_with("# Lifecycle Article\n"));
    assert!(markdown.contains("- Tags: rust"));
    assert!(history[0].note_id.starts_with("export-"));
}

#[tokio::test]
async fn test_unreachable_page_fails_task() {
    let pages = page_server().await;
    let note = MockServer::start().await;
    let app = create_test_app(&note.uri(), "").await;

    let task = app
        .context
        .scheduler
        .execute_scrape_and_post(&format!("{}/gone", pages.uri()), false)
        .await
        .unwrap();

    assert_eq!(task.status, TaskStatus::Failed);
    assert!(task.completed_at.is_some());
    assert!(task.error_message.unwrap().contains("404"));
    assert!(app.context.history_repo.find_recent(10).await.unwrap().is_empty());
    assert!(note.received_requests().await.unwrap().is_empty());
}
