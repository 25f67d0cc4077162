// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn article() -> Article {
    Article {
        title: "Title".into(),
        body: "Body".into(),
        status: ArticleStatus::Draft,
        publish_at: None,
        eyecatch: Some("https://cdn/x.jpg".into()),
        hashtags: Some(vec!["rust".into()]),
    }
}

#[tokio::test]
async fn test_create_article() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({
            "name": "Title",
            "body": "Body",
            "status": "draft",
            "publish_at": null,
            "eyecatch": "https://cdn/x.jpg",
            "hashtags": ["rust"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 42, "note_url": "https://note.com/u/n/nabc", "key": "nabc"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = NoteClient::new(&server.uri(), "tok").unwrap();
    let post = client.create_article(&article()).await.unwrap();

    assert_eq!(
        post,
        RemotePost {
            id: "42".into(),
            url: "https://note.com/u/n/nabc".into(),
            note_id: "nabc".into(),
        }
    );
}

#[tokio::test]
async fn test_upload_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"url": "https://assets.note.com/img/1.jpg"}
        })))
        .mount(&server)
        .await;

    let client = NoteClient::new(&format!("{}/", server.uri()), "tok").unwrap();
    let url = client
        .upload_image(Bytes::from_static(b"jpeg"), "image_0.jpg")
        .await
        .unwrap();
    assert_eq!(url, "https://assets.note.com/img/1.jpg");
}

#[tokio::test]
async fn test_rejection_surfaces_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "invalid token"})),
        )
        .mount(&server)
        .await;

    let client = NoteClient::new(&server.uri(), "bad").unwrap();
    let err = client.create_article(&article()).await.unwrap_err();

    match err {
        PublishError::Rejected { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid token");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_data_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = NoteClient::new(&server.uri(), "tok").unwrap();
    let err = client.create_article(&article()).await.unwrap_err();
    assert!(matches!(err, PublishError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_empty_token_is_unavailable_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = NoteClient::new(&server.uri(), "  ").unwrap();
    assert!(!client.is_available());
    assert!(matches!(
        client.create_article(&article()).await,
        Err(PublishError::Unavailable)
    ));

    client.update_token("fresh");
    assert!(client.is_available());
}
