// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::setup_db;
use notepress::domain::models::task::TaskStatus;
use notepress::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use notepress::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;

#[tokio::test]
async fn test_create_starts_pending() {
    let repo = TaskRepositoryImpl::new(setup_db().await);

    let task = repo.create("https://example.com/a").await.unwrap();

    assert!(task.id > 0);
    assert_eq!(task.url, "https://example.com/a");
    assert_eq!(task.status, TaskStatus::Pending);
    assert!(task.completed_at.is_none());
    assert!(task.error_message.is_none());

    let found = repo.find_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(found.url, task.url);
    assert!(repo.find_by_id(task.id + 100).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_status_sets_completed_at_only_for_terminal_states() {
    let repo = TaskRepositoryImpl::new(setup_db().await);
    let task = repo.create("https://example.com/a").await.unwrap();

    repo.update_status(task.id, TaskStatus::Processing, None)
        .await
        .unwrap();
    let processing = repo.find_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(processing.status, TaskStatus::Processing);
    assert!(processing.completed_at.is_none());

    repo.update_status(task.id, TaskStatus::Failed, Some("boom".into()))
        .await
        .unwrap();
    let failed = repo.find_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(failed.status, TaskStatus::Failed);
    assert!(failed.completed_at.is_some());
    assert_eq!(failed.error_message.as_deref(), Some("boom"));
}

#[tokio::test]
async fn test_update_unknown_task_is_not_found() {
    let repo = TaskRepositoryImpl::new(setup_db().await);

    let result = repo.update_status(42, TaskStatus::Completed, None).await;

    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn test_find_all_filters_and_orders_newest_first() {
    let repo = TaskRepositoryImpl::new(setup_db().await);
    let first = repo.create("https://example.com/1").await.unwrap();
    let second = repo.create("https://example.com/2").await.unwrap();
    let third = repo.create("https://example.com/3").await.unwrap();
    repo.update_status(second.id, TaskStatus::Processing, None)
        .await
        .unwrap();
    repo.update_status(second.id, TaskStatus::Completed, None)
        .await
        .unwrap();

    let all = repo.find_all(None).await.unwrap();
    let ids: Vec<i32> = all.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);

    let completed = repo.find_all(Some(TaskStatus::Completed)).await.unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, second.id);

    let pending = repo.find_all(Some(TaskStatus::Pending)).await.unwrap();
    assert_eq!(pending.len(), 2);
}
