// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::setup_db;
use notepress::domain::repositories::post_history_repository::PostHistoryRepository;
use notepress::domain::repositories::task_repository::TaskRepository;
use notepress::infrastructure::repositories::post_history_repo_impl::PostHistoryRepositoryImpl;
use notepress::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;

#[tokio::test]
async fn test_create_and_find_recent() {
    let db = setup_db().await;
    let tasks = TaskRepositoryImpl::new(db.clone());
    let history = PostHistoryRepositoryImpl::new(db);

    let task = tasks.create("https://example.com/a").await.unwrap();
    for i in 0..3 {
        let post = history
            .create(
                task.id,
                &format!("https://note.com/u/n/{i}"),
                &format!("n{i}"),
                &format!("Title {i}"),
            )
            .await
            .unwrap();
        assert_eq!(post.task_id, task.id);
    }

    let recent = history.find_recent(2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].note_id, "n2");
    assert_eq!(recent[1].note_id, "n1");
    assert_eq!(recent[0].title, "Title 2");

    assert_eq!(history.find_recent(50).await.unwrap().len(), 3);
}
