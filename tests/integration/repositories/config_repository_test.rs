// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::setup_db;
use notepress::domain::repositories::config_repository::{
    ConfigRepository, NOTE_API_TOKEN_KEY, SCHEDULES_KEY,
};
use notepress::infrastructure::repositories::config_repo_impl::ConfigRepositoryImpl;

#[tokio::test]
async fn test_set_is_an_upsert() {
    let repo = ConfigRepositoryImpl::new(setup_db().await);

    assert_eq!(repo.get(NOTE_API_TOKEN_KEY).await.unwrap(), None);

    repo.set(NOTE_API_TOKEN_KEY, "first").await.unwrap();
    repo.set(NOTE_API_TOKEN_KEY, "second").await.unwrap();
    repo.set(SCHEDULES_KEY, "[]").await.unwrap();

    assert_eq!(
        repo.get(NOTE_API_TOKEN_KEY).await.unwrap().as_deref(),
        Some("second")
    );

    let all = repo.get_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[SCHEDULES_KEY], "[]");
}
