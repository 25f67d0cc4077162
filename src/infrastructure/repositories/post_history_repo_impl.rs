// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::post_history::PostHistory;
use crate::domain::repositories::post_history_repository::PostHistoryRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::post_history as history_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};
use std::sync::Arc;

/// 发布历史仓库实现
#[derive(Clone)]
pub struct PostHistoryRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl PostHistoryRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<history_entity::Model> for PostHistory {
    fn from(model: history_entity::Model) -> Self {
        Self {
            id: model.id,
            task_id: model.task_id,
            note_url: model.note_url,
            note_id: model.note_id,
            title: model.title,
            posted_at: model.posted_at,
        }
    }
}

#[async_trait]
impl PostHistoryRepository for PostHistoryRepositoryImpl {
    async fn create(
        &self,
        task_id: i32,
        note_url: &str,
        note_id: &str,
        title: &str,
    ) -> Result<PostHistory, RepositoryError> {
        let model = history_entity::ActiveModel {
            task_id: Set(task_id),
            note_url: Set(note_url.to_string()),
            note_id: Set(note_id.to_string()),
            title: Set(title.to_string()),
            posted_at: Set(Utc::now()),
            ..Default::default()
        };

        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(inserted.into())
    }

    async fn find_recent(&self, limit: u64) -> Result<Vec<PostHistory>, RepositoryError> {
        let models = history_entity::Entity::find()
            .order_by_desc(history_entity::Column::PostedAt)
            .order_by_desc(history_entity::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
