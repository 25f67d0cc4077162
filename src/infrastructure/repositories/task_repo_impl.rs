// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::task::{ScrapingTask, TaskStatus};
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use crate::infrastructure::database::entities::scraping_task as task_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;

/// 任务仓库实现
///
/// 基于SeaORM实现的任务数据访问层
#[derive(Clone)]
pub struct TaskRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl TaskRepositoryImpl {
    /// 创建新的任务仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的任务仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<task_entity::Model> for ScrapingTask {
    fn from(model: task_entity::Model) -> Self {
        Self {
            id: model.id,
            url: model.url,
            status: model.status.parse().unwrap_or_default(),
            created_at: model.created_at,
            completed_at: model.completed_at,
            error_message: model.error_message,
        }
    }
}

#[async_trait]
impl TaskRepository for TaskRepositoryImpl {
    async fn create(&self, url: &str) -> Result<ScrapingTask, RepositoryError> {
        let model = task_entity::ActiveModel {
            url: Set(url.to_string()),
            status: Set(TaskStatus::Pending.to_string()),
            created_at: Set(Utc::now()),
            completed_at: Set(None),
            error_message: Set(None),
            ..Default::default()
        };

        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ScrapingTask>, RepositoryError> {
        let model = task_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_all(
        &self,
        status: Option<TaskStatus>,
    ) -> Result<Vec<ScrapingTask>, RepositoryError> {
        let mut query = task_entity::Entity::find();
        if let Some(status) = status {
            query = query.filter(task_entity::Column::Status.eq(status.to_string()));
        }

        let models = query
            .order_by_desc(task_entity::Column::CreatedAt)
            .order_by_desc(task_entity::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update_status(
        &self,
        id: i32,
        status: TaskStatus,
        error_message: Option<String>,
    ) -> Result<(), RepositoryError> {
        let model = task_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active: task_entity::ActiveModel = model.into();
        active.status = Set(status.to_string());
        if status.is_terminal() {
            active.completed_at = Set(Some(Utc::now()));
        }
        if error_message.is_some() {
            active.error_message = Set(error_message);
        }

        active.update(self.db.as_ref()).await?;
        Ok(())
    }
}
