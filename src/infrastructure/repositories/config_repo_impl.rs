// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::config_repository::ConfigRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::app_config as config_entity;
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use std::collections::BTreeMap;
use std::sync::Arc;

/// 运行时配置仓库实现
///
/// 简单的键值表，保存发布凭证和已保存的定时任务
#[derive(Clone)]
pub struct ConfigRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ConfigRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ConfigRepository for ConfigRepositoryImpl {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let model = config_entity::Entity::find_by_id(key.to_string())
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(|m| m.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let model = config_entity::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
        };

        config_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::column(config_entity::Column::Key)
                    .update_column(config_entity::Column::Value)
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        Ok(())
    }

    async fn get_all(&self) -> Result<BTreeMap<String, String>, RepositoryError> {
        let models = config_entity::Entity::find().all(self.db.as_ref()).await?;

        Ok(models.into_iter().map(|m| (m.key, m.value)).collect())
    }
}
