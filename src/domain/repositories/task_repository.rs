// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{ScrapingTask, TaskStatus};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 数据序列化错误
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 任务仓库特质
///
/// 定义抓取任务数据访问接口
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// 以Pending状态创建新任务
    async fn create(&self, url: &str) -> Result<ScrapingTask, RepositoryError>;
    /// 根据ID查找任务
    async fn find_by_id(&self, id: i32) -> Result<Option<ScrapingTask>, RepositoryError>;
    /// 按创建时间倒序列出任务，可按状态过滤
    async fn find_all(
        &self,
        status: Option<TaskStatus>,
    ) -> Result<Vec<ScrapingTask>, RepositoryError>;
    /// 更新任务状态
    ///
    /// 进入终态时写入完成时间
    async fn update_status(
        &self,
        id: i32,
        status: TaskStatus,
        error_message: Option<String>,
    ) -> Result<(), RepositoryError>;
}
