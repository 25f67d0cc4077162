// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::post_history::PostHistory;
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;

/// 默认的发布历史查询条数
pub const DEFAULT_HISTORY_LIMIT: u64 = 50;

/// 发布历史仓库特质
///
/// 发布历史只追加，不提供更新或删除
#[async_trait]
pub trait PostHistoryRepository: Send + Sync {
    /// 追加一条发布记录
    async fn create(
        &self,
        task_id: i32,
        note_url: &str,
        note_id: &str,
        title: &str,
    ) -> Result<PostHistory, RepositoryError>;
    /// 按发布时间倒序获取最近的记录
    async fn find_recent(&self, limit: u64) -> Result<Vec<PostHistory>, RepositoryError>;
}
