// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// 远程发布令牌的配置键
pub const NOTE_API_TOKEN_KEY: &str = "NOTE_API_TOKEN";
/// 已保存定时任务的配置键
pub const SCHEDULES_KEY: &str = "schedules";

/// 运行时配置仓库特质
///
/// 简单的字符串键值存储
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;
    /// 写入配置，已存在则覆盖
    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError>;
    async fn get_all(&self) -> Result<BTreeMap<String, String>, RepositoryError>;
}
