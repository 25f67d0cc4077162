// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use validator::Validate;

/// 任务列表查询参数
#[derive(Debug, Deserialize)]
pub struct TaskQueryDto {
    /// 状态过滤：pending、processing、completed、failed
    pub status: Option<String>,
}

/// 发布历史查询参数
#[derive(Debug, Deserialize, Validate)]
pub struct HistoryQueryDto {
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u64>,
}
