// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 定时任务定义
///
/// 以JSON形式保存在配置存储中，启动时重新注册。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSpec {
    /// 唯一名称
    pub name: String,
    pub cron_expression: String,
    pub url: String,
    #[serde(default)]
    pub auto_publish: bool,
}
