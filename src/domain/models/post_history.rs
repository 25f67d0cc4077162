// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 发布历史
///
/// 每次成功发布写入一条，之后不再修改。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostHistory {
    pub id: i32,
    /// 关联的抓取任务ID
    pub task_id: i32,
    pub note_url: String,
    pub note_id: String,
    pub title: String,
    pub posted_at: DateTime<Utc>,
}
