// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::schedule::ScheduleSpec;

/// 定时任务注册请求
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequestDto {
    /// 定时任务名称，同名会替换
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// cron表达式，支持5段和6/7段
    #[validate(length(min = 1))]
    pub cron_expression: String,
    #[validate(url)]
    pub url: String,
    #[serde(default)]
    pub auto_publish: bool,
}

impl From<ScheduleRequestDto> for ScheduleSpec {
    fn from(dto: ScheduleRequestDto) -> Self {
        Self {
            name: dto.name,
            cron_expression: dto.cron_expression,
            url: dto.url,
            auto_publish: dto.auto_publish,
        }
    }
}
