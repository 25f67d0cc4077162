// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 立即抓取请求
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequestDto {
    /// 要抓取的网页URL
    #[validate(url)]
    pub url: String,
    /// 是否直接发布，默认保存为草稿
    #[serde(default)]
    pub auto_publish: bool,
}
