// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 运行时配置写入请求
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ConfigUpdateDto {
    #[validate(length(min = 1, max = 200))]
    pub key: String,
    pub value: String,
}
