// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 控制接口的请求与响应结构，请求体使用validator校验
pub mod api_response;
pub mod config_request;
pub mod query_request;
pub mod schedule_request;
pub mod scrape_request;
