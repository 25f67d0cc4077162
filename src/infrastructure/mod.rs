// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 包含的子模块：
/// - 数据库（database）：数据库连接和实体映射
/// - 指标（metrics）：Prometheus指标导出
/// - 远程发布客户端（note_client）：note API的HTTP实现
/// - 仓库实现（repositories）：领域仓库接口的具体实现
/// - 存储（storage）：导出文件的本地存储
pub mod database;
pub mod metrics;
pub mod note_client;
pub mod repositories;
pub mod storage;
