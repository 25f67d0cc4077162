// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 抓取文档（document）：一次抓取得到的结构化内容
/// - 文章（article）：由文档转换出的待发布文章及发布结果
/// - 任务（task）：一次抓取并发布尝试的持久化记录
/// - 发布历史（post_history）：成功发布的记录
/// - 定时任务（schedule）：命名的周期触发器定义
pub mod article;
pub mod document;
pub mod post_history;
pub mod schedule;
pub mod task;
