// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 提取服务（extraction_service）：从HTML中提取标题、正文、图片和元数据
/// - 抓取服务（scrape_service）：获取页面并下载图片
/// - 发布服务（publish_service）：将文档转换为文章并远程发布
/// - 导出服务（export_service）：远程发布不可用时导出Markdown
pub mod export_service;
pub mod extraction_service;
pub mod publish_service;
pub mod scrape_service;
