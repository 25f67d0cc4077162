// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP处理器模块
pub mod config_handler;
pub mod history_handler;
pub mod schedule_handler;
pub mod scrape_handler;
pub mod task_handler;
