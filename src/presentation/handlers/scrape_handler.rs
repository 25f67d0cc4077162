// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::anyhow;
use axum::extract::{Extension, Json};
use std::sync::Arc;
use validator::Validate;

use crate::application::dto::{api_response::ApiResponse, scrape_request::ScrapeRequestDto};
use crate::domain::models::task::{ScrapingTask, TaskStatus};
use crate::presentation::errors::AppError;
use crate::queue::scheduler::TaskScheduler;

/// 立即执行一次抓取并发布
///
/// 等待任务结束后返回，`success` 反映任务是否完成
pub async fn create_scrape(
    Extension(scheduler): Extension<Arc<TaskScheduler>>,
    Json(payload): Json<ScrapeRequestDto>,
) -> Result<Json<ApiResponse<ScrapingTask>>, AppError> {
    payload.validate()?;

    let task = scheduler
        .execute_scrape_and_post(&payload.url, payload.auto_publish)
        .await
        .ok_or_else(|| anyhow!("Failed to record scraping task"))?;

    let response = if task.status == TaskStatus::Completed {
        ApiResponse::with_message(true, "Scrape and post completed", Some(task))
    } else {
        let message = task
            .error_message
            .clone()
            .unwrap_or_else(|| "Scrape and post failed".to_string());
        ApiResponse::with_message(false, message, Some(task))
    };

    Ok(Json(response))
}
