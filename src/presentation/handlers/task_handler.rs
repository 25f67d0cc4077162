// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json, Path, Query};
use std::sync::Arc;

use crate::application::dto::{api_response::ApiResponse, query_request::TaskQueryDto};
use crate::domain::models::task::{ScrapingTask, TaskStatus};
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use crate::presentation::errors::{AppError, BadRequest};

/// 列出任务，按创建时间倒序
pub async fn list_tasks<T: TaskRepository>(
    Extension(task_repo): Extension<Arc<T>>,
    Query(query): Query<TaskQueryDto>,
) -> Result<Json<ApiResponse<Vec<ScrapingTask>>>, AppError> {
    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            raw.parse::<TaskStatus>()
                .map_err(|_| BadRequest(format!("Unknown task status '{}'", raw)))?,
        ),
        None => None,
    };

    let tasks = task_repo.find_all(status).await?;
    Ok(Json(ApiResponse::ok(tasks)))
}

/// 查询单个任务
pub async fn get_task<T: TaskRepository>(
    Extension(task_repo): Extension<Arc<T>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ScrapingTask>>, AppError> {
    let task = task_repo
        .find_by_id(id)
        .await?
        .ok_or(RepositoryError::NotFound)?;

    Ok(Json(ApiResponse::ok(task)))
}
