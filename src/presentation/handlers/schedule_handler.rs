// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json, Path};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::application::dto::{api_response::ApiResponse, schedule_request::ScheduleRequestDto};
use crate::domain::models::schedule::ScheduleSpec;
use crate::domain::repositories::config_repository::ConfigRepository;
use crate::presentation::errors::AppError;
use crate::queue::scheduler::TaskScheduler;

/// 注册或替换定时任务，并保存当前的定时任务列表
pub async fn create_schedule<C: ConfigRepository>(
    Extension(scheduler): Extension<Arc<TaskScheduler>>,
    Extension(config_repo): Extension<Arc<C>>,
    Json(payload): Json<ScheduleRequestDto>,
) -> Result<Json<ApiResponse<ScheduleSpec>>, AppError> {
    payload.validate()?;

    let spec: ScheduleSpec = payload.into();
    scheduler.schedule(spec.clone())?;
    scheduler.persist(config_repo.as_ref()).await?;

    let message = format!("Scheduled task '{}'", spec.name);
    Ok(Json(ApiResponse::with_message(true, message, Some(spec))))
}

/// 停止定时任务，名称不存在时同样返回成功
pub async fn delete_schedule<C: ConfigRepository>(
    Extension(scheduler): Extension<Arc<TaskScheduler>>,
    Extension(config_repo): Extension<Arc<C>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let message = if scheduler.stop(&name) {
        scheduler.persist(config_repo.as_ref()).await?;
        format!("Stopped scheduled task '{}'", name)
    } else {
        info!("No scheduled task named '{}'", name);
        format!("No scheduled task named '{}'", name)
    };

    Ok(Json(ApiResponse::with_message(true, message, None)))
}

/// 当前活跃的定时任务名称
pub async fn list_schedules(
    Extension(scheduler): Extension<Arc<TaskScheduler>>,
) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse::ok(scheduler.active_tasks()))
}
