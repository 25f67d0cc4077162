// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json, Query};
use std::sync::Arc;
use validator::Validate;

use crate::application::dto::{api_response::ApiResponse, query_request::HistoryQueryDto};
use crate::domain::models::post_history::PostHistory;
use crate::domain::repositories::post_history_repository::{
    PostHistoryRepository, DEFAULT_HISTORY_LIMIT,
};
use crate::presentation::errors::AppError;

/// 最近的发布历史
pub async fn get_history<H: PostHistoryRepository>(
    Extension(history_repo): Extension<Arc<H>>,
    Query(query): Query<HistoryQueryDto>,
) -> Result<Json<ApiResponse<Vec<PostHistory>>>, AppError> {
    query.validate()?;

    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let history = history_repo.find_recent(limit).await?;
    Ok(Json(ApiResponse::ok(history)))
}
