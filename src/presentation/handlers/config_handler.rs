// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::application::dto::{api_response::ApiResponse, config_request::ConfigUpdateDto};
use crate::domain::repositories::config_repository::{ConfigRepository, NOTE_API_TOKEN_KEY};
use crate::infrastructure::note_client::NoteClient;
use crate::presentation::errors::AppError;

const MASK: &str = "********";

/// 读取全部运行时配置，凭证只显示是否已设置
pub async fn get_config<C: ConfigRepository>(
    Extension(config_repo): Extension<Arc<C>>,
) -> Result<Json<ApiResponse<BTreeMap<String, String>>>, AppError> {
    let mut values = config_repo.get_all().await?;
    if let Some(token) = values.get_mut(NOTE_API_TOKEN_KEY) {
        if !token.is_empty() {
            *token = MASK.to_string();
        }
    }

    Ok(Json(ApiResponse::ok(values)))
}

/// 写入运行时配置
///
/// 写入发布凭证时立即替换客户端中的凭证
pub async fn set_config<C: ConfigRepository>(
    Extension(config_repo): Extension<Arc<C>>,
    Extension(note_client): Extension<Arc<NoteClient>>,
    Json(payload): Json<ConfigUpdateDto>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    payload.validate()?;

    config_repo.set(&payload.key, &payload.value).await?;
    if payload.key == NOTE_API_TOKEN_KEY {
        note_client.update_token(&payload.value);
        info!("Publishing credential updated");
    }

    let message = format!("Configuration '{}' saved", payload.key);
    Ok(Json(ApiResponse::with_message(true, message, None)))
}
