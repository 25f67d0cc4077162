// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    routing::{delete, get, post},
    Extension, Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::infrastructure::note_client::NoteClient;
use crate::infrastructure::repositories::config_repo_impl::ConfigRepositoryImpl;
use crate::infrastructure::repositories::post_history_repo_impl::PostHistoryRepositoryImpl;
use crate::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use crate::presentation::handlers::{
    config_handler, history_handler, schedule_handler, scrape_handler, task_handler,
};
use crate::queue::scheduler::TaskScheduler;

/// 路由处理器共享的组件
#[derive(Clone)]
pub struct AppContext {
    pub task_repo: Arc<TaskRepositoryImpl>,
    pub history_repo: Arc<PostHistoryRepositoryImpl>,
    pub config_repo: Arc<ConfigRepositoryImpl>,
    pub scheduler: Arc<TaskScheduler>,
    pub note_client: Arc<NoteClient>,
}

pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let api_routes = Router::new()
        .route("/api/scrape", post(scrape_handler::create_scrape))
        .route(
            "/api/tasks",
            get(task_handler::list_tasks::<TaskRepositoryImpl>),
        )
        .route(
            "/api/tasks/{id}",
            get(task_handler::get_task::<TaskRepositoryImpl>),
        )
        .route(
            "/api/history",
            get(history_handler::get_history::<PostHistoryRepositoryImpl>),
        )
        .route(
            "/api/schedule",
            post(schedule_handler::create_schedule::<ConfigRepositoryImpl>)
                .get(schedule_handler::list_schedules),
        )
        .route(
            "/api/schedule/{name}",
            delete(schedule_handler::delete_schedule::<ConfigRepositoryImpl>),
        )
        .route(
            "/api/config",
            get(config_handler::get_config::<ConfigRepositoryImpl>)
                .post(config_handler::set_config::<ConfigRepositoryImpl>),
        );

    Router::new().merge(public_routes).merge(api_routes)
}

/// 组装完整的应用路由
///
/// # 参数
///
/// * `context` - 共享组件
/// * `export_dir` - 导出目录，通过 `/exports` 对外提供
pub fn build_app(context: AppContext, export_dir: impl AsRef<Path>) -> Router {
    routes()
        .nest_service("/exports", ServeDir::new(export_dir.as_ref()))
        .layer(Extension(context.task_repo))
        .layer(Extension(context.history_repo))
        .layer(Extension(context.config_repo))
        .layer(Extension(context.scheduler))
        .layer(Extension(context.note_client))
        .layer(TraceLayer::new_for_http())
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
