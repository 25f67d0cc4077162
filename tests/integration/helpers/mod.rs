// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use migration::{Migrator, MigratorTrait};
use notepress::domain::services::export_service::ExportService;
use notepress::domain::services::publish_service::PublishService;
use notepress::domain::services::scrape_service::ScrapeService;
use notepress::engines::reqwest_engine::ReqwestEngine;
use notepress::engines::traits::EngineConfig;
use notepress::infrastructure::note_client::NoteClient;
use notepress::infrastructure::repositories::config_repo_impl::ConfigRepositoryImpl;
use notepress::infrastructure::repositories::post_history_repo_impl::PostHistoryRepositoryImpl;
use notepress::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use notepress::infrastructure::storage::LocalStorage;
use notepress::presentation::routes::{build_app, AppContext};
use notepress::queue::scheduler::TaskScheduler;
use notepress::workers::scrape_worker::ScrapeWorker;
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// 已执行迁移的内存数据库
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

/// 组装好的测试应用
pub struct TestApp {
    pub context: AppContext,
    pub export_dir: TempDir,
}

impl TestApp {
    pub fn server(&self) -> TestServer {
        TestServer::new(build_app(self.context.clone(), self.export_dir.path())).unwrap()
    }
}

/// 创建测试应用
///
/// # 参数
///
/// * `note_base_url` - 远程发布API地址
/// * `token` - 初始凭证，为空时走本地导出
pub async fn create_test_app(note_base_url: &str, token: &str) -> TestApp {
    let db = setup_db().await;
    let export_dir = tempfile::tempdir().unwrap();

    let task_repo = Arc::new(TaskRepositoryImpl::new(db.clone()));
    let history_repo = Arc::new(PostHistoryRepositoryImpl::new(db.clone()));
    let config_repo = Arc::new(ConfigRepositoryImpl::new(db));

    let engine = ReqwestEngine::new(&EngineConfig::default()).unwrap();
    let scraper = Arc::new(
        ScrapeService::new(Arc::new(engine), "notepress-test", Duration::from_secs(5)).unwrap(),
    );

    let note_client = Arc::new(NoteClient::new(note_base_url, token).unwrap());
    let publisher = Arc::new(PublishService::new(
        note_client.clone(),
        ExportService::new(Arc::new(LocalStorage::new(export_dir.path()))),
        true,
    ));

    let worker = Arc::new(ScrapeWorker::new(
        task_repo.clone(),
        history_repo.clone(),
        scraper,
        publisher,
    ));

    TestApp {
        context: AppContext {
            task_repo,
            history_repo,
            config_repo,
            scheduler: Arc::new(TaskScheduler::new(worker)),
            note_client,
        },
        export_dir,
    }
}
