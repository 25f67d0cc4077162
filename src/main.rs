// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use migration::{Migrator, MigratorTrait};
use notepress::config::settings::Settings;
use notepress::domain::repositories::config_repository::{ConfigRepository, NOTE_API_TOKEN_KEY};
use notepress::domain::services::export_service::ExportService;
use notepress::domain::services::publish_service::PublishService;
use notepress::domain::services::scrape_service::ScrapeService;
use notepress::engines::build_engine;
use notepress::infrastructure::database::connection;
use notepress::infrastructure::note_client::NoteClient;
use notepress::infrastructure::repositories::config_repo_impl::ConfigRepositoryImpl;
use notepress::infrastructure::repositories::post_history_repo_impl::PostHistoryRepositoryImpl;
use notepress::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use notepress::infrastructure::storage::LocalStorage;
use notepress::presentation::routes::{self, AppContext};
use notepress::queue::scheduler::TaskScheduler;
use notepress::utils::telemetry;
use notepress::workers::scrape_worker::ScrapeWorker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting notepress...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    if settings.metrics.enabled {
        notepress::infrastructure::metrics::init_metrics(settings.metrics.port);
    }

    // 3. Prepare data and export directories
    connection::ensure_sqlite_dir(&settings.database.url)
        .context("Failed to create database directory")?;
    tokio::fs::create_dir_all(&settings.export.dir)
        .await
        .with_context(|| format!("Failed to create export directory {}", settings.export.dir))?;

    // 4. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 5. Initialize repositories
    let task_repo = Arc::new(TaskRepositoryImpl::new(db.clone()));
    let history_repo = Arc::new(PostHistoryRepositoryImpl::new(db.clone()));
    let config_repo = Arc::new(ConfigRepositoryImpl::new(db.clone()));

    // 6. Initialize scraping
    let engine = build_engine(
        settings.scraper.use_browser,
        settings.scraper.engine_config(),
    )?;
    let scraper = Arc::new(ScrapeService::new(
        engine,
        &settings.scraper.user_agent,
        settings.scraper.image_timeout(),
    )?);
    info!("Using {} fetch engine", scraper.engine_name());

    // 7. Initialize publishing; the stored credential wins over the configured one
    let token = match config_repo.get(NOTE_API_TOKEN_KEY).await? {
        Some(token) if !token.trim().is_empty() => token,
        _ => settings.note.api_token.clone().unwrap_or_default(),
    };
    let note_client = Arc::new(NoteClient::new(&settings.note.base_url, &token)?);
    if !settings.note.remote_enabled {
        info!("Remote publishing disabled, articles will be exported to {}", settings.export.dir);
    } else if token.is_empty() {
        warn!("No publishing credential configured, articles will be exported until one is set");
    }

    let storage = Arc::new(LocalStorage::new(&settings.export.dir));
    let publisher = Arc::new(PublishService::new(
        note_client.clone(),
        ExportService::new(storage),
        settings.note.remote_enabled,
    ));

    // 8. Initialize worker and scheduler
    let worker = Arc::new(ScrapeWorker::new(
        task_repo.clone(),
        history_repo.clone(),
        scraper,
        publisher,
    ));
    let scheduler = Arc::new(TaskScheduler::new(worker));

    if let Err(e) = scheduler.restore(config_repo.as_ref()).await {
        warn!("Failed to restore saved schedules: {}", e);
    }

    // 9. Start HTTP server
    let app = routes::build_app(
        AppContext {
            task_repo,
            history_repo,
            config_repo,
            scheduler: scheduler.clone(),
            note_client,
        },
        &settings.export.dir,
    );

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.stop_all();
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
