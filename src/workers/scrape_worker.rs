// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use tracing::{error, info, instrument, Span};

use crate::domain::models::task::{ScrapingTask, TaskStatus};
use crate::domain::repositories::post_history_repository::PostHistoryRepository;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::services::publish_service::PublishService;
use crate::domain::services::scrape_service::PageScraper;

/// 抓取工作器
///
/// 负责一次完整的任务生命周期：建任务、抓取、发布、记录历史。
/// 所有错误都在这里被收敛为任务的失败状态，不会向调用方传播。
pub struct ScrapeWorker<R, H>
where
    R: TaskRepository + Send + Sync,
    H: PostHistoryRepository + Send + Sync,
{
    repository: Arc<R>,
    history_repository: Arc<H>,
    scraper: Arc<dyn PageScraper>,
    publisher: Arc<PublishService>,
}

impl<R, H> ScrapeWorker<R, H>
where
    R: TaskRepository + Send + Sync,
    H: PostHistoryRepository + Send + Sync,
{
    /// 创建新的抓取工作器实例
    pub fn new(
        repository: Arc<R>,
        history_repository: Arc<H>,
        scraper: Arc<dyn PageScraper>,
        publisher: Arc<PublishService>,
    ) -> Self {
        Self {
            repository,
            history_repository,
            scraper,
            publisher,
        }
    }

    /// 执行一次抓取并发布
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    /// * `auto_publish` - 是否直接发布
    ///
    /// # 返回值
    ///
    /// 返回处于终态的任务；只有任务记录本身无法创建或读取时返回None
    #[instrument(skip(self), fields(task_id, url = %url))]
    pub async fn execute(&self, url: &str, auto_publish: bool) -> Option<ScrapingTask> {
        let mut task = match self.repository.create(url).await {
            Ok(task) => task,
            Err(e) => {
                error!("Failed to create task: {}", e);
                return None;
            }
        };
        Span::current().record("task_id", task.id);
        info!("Task created");

        let task_id = task.id;
        let status = match self.process(&mut task, url, auto_publish).await {
            Ok(()) => {
                info!("Task completed");
                TaskStatus::Completed
            }
            Err(e) => {
                let message = format!("{:#}", e);
                error!("Task failed: {}", message);
                self.record_failure(task, message).await;
                TaskStatus::Failed
            }
        };
        metrics::counter!("notepress_tasks_total", "status" => status.to_string()).increment(1);

        match self.repository.find_by_id(task_id).await {
            Ok(task) => task,
            Err(e) => {
                error!("Failed to reload task: {}", e);
                None
            }
        }
    }

    /// 记录失败；`task` 与数据库中的状态一致，只会是Pending或Processing
    async fn record_failure(&self, task: ScrapingTask, message: String) {
        let failed = match task.fail(message) {
            Ok(failed) => failed,
            Err(e) => {
                error!("Failed to mark task as failed: {}", e);
                return;
            }
        };
        if let Err(e) = self
            .repository
            .update_status(failed.id, failed.status, failed.error_message)
            .await
        {
            error!("Failed to record task failure: {}", e);
        }
    }

    // `task` only advances once the new status has been stored
    async fn process(&self, task: &mut ScrapingTask, url: &str, auto_publish: bool) -> Result<()> {
        let processing = task.clone().start()?;
        self.repository
            .update_status(processing.id, processing.status, None)
            .await
            .context("Failed to mark task as processing")?;
        *task = processing;
        info!("Task processing");

        let document = self.scraper.scrape(url).await?;

        let result = self.publisher.publish(&document, auto_publish).await;
        if !result.success {
            return Err(anyhow!(result
                .error
                .unwrap_or_else(|| "Publish failed".to_string())));
        }

        let post_url = result.url.unwrap_or_default();
        let post_id = result.remote_id.unwrap_or_default();
        self.history_repository
            .create(task.id, &post_url, &post_id, &document.title)
            .await
            .context("Failed to record post history")?;
        info!(
            "Recorded {} post {}",
            if result.exported { "exported" } else { "remote" },
            post_url
        );

        let completed = task.clone().complete()?;
        self.repository
            .update_status(completed.id, completed.status, None)
            .await
            .context("Failed to mark task as completed")?;
        *task = completed;

        Ok(())
    }
}

#[cfg(test)]
#[path = "scrape_worker_test.rs"]
mod tests;
