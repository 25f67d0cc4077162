// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineConfig, EngineError, FetchEngine, FetchResponse};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Instant;
use tracing::{debug, warn};

fn browser_error(e: impl std::fmt::Display) -> EngineError {
    EngineError::Browser(e.to_string())
}

/// 渲染抓取引擎
///
/// 基于chromiumoxide实现。每次抓取启动一个独立的浏览器实例，
/// 无论导航成功与否，结束时都会关闭该实例。
pub struct BrowserEngine {
    config: EngineConfig,
}

impl BrowserEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    async fn launch(&self) -> Result<(Browser, tokio::task::JoinHandle<()>), EngineError> {
        let browser_config = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(self.config.timeout)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .build()
            .map_err(EngineError::Browser)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(browser_error)?;

        // Drive CDP events until the connection goes away
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok((browser, handler_task))
    }

    /// 导航并读取渲染后的DOM与标题
    async fn render(&self, browser: &Browser, url: &str) -> Result<(String, Option<String>), EngineError> {
        let page: Page = browser.new_page("about:blank").await.map_err(browser_error)?;
        page.set_user_agent(self.config.user_agent.as_str())
            .await
            .map_err(browser_error)?;

        page.goto(url).await.map_err(browser_error)?;
        // Let late redirects and client-side navigation settle
        page.wait_for_navigation().await.map_err(browser_error)?;

        let html = page.content().await.map_err(browser_error)?;
        let title = page
            .get_title()
            .await
            .map_err(browser_error)?
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok((html, title))
    }
}

#[async_trait]
impl FetchEngine for BrowserEngine {
    /// 执行渲染抓取
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 渲染后的HTML与浏览器标题
    /// * `Err(EngineError)` - 启动、导航失败或超时
    async fn fetch(&self, url: &str) -> Result<FetchResponse, EngineError> {
        let start = Instant::now();
        let (mut browser, handler_task) = self.launch().await?;

        let rendered = tokio::time::timeout(self.config.timeout, self.render(&browser, url))
            .await
            .map_err(|_| EngineError::Timeout(self.config.timeout))
            .and_then(|result| result);

        // Teardown happens on every path; Browser's Drop also kills the child if we are cancelled
        if let Err(e) = browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        handler_task.abort();

        let (html, rendered_title) = rendered?;
        debug!("Rendered {} ({} bytes)", url, html.len());

        Ok(FetchResponse {
            status_code: 200,
            html,
            rendered_title,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}
