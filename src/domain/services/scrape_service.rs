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

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::models::document::Document;
use crate::domain::services::extraction_service::ExtractionService;
use crate::engines::traits::{EngineError, FetchEngine};

/// 单张图片下载超时
pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(15);

/// 抓取错误
///
/// 只有页面本身获取失败才会产生，图片下载失败不会。
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Failed to fetch page: {0}")]
    Fetch(#[from] EngineError),
}

/// 页面抓取能力
///
/// 流水线只依赖这两个操作，便于在测试中替换。
#[async_trait]
pub trait PageScraper: Send + Sync {
    /// 抓取并提取页面，图片数据在返回前尽量下载
    async fn scrape(&self, url: &str) -> Result<Document, ScrapeError>;

    /// 下载单张图片
    async fn download_image(&self, url: &str) -> Result<Bytes, EngineError>;
}

/// 抓取服务
pub struct ScrapeService {
    engine: Arc<dyn FetchEngine>,
    image_client: reqwest::Client,
    image_timeout: Duration,
}

impl ScrapeService {
    /// 创建抓取服务
    ///
    /// # 参数
    ///
    /// * `engine` - 页面获取策略
    /// * `user_agent` - 下载图片时使用的UA
    /// * `image_timeout` - 单张图片下载超时
    pub fn new(
        engine: Arc<dyn FetchEngine>,
        user_agent: &str,
        image_timeout: Duration,
    ) -> Result<Self, EngineError> {
        let image_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(image_timeout)
            .build()?;

        Ok(Self {
            engine,
            image_client,
            image_timeout,
        })
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }
}

#[async_trait]
impl PageScraper for ScrapeService {
    async fn scrape(&self, url: &str) -> Result<Document, ScrapeError> {
        info!("Scraping {} with {} engine", url, self.engine.name());
        let response = self.engine.fetch(url).await?;

        let mut document = ExtractionService::extract(&response.html, url);
        if let Some(title) = response
            .rendered_title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            document.title = title.to_string();
        }

        debug!(
            "Extracted '{}' with {} images from {}",
            document.title,
            document.images.len(),
            url
        );

        // Sequential on purpose: one image in flight per scrape
        for image in document.images.iter_mut() {
            match self.download_image(&image.url).await {
                Ok(bytes) => image.bytes = Some(bytes),
                Err(e) => {
                    warn!("Failed to download image {}: {}", image.url, e);
                    metrics::counter!("notepress_image_failures_total", "stage" => "download")
                        .increment(1);
                }
            }
        }

        Ok(document)
    }

    async fn download_image(&self, url: &str) -> Result<Bytes, EngineError> {
        let response = self
            .image_client
            .get(url)
            .send()
            .await
            .map_err(|e| EngineError::from_reqwest(e, self.image_timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::HttpStatus(status.as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(|e| EngineError::from_reqwest(e, self.image_timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::reqwest_engine::ReqwestEngine;
    use crate::engines::traits::{EngineConfig, FetchResponse};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FixedEngine {
        html: String,
        rendered_title: Option<String>,
    }

    #[async_trait]
    impl FetchEngine for FixedEngine {
        async fn fetch(&self, _url: &str) -> Result<FetchResponse, EngineError> {
            Ok(FetchResponse {
                status_code: 200,
                html: self.html.clone(),
                rendered_title: self.rendered_title.clone(),
                response_time_ms: 1,
            })
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    struct FailingEngine;

    #[async_trait]
    impl FetchEngine for FailingEngine {
        async fn fetch(&self, _url: &str) -> Result<FetchResponse, EngineError> {
            Err(EngineError::HttpStatus(503))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn service(engine: Arc<dyn FetchEngine>) -> ScrapeService {
        ScrapeService::new(engine, "test-agent", Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_scrape_downloads_images_and_tolerates_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><head><title>Page</title></head><body><article>Body
                   <img src="/ok.png" alt="ok"><img src="/missing.jpg"></article></body></html>"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ok.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/missing.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let engine = ReqwestEngine::new(&EngineConfig::default()).unwrap();
        let scraper = service(Arc::new(engine));
        let doc = scraper.scrape(&format!("{}/page", server.uri())).await.unwrap();

        assert_eq!(doc.title, "Page");
        assert_eq!(doc.images.len(), 2);
        assert_eq!(doc.images[0].bytes.as_deref(), Some(&[1u8, 2, 3][..]));
        assert!(doc.images[1].bytes.is_none());
        assert_eq!(doc.downloaded_images().count(), 1);
    }

    #[tokio::test]
    async fn test_rendered_title_overrides_extracted_title() {
        let engine = FixedEngine {
            html: "<html><head><title>Static</title></head><body>x</body></html>".into(),
            rendered_title: Some("  Rendered  ".into()),
        };
        let doc = service(Arc::new(engine))
            .scrape("https://ex.com/a")
            .await
            .unwrap();
        assert_eq!(doc.title, "Rendered");
    }

    #[tokio::test]
    async fn test_blank_rendered_title_is_ignored() {
        let engine = FixedEngine {
            html: "<html><head><title>Static</title></head><body>x</body></html>".into(),
            rendered_title: Some("   ".into()),
        };
        let doc = service(Arc::new(engine))
            .scrape("https://ex.com/a")
            .await
            .unwrap();
        assert_eq!(doc.title, "Static");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_a_scrape_error() {
        let result = service(Arc::new(FailingEngine)).scrape("https://ex.com/a").await;
        assert!(matches!(
            result,
            Err(ScrapeError::Fetch(EngineError::HttpStatus(503)))
        ));
    }
}
