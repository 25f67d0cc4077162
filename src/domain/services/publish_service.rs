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
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::models::article::{Article, ArticleStatus, PublishResult, RemotePost};
use crate::domain::models::document::Document;
use crate::domain::services::export_service::ExportService;

/// 每篇文章最多上传的图片数
pub const MAX_UPLOAD_IMAGES: usize = 10;

/// 远程发布错误
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Remote publishing is unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Remote rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 远程发布接口
#[async_trait]
pub trait NoteApi: Send + Sync {
    /// 是否具备发布条件（例如已配置凭证）
    fn is_available(&self) -> bool;

    /// 上传图片，返回托管URL
    async fn upload_image(&self, data: Bytes, filename: &str) -> Result<String, PublishError>;

    /// 创建文章
    async fn create_article(&self, article: &Article) -> Result<RemotePost, PublishError>;
}

/// 发布服务
///
/// 先尝试远程发布，远程渠道不可用或任何调用失败时退回到Markdown导出。
pub struct PublishService {
    api: Arc<dyn NoteApi>,
    exporter: ExportService,
    remote_enabled: bool,
}

impl PublishService {
    /// 创建发布服务
    ///
    /// # 参数
    ///
    /// * `api` - 远程发布接口
    /// * `exporter` - 兜底导出服务
    /// * `remote_enabled` - 为false时只做本地导出
    pub fn new(api: Arc<dyn NoteApi>, exporter: ExportService, remote_enabled: bool) -> Self {
        Self {
            api,
            exporter,
            remote_enabled,
        }
    }

    /// 发布文档
    ///
    /// # 参数
    ///
    /// * `document` - 抓取得到的文档
    /// * `auto_publish` - 为true时直接发布，否则保存为草稿
    ///
    /// # 返回值
    ///
    /// 远程发布或导出成功时 `success` 为true；只有导出也失败时为false
    pub async fn publish(&self, document: &Document, auto_publish: bool) -> PublishResult {
        if self.remote_enabled && self.api.is_available() {
            match self.publish_remote(document, auto_publish).await {
                Ok(post) => {
                    info!("Published '{}' to {}", document.title, post.url);
                    return PublishResult::posted(post);
                }
                Err(e) => warn!("Remote publish failed, falling back to export: {}", e),
            }
        } else {
            info!("Remote publishing unavailable, exporting '{}'", document.title);
        }

        match self.exporter.export(document).await {
            Ok(file) => PublishResult::exported(file.url, file.export_id),
            Err(e) => PublishResult::failed(e.to_string()),
        }
    }

    async fn publish_remote(
        &self,
        document: &Document,
        auto_publish: bool,
    ) -> Result<RemotePost, PublishError> {
        let article = self.convert(document, auto_publish).await;
        self.api.create_article(&article).await
    }

    /// 将文档转换为文章，顺带上传图片
    ///
    /// 单张图片上传失败只记录日志，不影响整体。
    pub async fn convert(&self, document: &Document, auto_publish: bool) -> Article {
        let mut body = document.body_text.clone();
        let mut uploaded = Vec::new();

        for (index, image) in document
            .images
            .iter()
            .take(MAX_UPLOAD_IMAGES)
            .enumerate()
        {
            let Some(data) = image.bytes.clone() else {
                continue;
            };
            let filename = format!("image_{}.jpg", index);
            match self.api.upload_image(data, &filename).await {
                Ok(hosted) => {
                    body.push_str(&format!("\n\n![{}]({})", image.alt_text, hosted));
                    uploaded.push(hosted);
                }
                Err(e) => {
                    warn!("Failed to upload image {}: {}", image.url, e);
                    metrics::counter!("notepress_image_failures_total", "stage" => "upload")
                        .increment(1);
                }
            }
        }

        body.push_str(&provenance_footer(document));

        Article {
            title: document.title.clone(),
            body,
            status: ArticleStatus::from_auto_publish(auto_publish),
            publish_at: None,
            eyecatch: uploaded.into_iter().next(),
            hashtags: document.metadata.tags.clone(),
        }
    }
}

/// 来源信息页脚：来源URL，以及存在时的作者和发布日期
pub fn provenance_footer(document: &Document) -> String {
    let mut footer = format!("\n\n---\n\nSource: {}", document.source_url);
    if let Some(author) = &document.metadata.author {
        footer.push_str(&format!("\nAuthor: {}", author));
    }
    if let Some(date) = &document.metadata.publish_date {
        footer.push_str(&format!("\nPublished: {}", date));
    }
    footer
}

#[cfg(test)]
#[path = "publish_service_test.rs"]
mod tests;
