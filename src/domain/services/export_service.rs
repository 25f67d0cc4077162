// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::fmt::Write;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::domain::models::document::Document;
use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};

/// 导出文件的访问前缀
pub const EXPORT_URL_PREFIX: &str = "/exports";

/// Markdown中最多列出的图片数
pub const MAX_EXPORT_IMAGES: usize = 10;

const DISCLAIMER: &str = "This article was collected automatically. \
All rights belong to the original author; see the source link above.";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write export file: {0}")]
    Storage(#[from] StorageError),
}

/// 一次导出的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    /// 形如 `/exports/note_<毫秒>.md`
    pub url: String,
    /// 形如 `export-<毫秒>`
    pub export_id: String,
}

/// Markdown导出服务
///
/// 远程发布不可用时的兜底渠道，把文档写成一份独立的Markdown文件。
pub struct ExportService {
    storage: Arc<dyn StorageRepository>,
}

impl ExportService {
    pub fn new(storage: Arc<dyn StorageRepository>) -> Self {
        Self { storage }
    }

    /// 导出文档
    ///
    /// # 参数
    ///
    /// * `document` - 要导出的文档
    ///
    /// # 返回值
    ///
    /// * `Ok(ExportedFile)` - 导出文件信息
    /// * `Err(ExportError)` - 写入失败
    pub async fn export(&self, document: &Document) -> Result<ExportedFile, ExportError> {
        let markdown = render_markdown(document);

        // The name is reserved by the create itself; a taken name moves on to the next millisecond
        let mut millis = Utc::now().timestamp_millis();
        let mut file_name = export_file_name(millis);
        while !self.storage.save_new(&file_name, markdown.as_bytes()).await? {
            millis += 1;
            file_name = export_file_name(millis);
        }
        metrics::counter!("notepress_exports_total").increment(1);
        info!("Exported '{}' to {}", document.title, file_name);

        Ok(ExportedFile {
            url: format!("{}/{}", EXPORT_URL_PREFIX, file_name),
            export_id: format!("export-{}", millis),
            file_name,
        })
    }
}

fn export_file_name(millis: i64) -> String {
    format!("note_{}.md", millis)
}

/// 将文档渲染为Markdown
///
/// 依次为标题、正文、图片列表、来源信息和免责声明。
pub fn render_markdown(document: &Document) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {}\n", document.title);
    if !document.body_text.is_empty() {
        let _ = writeln!(out, "{}\n", document.body_text);
    }

    if !document.images.is_empty() {
        out.push_str("## Images\n\n");
        for image in document.images.iter().take(MAX_EXPORT_IMAGES) {
            let _ = writeln!(out, "![{}]({})", image.alt_text, image.url);
        }
        out.push('\n');
    }

    out.push_str("---\n\n");
    let _ = writeln!(out, "- Source: {}", document.source_url);
    if let Some(author) = &document.metadata.author {
        let _ = writeln!(out, "- Author: {}", author);
    }
    if let Some(date) = &document.metadata.publish_date {
        let _ = writeln!(out, "- Published: {}", date);
    }
    if let Some(tags) = &document.metadata.tags {
        let _ = writeln!(out, "- Tags: {}", tags.join(", "));
    }
    let _ = writeln!(out, "- Scraped: {}", document.scraped_at.to_rfc3339());

    let _ = write!(out, "\n> {}\n", DISCLAIMER);
    out
}
