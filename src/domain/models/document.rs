// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 无法解析出标题时使用的占位标题
pub const UNTITLED: &str = "Untitled";

/// 抓取文档
///
/// 单次抓取的结构化结果，包含标题、正文纯文本、图片列表和元数据。
/// 文档只在一次流水线执行中存在，不做持久化。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// 来源URL
    pub source_url: String,
    /// 标题，永不为空
    pub title: String,
    /// 空白规整后的正文纯文本
    pub body_text: String,
    /// 原始HTML，保留用于重新提取
    #[serde(skip_serializing)]
    pub raw_html: String,
    /// 按文档顺序首次出现的图片，按绝对URL去重
    pub images: Vec<ImageRef>,
    /// 文章元数据
    pub metadata: DocumentMetadata,
    /// 抓取时间
    pub scraped_at: DateTime<Utc>,
}

/// 图片引用
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    /// 绝对URL
    pub url: String,
    /// 替代文本，缺失时为空字符串
    pub alt_text: String,
    /// 下载到的图片数据
    #[serde(skip)]
    pub bytes: Option<Bytes>,
}

impl ImageRef {
    pub fn new(url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt_text: alt_text.into(),
            bytes: None,
        }
    }
}

/// 文章元数据
///
/// 发布日期按原样保存，不做解析或校验。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub author: Option<String>,
    pub publish_date: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Document {
    /// 已下载数据的图片
    pub fn downloaded_images(&self) -> impl Iterator<Item = &ImageRef> {
        self.images.iter().filter(|image| image.bytes.is_some())
    }
}
