// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 文章状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    /// 草稿
    #[default]
    Draft,
    /// 直接发布
    Publish,
}

impl ArticleStatus {
    pub fn from_auto_publish(auto_publish: bool) -> Self {
        if auto_publish {
            ArticleStatus::Publish
        } else {
            ArticleStatus::Draft
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArticleStatus::Draft => write!(f, "draft"),
            ArticleStatus::Publish => write!(f, "publish"),
        }
    }
}

/// 待发布文章
///
/// 由抓取文档转换而来，正文末尾总是带有来源信息。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub body: String,
    pub status: ArticleStatus,
    pub publish_at: Option<String>,
    /// 封面图URL
    pub eyecatch: Option<String>,
    pub hashtags: Option<Vec<String>>,
}

/// 远程发布成功后返回的文章信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePost {
    pub id: String,
    pub url: String,
    pub note_id: String,
}

/// 发布结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    pub success: bool,
    /// 远程文章URL，或导出文件的相对路径
    pub url: Option<String>,
    /// 远程文章ID，或导出文件的合成标识
    pub remote_id: Option<String>,
    pub error: Option<String>,
    /// 是否走了本地导出
    pub exported: bool,
}

impl PublishResult {
    pub fn posted(post: RemotePost) -> Self {
        Self {
            success: true,
            url: Some(post.url),
            remote_id: Some(post.note_id),
            error: None,
            exported: false,
        }
    }

    pub fn exported(url: String, export_id: String) -> Self {
        Self {
            success: true,
            url: Some(url),
            remote_id: Some(export_id),
            error: None,
            exported: true,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            url: None,
            remote_id: None,
            error: Some(error.into()),
            exported: false,
        }
    }
}
