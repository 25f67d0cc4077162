// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::domain::models::article::{Article, ArticleStatus, RemotePost};
use crate::domain::services::publish_service::{NoteApi, PublishError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 文章请求体
#[derive(Debug, Serialize)]
struct ArticlePayload<'a> {
    name: &'a str,
    body: &'a str,
    status: ArticleStatus,
    publish_at: Option<&'a str>,
    eyecatch: Option<&'a str>,
    hashtags: Option<&'a [String]>,
}

impl<'a> From<&'a Article> for ArticlePayload<'a> {
    fn from(article: &'a Article) -> Self {
        Self {
            name: &article.title,
            body: &article.body,
            status: article.status,
            publish_at: article.publish_at.as_deref(),
            eyecatch: article.eyecatch.as_deref(),
            hashtags: article.hashtags.as_deref(),
        }
    }
}

/// note API 客户端
///
/// 凭证可在运行时通过 [`NoteClient::update_token`] 替换，下一次调用即生效
pub struct NoteClient {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<String>,
}

impl NoteClient {
    /// 创建客户端
    ///
    /// # 参数
    ///
    /// * `base_url` - API根地址，例如 `https://note.com/api/v2`
    /// * `token` - Bearer凭证，可以为空
    pub fn new(base_url: &str, token: &str) -> Result<Self, PublishError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(token.trim().to_string()),
        })
    }

    /// 替换凭证
    pub fn update_token(&self, token: &str) {
        *self.token.write() = token.trim().to_string();
    }

    fn bearer(&self) -> Result<String, PublishError> {
        let token = self.token.read();
        if token.is_empty() {
            return Err(PublishError::Unavailable);
        }
        Ok(format!("Bearer {}", token))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 检查状态码并取出响应中的 `data` 字段
    async fn read_data(response: reqwest::Response) -> Result<Value, PublishError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(body);
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let mut json: Value = response
            .json()
            .await
            .map_err(|e| PublishError::InvalidResponse(e.to_string()))?;

        match json.get_mut("data") {
            Some(data) if data.is_object() => Ok(data.take()),
            _ => Err(PublishError::InvalidResponse(
                "missing 'data' object".to_string(),
            )),
        }
    }

    fn remote_post(data: &Value) -> Result<RemotePost, PublishError> {
        Ok(RemotePost {
            id: field(data, "id")?,
            url: field(data, "note_url")?,
            note_id: field(data, "key")?,
        })
    }

    async fn send_article(
        &self,
        request: reqwest::RequestBuilder,
        article: &Article,
    ) -> Result<RemotePost, PublishError> {
        let response = request
            .header(reqwest::header::AUTHORIZATION, self.bearer()?)
            .json(&ArticlePayload::from(article))
            .send()
            .await?;

        let data = Self::read_data(response).await?;
        Self::remote_post(&data)
    }
}

/// 读取字符串或数字字段
fn field(data: &Value, name: &str) -> Result<String, PublishError> {
    match data.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(PublishError::InvalidResponse(format!(
            "missing field '{}'",
            name
        ))),
    }
}

#[async_trait]
impl NoteApi for NoteClient {
    fn is_available(&self) -> bool {
        !self.token.read().is_empty()
    }

    async fn upload_image(&self, data: Bytes, filename: &str) -> Result<String, PublishError> {
        let part = Part::bytes(data.to_vec()).file_name(filename.to_string());
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(self.url("/images"))
            .header(reqwest::header::AUTHORIZATION, self.bearer()?)
            .multipart(form)
            .send()
            .await?;

        let data = Self::read_data(response).await?;
        let url = field(&data, "url")?;
        debug!("Uploaded {} to {}", filename, url);
        Ok(url)
    }

    async fn create_article(&self, article: &Article) -> Result<RemotePost, PublishError> {
        let request = self.client.post(self.url("/notes"));
        self.send_article(request, article).await
    }
}

#[cfg(test)]
#[path = "note_client_test.rs"]
mod tests;
