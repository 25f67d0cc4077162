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
use std::time::Duration;
use thiserror::Error;

/// 浏览器风格的默认User-Agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 页面抓取默认超时
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// 引擎错误类型
///
/// 页面或图片获取阶段的所有失败都归为此类
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 非2xx响应
    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),
    /// 超时
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
    /// 浏览器启动或导航失败
    #[error("Browser error: {0}")]
    Browser(String),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl EngineError {
    /// 将reqwest错误归类，超时单独区分
    pub fn from_reqwest(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            EngineError::Timeout(timeout)
        } else {
            EngineError::RequestFailed(error)
        }
    }
}

/// 引擎配置
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// 单次抓取超时
    pub timeout: Duration,
    /// User-Agent
    pub user_agent: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// 抓取响应
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 页面HTML
    pub html: String,
    /// 浏览器报告的页面标题，仅渲染抓取提供
    pub rendered_title: Option<String>,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

/// 页面获取引擎特质
///
/// 静态抓取与渲染抓取两种策略共用此接口，每个抓取器实例只选用一种
#[async_trait]
pub trait FetchEngine: Send + Sync {
    /// 获取页面HTML
    async fn fetch(&self, url: &str) -> Result<FetchResponse, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
