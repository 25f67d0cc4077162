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

use crate::engines::traits::{EngineConfig, EngineError, FetchEngine, FetchResponse};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::debug;

/// 静态抓取引擎
///
/// 基于reqwest实现的单次GET抓取，不执行JavaScript
pub struct ReqwestEngine {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestEngine {
    /// 创建静态抓取引擎
    ///
    /// # 参数
    ///
    /// * `config` - 引擎配置
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 引擎实例
    /// * `Err(EngineError)` - HTTP客户端构建失败
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }
}

#[async_trait]
impl FetchEngine for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// 非2xx响应、网络错误和超时都视为失败
    async fn fetch(&self, url: &str) -> Result<FetchResponse, EngineError> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| EngineError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::HttpStatus(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| EngineError::from_reqwest(e, self.timeout))?;

        debug!("Fetched {} ({} bytes)", url, html.len());

        Ok(FetchResponse {
            status_code: status.as_u16(),
            html,
            rendered_title: None,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
