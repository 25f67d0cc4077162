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

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::engines::traits::{EngineConfig, DEFAULT_USER_AGENT};

/// 应用程序配置设置
///
/// 包含服务器、数据库、抓取、发布、导出和指标等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 抓取配置
    pub scraper: ScraperSettings,
    /// 远程发布配置
    pub note: NoteSettings,
    /// 导出配置
    pub export: ExportSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 抓取配置设置
#[derive(Debug, Deserialize)]
pub struct ScraperSettings {
    /// 是否使用浏览器渲染页面
    pub use_browser: bool,
    /// 页面获取超时（秒）
    pub fetch_timeout_secs: u64,
    /// 单张图片下载超时（秒）
    pub image_timeout_secs: u64,
    pub user_agent: String,
}

impl ScraperSettings {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            timeout: Duration::from_secs(self.fetch_timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }
}

/// 远程发布配置设置
#[derive(Debug, Deserialize)]
pub struct NoteSettings {
    /// API根地址
    pub base_url: String,
    /// 初始凭证，运行时配置中的值优先
    pub api_token: Option<String>,
    /// 为false时只导出Markdown
    pub remote_enabled: bool,
}

/// 导出配置设置
#[derive(Debug, Deserialize)]
pub struct ExportSettings {
    /// 导出目录
    pub dir: String,
}

/// 指标配置设置
#[derive(Debug, Deserialize)]
pub struct MetricsSettings {
    pub enabled: bool,
    pub port: u16,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载内置默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 和 `NOTEPRESS__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("NOTEPRESS").separator("__"));

        builder.build()?.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite://data/app.db?mode=rwc")?
            // Default DB pool settings
            .set_default("database.max_connections", 5)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default("scraper.use_browser", false)?
            .set_default("scraper.fetch_timeout_secs", 30)?
            .set_default("scraper.image_timeout_secs", 15)?
            .set_default("scraper.user_agent", DEFAULT_USER_AGENT)?
            .set_default("note.base_url", "https://note.com/api/v2")?
            .set_default("note.remote_enabled", true)?
            .set_default("export.dir", "exports")?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.port", 9000)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
