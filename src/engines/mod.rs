// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod browser_engine;
pub mod reqwest_engine;
pub mod traits;

use crate::engines::browser_engine::BrowserEngine;
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::{EngineConfig, EngineError, FetchEngine};
use std::sync::Arc;

/// 按配置选择抓取策略
///
/// 选择在构建抓取器时做一次，之后不再按请求切换
pub fn build_engine(
    use_browser: bool,
    config: EngineConfig,
) -> Result<Arc<dyn FetchEngine>, EngineError> {
    if use_browser {
        Ok(Arc::new(BrowserEngine::new(config)))
    } else {
        Ok(Arc::new(ReqwestEngine::new(&config)?))
    }
}
