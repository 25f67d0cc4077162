// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::{Ipv4Addr, SocketAddr};
use tracing::{info, warn};

/// 启动Prometheus指标导出器
///
/// 导出 `notepress_tasks_total{status}`、`notepress_exports_total`
/// 和 `notepress_image_failures_total{stage}` 等计数器
///
/// # 参数
///
/// * `port` - 监听端口
pub fn init_metrics(port: u16) {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return;
    }

    info!("Metrics exporter listening on {}", addr);
}
