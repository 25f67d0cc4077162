// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 表示层模块
///
/// 基于axum的HTTP控制接口
pub mod errors;
pub mod handlers;
pub mod routes;
