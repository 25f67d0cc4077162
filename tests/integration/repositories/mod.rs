// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

mod config_repository_test;
mod post_history_repository_test;
mod task_repository_test;
