// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

mod api_test;
mod helpers;
mod lifecycle_test;
mod repositories;
