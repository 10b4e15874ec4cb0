// ABOUTME: HTTP middleware configuration shared by the whole route tree
// ABOUTME: CORS setup and response cache suppression headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

/// CORS layer construction
pub mod cors;

pub use cors::setup_cors;
