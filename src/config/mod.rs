// ABOUTME: Configuration module organization for environment-driven server settings
// ABOUTME: Exposes the typed ServerConfig loaded from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

/// Environment-based configuration management
pub mod environment;

pub use environment::ServerConfig;
