// ABOUTME: Configuration management for the booking core
// ABOUTME: Environment-only configuration with typed defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Hub

/// Environment-based configuration management
pub mod environment;

pub use environment::HubConfig;
