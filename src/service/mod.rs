// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration service.
//!
//! This module contains the service that loads, validates, and publishes
//! immutable configuration documents, and the builder used to construct it.

pub mod config_service;

// Re-export commonly used types
pub use config_service::{ConfigService, ConfigServiceBuilder};
