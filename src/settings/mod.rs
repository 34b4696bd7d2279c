// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed views over the sections a deployment file is expected to contain.
//!
//! The domain layer treats every section alike; this layer names the ones
//! the deployment ecosystem gives meaning to and extracts them into plain
//! structs: `[app:main]`, `[server:main]`, `[pshell]`, and the logging
//! topology sections. Extraction expects a document that already passed
//! [`DeploymentSettings::schema`] but still reports anything the declarative
//! schema cannot express, such as dangling logger references.

pub mod app;
pub mod deployment;
pub mod logging;
pub mod server;

// Re-export commonly used types
pub use app::{AppSettings, PshellSettings, DEFAULT_RETRY_ATTEMPTS};
pub use deployment::DeploymentSettings;
pub use logging::{
    FormatterSettings, HandlerSettings, LogLevel, LoggerSettings, LoggingTopology,
};
pub use server::ServerSettings;

use crate::domain::{ConfigDocument, ConfigError, Result};

/// Looks up and interpolates a key, mapping an absent key to `None`.
fn optional_string(doc: &ConfigDocument, section: &str, key: &str) -> Result<Option<String>> {
    match doc.get_string(section, key) {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::KeyNotFound { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}
