// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture crate for INI deployment configuration.
//!
//! This crate loads the classic deployment-file dialect of INI: ordered
//! sections of key-value pairs with `%(name)s` interpolation, multi-line
//! continuation values, comments, and a `[DEFAULT]` section that provides
//! fallbacks everywhere. Documents are validated against a declarative
//! schema that reports every violation at once, then published to readers
//! as immutable snapshots; a reload builds and validates a full replacement
//! before swapping it in.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and business logic (`ConfigDocument`, `ConfigValue`,
//!   interpolation, `Schema`, errors)
//! - **Ports**: Trait definitions that define interfaces (`ConfigSource`, `ConfigParser`,
//!   `ConfigWatcher`)
//! - **Adapters**: The INI parser, the file and in-memory sources, and the file watcher
//! - **Service**: Orchestrates load, validate, publish, and reload
//! - **Settings**: Typed views over the sections a deployment file is expected to contain
//!
//! # Features
//!
//! - **Ordered Documents**: Sections and keys keep file order; duplicate keys resolve
//!   predictably
//! - **Interpolation**: `%(name)s` substitution with `here`/`__file__` variables and
//!   `%%` escapes
//! - **Type Safety**: Type-safe coercions from raw values to Rust types, including
//!   durations and `host:port` pairs
//! - **Batch Validation**: Every schema violation collected into one error
//! - **Round-Trips**: A document re-serializes to text that parses back equal
//! - **Dynamic Reloading**: Watch the file and swap in replacements only when they
//!   parse and validate
//!
//! # Feature Flags
//!
//! - `reload`: Enable dynamic reloading with file watching
//!
//! # Quick Start
//!
//! ```rust
//! use inicfg::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let service = ConfigService::builder()
//!     .with_string("[app:main]\nuse = egg:myapp\nworkers = 4\n")
//!     .build()?;
//!
//! assert_eq!(service.get_string("app:main", "use")?, "egg:myapp");
//! assert_eq!(service.get_int("app:main", "workers")?, 4);
//! # Ok(())
//! # }
//! ```
//!
//! # Examples
//!
//! Loading a file, validating it against the deployment schema, and
//! extracting the typed settings:
//!
//! ```rust,no_run
//! use inicfg::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let service = ConfigService::builder()
//!     .with_file("/etc/myapp/deploy.ini")?
//!     .with_schema(DeploymentSettings::schema().clone())
//!     .build()?;
//!
//! let settings = DeploymentSettings::from_document(&service.snapshot())?;
//! for pair in &settings.server.listen {
//!     println!("listening on {pair}");
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod settings;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigDocument, ConfigError, ConfigValue, HostPort, KeySchema, Result, Schema,
        SectionSchema, ValueKind,
    };
    pub use crate::ports::{ConfigParser, ConfigSource, ConfigWatcher};
    pub use crate::service::{ConfigService, ConfigServiceBuilder};
    pub use crate::settings::DeploymentSettings;

    pub use crate::adapters::{IniFileSource, IniParser, MemorySource};
    #[cfg(feature = "reload")]
    pub use crate::adapters::FileWatcher;
}
