// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the core domain types and logic for the configuration
//! crate: the parsed document model, placeholder interpolation, declarative
//! schema validation, and the error taxonomy. It is independent of any
//! external concerns and defines the fundamental concepts used throughout
//! the library.

pub mod config_value;
pub mod document;
pub mod errors;
pub mod interpolation;
pub mod schema;

// Re-export commonly used types
pub use config_value::ConfigValue;
pub use document::{ConfigDocument, Section, DEFAULT_SECTION};
pub use errors::{ConfigError, ParseErrorKind, Result, ValidationError, ValidationErrorKind};
pub use interpolation::InterpolationContext;
pub use schema::{HostPort, KeySchema, Schema, SectionSchema, ValueKind};
