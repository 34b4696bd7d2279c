// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which provides an interface
//! for turning raw configuration text into a structured document.

use crate::domain::{ConfigDocument, Result};

/// A trait for parsing configuration text.
///
/// This trait defines the interface for implementing parsers that read a
/// whole document's text and produce a [`ConfigDocument`] of ordered
/// sections. Parsing is all-or-nothing: a structural violation returns
/// [`ConfigError::Parse`](crate::domain::ConfigError::Parse) with the
/// offending line number, never a partial document.
///
/// # Examples
///
/// ```rust
/// use inicfg::ports::ConfigParser;
/// use inicfg::domain::{ConfigDocument, Result};
///
/// struct MyParser;
///
/// impl ConfigParser for MyParser {
///     fn parse(&self, _content: &str) -> Result<ConfigDocument> {
///         Ok(ConfigDocument::new())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["myformat"]
///     }
/// }
/// ```
pub trait ConfigParser {
    /// Parses configuration content into a document.
    ///
    /// # Arguments
    ///
    /// * `content` - The raw content of the configuration file
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigDocument)` - The parsed document
    /// * `Err(ConfigError)` - A structural violation, with its line number
    fn parse(&self, content: &str) -> Result<ConfigDocument>;

    /// Returns the file extensions supported by this parser.
    ///
    /// This allows the configuration system to automatically select the
    /// appropriate parser based on the file extension.
    ///
    /// # Returns
    ///
    /// A slice of file extensions (without the leading dot) that this parser
    /// supports.
    fn supported_extensions(&self) -> &[&str];
}
