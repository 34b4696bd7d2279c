// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! This module defines the `ConfigSource` trait, which is the primary port
//! (interface) for supplying raw configuration text. Any configuration source
//! (files, in-memory fixtures, embedded defaults, etc.) must implement this
//! trait.

use crate::domain::Result;
use std::path::Path;

/// A trait for configuration sources.
///
/// A source hands the loader one UTF-8 document per [`read`](ConfigSource::read)
/// call and, when it is backed by a file, tells the loader where that file
/// lives so the `here` and `__file__` interpolation variables can be
/// injected.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow for use in multi-threaded
/// contexts; `read` takes `&self` so a reloading service can call it from a
/// watcher thread.
///
/// # Examples
///
/// ```rust
/// use inicfg::ports::ConfigSource;
/// use inicfg::domain::Result;
///
/// struct MySource;
///
/// impl ConfigSource for MySource {
///     fn name(&self) -> &str {
///         "my-source"
///     }
///
///     fn read(&self) -> Result<String> {
///         Ok("[app:main]\nuse = egg:myapp\n".to_string())
///     }
/// }
///
/// let source = MySource;
/// assert!(source.read().unwrap().starts_with("[app:main]"));
/// assert!(source.path().is_none());
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns the name of this configuration source.
    ///
    /// This name is used for logging, error messages, and debugging. It
    /// should be a short, descriptive identifier like "ini-file" or
    /// "memory".
    fn name(&self) -> &str;

    /// Reads the current configuration text from the source.
    ///
    /// Every call re-reads the underlying storage, so a reloading service
    /// observes edits made since the previous call.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The full document text
    /// * `Err(ConfigError)` - The source could not be read
    fn read(&self) -> Result<String>;

    /// Returns the path of the backing file, when there is one.
    ///
    /// The loader publishes this as the `__file__` interpolation variable.
    /// Sources without a backing file return `None`.
    fn path(&self) -> Option<&Path> {
        None
    }

    /// Returns the directory the document should treat as `here`.
    ///
    /// For file-backed sources this is the file's parent directory.
    /// Sources without a natural location return `None`, and documents they
    /// produce have no `here` variable.
    fn here(&self) -> Option<&Path> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test implementation of ConfigSource for testing purposes
    struct TestSource {
        name: String,
        text: String,
    }

    impl ConfigSource for TestSource {
        fn name(&self) -> &str {
            &self.name
        }

        fn read(&self) -> Result<String> {
            Ok(self.text.clone())
        }
    }

    #[test]
    fn test_config_source_name() {
        let source = TestSource {
            name: "test-source".to_string(),
            text: String::new(),
        };
        assert_eq!(source.name(), "test-source");
    }

    #[test]
    fn test_config_source_read() {
        let source = TestSource {
            name: "test-source".to_string(),
            text: "[app:main]\n".to_string(),
        };
        assert_eq!(source.read().unwrap(), "[app:main]\n");
    }

    #[test]
    fn test_config_source_default_locations() {
        let source = TestSource {
            name: "test-source".to_string(),
            text: String::new(),
        };
        assert!(source.path().is_none());
        assert!(source.here().is_none());
    }

    #[test]
    fn test_config_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn ConfigSource>>();
    }
}
