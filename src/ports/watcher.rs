// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration watcher trait definition.
//!
//! This module defines the `ConfigWatcher` trait, which provides an interface
//! for watching configuration sources for changes and triggering callbacks
//! when changes occur.

use crate::domain::Result;
use std::path::Path;
use std::sync::Arc;

/// Type alias for change notification callbacks.
///
/// This callback is invoked when the watched configuration file changes. It
/// receives the path that changed as a parameter.
pub type ChangeCallback = Arc<dyn Fn(&Path) + Send + Sync>;

/// A trait for watching configuration sources for changes.
///
/// This trait defines the interface for implementing configuration watchers
/// that can monitor a source (typically a file) for changes and trigger
/// callbacks when changes are detected. A reloading service wires the
/// callback to its own rebuild-and-swap path.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow for use in multi-threaded
/// contexts.
///
/// # Examples
///
/// ```rust
/// use inicfg::ports::{ChangeCallback, ConfigWatcher};
/// use inicfg::domain::Result;
/// use std::sync::Arc;
///
/// struct MyWatcher;
///
/// impl ConfigWatcher for MyWatcher {
///     fn watch(&mut self, callback: ChangeCallback) -> Result<()> {
///         // Implementation here
///         Ok(())
///     }
///
///     fn stop(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait ConfigWatcher: Send + Sync {
    /// Starts watching for configuration changes.
    ///
    /// When a change is detected, the provided callback will be invoked with
    /// the path that changed. The callback should be non-blocking to avoid
    /// delaying the watcher.
    ///
    /// # Arguments
    ///
    /// * `callback` - A function to call when a configuration change is
    ///   detected
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The watcher was successfully started
    /// * `Err(ConfigError)` - An error occurred while starting the watcher
    fn watch(&mut self, callback: ChangeCallback) -> Result<()>;

    /// Stops watching for configuration changes.
    ///
    /// After calling this method, no more change notifications will be sent.
    /// This method should clean up any resources used by the watcher.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The watcher was successfully stopped
    /// * `Err(ConfigError)` - An error occurred while stopping the watcher
    fn stop(&mut self) -> Result<()>;
}

/// Returns a callback that does nothing, for wiring up watchers in tests.
pub fn noop_callback() -> ChangeCallback {
    Arc::new(|_path: &Path| {})
}
