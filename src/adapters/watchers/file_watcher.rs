// SPDX-License-Identifier: MIT OR Apache-2.0

//! File system watcher for configuration file changes.
//!
//! This module provides a watcher that monitors a configuration file for
//! changes and triggers reload callbacks when modifications are detected.

use crate::domain::{ConfigError, Result};
use crate::ports::{ChangeCallback, ConfigWatcher};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// File system watcher for configuration files.
///
/// This watcher monitors a configuration file for changes and triggers
/// callbacks when modifications are detected. It includes debouncing to
/// avoid triggering multiple times for rapid file changes, which editors
/// that save via rename-and-replace produce routinely.
///
/// # Examples
///
/// ```rust,no_run
/// use inicfg::adapters::FileWatcher;
/// use inicfg::ports::ConfigWatcher;
/// use std::sync::Arc;
///
/// # fn main() -> inicfg::domain::Result<()> {
/// let mut watcher = FileWatcher::new("/etc/myapp/deploy.ini", None)?;
///
/// watcher.watch(Arc::new(|path| {
///     println!("Configuration changed: {}", path.display());
/// }))?;
///
/// // Later, stop watching
/// watcher.stop()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileWatcher {
    /// Path to the file being watched
    file_path: PathBuf,
    /// Debounce delay (default 500ms)
    debounce_delay: Duration,
    /// Internal watcher
    watcher: Option<RecommendedWatcher>,
    /// Channel for receiving file system events
    event_rx: Option<Arc<Mutex<Receiver<notify::Result<Event>>>>>,
    /// Thread handle for the watcher thread
    watch_thread: Option<JoinHandle<()>>,
    /// Stop signal sender
    stop_tx: Option<Sender<()>>,
}

impl FileWatcher {
    /// Creates a new file watcher for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file to watch
    /// * `debounce_delay` - Optional debounce delay (default 500ms)
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use inicfg::adapters::FileWatcher;
    /// use std::time::Duration;
    ///
    /// # fn main() -> inicfg::domain::Result<()> {
    /// // With default debounce delay
    /// let watcher = FileWatcher::new("/etc/myapp/deploy.ini", None)?;
    ///
    /// // With custom debounce delay
    /// let watcher = FileWatcher::new(
    ///     "/etc/myapp/deploy.ini",
    ///     Some(Duration::from_millis(1000))
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(path: impl AsRef<Path>, debounce_delay: Option<Duration>) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();

        if !file_path.exists() {
            return Err(ConfigError::WatcherError {
                message: format!("File does not exist: {}", file_path.display()),
                source: None,
            });
        }

        Ok(Self {
            file_path,
            debounce_delay: debounce_delay.unwrap_or(Duration::from_millis(500)),
            watcher: None,
            event_rx: None,
            watch_thread: None,
            stop_tx: None,
        })
    }

    /// Returns the path being watched.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl ConfigWatcher for FileWatcher {
    fn watch(&mut self, callback: ChangeCallback) -> Result<()> {
        if self.watcher.is_some() {
            return Err(ConfigError::WatcherError {
                message: "Watcher is already running".to_string(),
                source: None,
            });
        }

        let (event_tx, event_rx) = channel();
        let (stop_tx, stop_rx) = channel::<()>();

        // Create the notify watcher
        let mut watcher =
            RecommendedWatcher::new(event_tx, notify::Config::default()).map_err(|e| {
                ConfigError::WatcherError {
                    message: format!("Failed to create file watcher: {}", e),
                    source: Some(Box::new(e)),
                }
            })?;

        // Watch the file's parent directory (watching files directly can be unreliable)
        let watch_path = if self.file_path.is_file() {
            self.file_path
                .parent()
                .ok_or_else(|| ConfigError::WatcherError {
                    message: "Failed to get parent directory".to_string(),
                    source: None,
                })?
                .to_path_buf()
        } else {
            self.file_path.clone()
        };

        watcher
            .watch(&watch_path, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::WatcherError {
                message: format!("Failed to start watching: {}", e),
                source: Some(Box::new(e)),
            })?;

        self.watcher = Some(watcher);
        self.stop_tx = Some(stop_tx);
        let event_rx = Arc::new(Mutex::new(event_rx));
        self.event_rx = Some(Arc::clone(&event_rx));

        // Spawn a thread to handle file system events
        let file_path = self.file_path.clone();
        let debounce_delay = self.debounce_delay;

        let watch_thread = thread::spawn(move || {
            let mut last_event_time: Option<Instant> = None;

            loop {
                // Check for stop signal (non-blocking)
                if stop_rx.try_recv().is_ok() {
                    break;
                }

                // Check for file system events
                if let Ok(rx) = event_rx.lock() {
                    if let Ok(Ok(event)) = rx.recv_timeout(Duration::from_millis(100)) {
                        // Check if the event is for our file
                        let is_our_file = event.paths.iter().any(|p| p == &file_path);

                        if is_our_file {
                            // Debounce: only trigger if enough time has passed
                            let now = Instant::now();
                            let should_trigger = last_event_time
                                .map(|last| now.duration_since(last) >= debounce_delay)
                                .unwrap_or(true);

                            if should_trigger {
                                last_event_time = Some(now);
                                callback(&file_path);
                            }
                        }
                    }
                }
            }
        });

        self.watch_thread = Some(watch_thread);

        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        // Send stop signal
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        // Wait for the thread to finish
        if let Some(handle) = self.watch_thread.take() {
            handle.join().map_err(|_| ConfigError::WatcherError {
                message: "Failed to join watcher thread".to_string(),
                source: None,
            })?;
        }

        // Drop the watcher
        self.watcher = None;
        self.event_rx = None;

        Ok(())
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
