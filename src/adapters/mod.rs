// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing configuration source implementations.
//!
//! This module contains concrete implementations of the traits defined in
//! the ports layer: the INI parser and file source, an in-memory source for
//! embedded text and tests, and the file watcher behind the `reload`
//! feature.

pub mod ini_file;
pub mod memory;

pub mod watchers;

// Re-export adapters
pub use ini_file::{IniFileSource, IniParser};
pub use memory::MemorySource;

#[cfg(feature = "reload")]
pub use watchers::FileWatcher;
