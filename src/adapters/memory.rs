// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory configuration source adapter.
//!
//! This module provides an adapter that serves configuration text held in
//! memory. It backs embedded defaults and keeps tests off the filesystem.

use crate::domain::Result;
use crate::ports::ConfigSource;
use std::path::{Path, PathBuf};

/// Configuration source adapter for in-memory text.
///
/// The source has no backing file, so documents built from it carry no
/// `__file__` variable and, unless one is supplied with
/// [`with_here`](MemorySource::with_here), no `here` variable either.
///
/// # Examples
///
/// ```rust
/// use inicfg::adapters::MemorySource;
/// use inicfg::ports::ConfigSource;
///
/// let source = MemorySource::new("[app:main]\nuse = egg:myapp\n");
/// assert_eq!(source.name(), "memory");
/// assert!(source.read().unwrap().contains("egg:myapp"));
/// ```
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    text: String,
    here: Option<PathBuf>,
}

impl MemorySource {
    /// Creates a source serving the given text.
    pub fn new(text: impl Into<String>) -> Self {
        MemorySource {
            name: "memory".to_string(),
            text: text.into(),
            here: None,
        }
    }

    /// Overrides the source name used in logs and error messages.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Supplies a directory to expose as the `here` variable.
    pub fn with_here(mut self, here: impl Into<PathBuf>) -> Self {
        self.here = Some(here.into());
        self
    }
}

impl ConfigSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn here(&self) -> Option<&Path> {
        self.here.as_deref()
    }
}
