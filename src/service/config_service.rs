// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service implementation.
//!
//! This module provides the service that owns the published configuration
//! document: it loads text from a source, parses it, validates it against an
//! optional schema, and publishes the result as an immutable snapshot.
//! Reloading builds a complete replacement document first and swaps it in
//! atomically, so readers either see the old document or the new one, never
//! a half-applied mix.

use crate::adapters::{IniFileSource, IniParser, MemorySource};
use crate::domain::{ConfigDocument, ConfigError, ConfigValue, Result, Schema};
use crate::ports::{ConfigParser, ConfigSource};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::debug;

#[cfg(feature = "reload")]
use crate::ports::ConfigWatcher;
#[cfg(feature = "reload")]
use std::sync::Mutex;
#[cfg(feature = "reload")]
use tracing::warn;

/// Shared state behind every handle to one service.
struct ServiceInner {
    source: Box<dyn ConfigSource>,
    parser: Box<dyn ConfigParser + Send + Sync>,
    schema: Option<Schema>,
    current: RwLock<Arc<ConfigDocument>>,
    #[cfg(feature = "reload")]
    watchers: Mutex<Vec<Box<dyn ConfigWatcher>>>,
}

impl ServiceInner {
    fn load_document(&self) -> Result<ConfigDocument> {
        build_document(
            self.source.as_ref(),
            self.parser.as_ref(),
            self.schema.as_ref(),
        )
    }

    fn publish(&self, doc: ConfigDocument) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(doc);
    }
}

fn build_document(
    source: &dyn ConfigSource,
    parser: &(dyn ConfigParser + Send + Sync),
    schema: Option<&Schema>,
) -> Result<ConfigDocument> {
    let text = source.read()?;
    let mut doc = parser.parse(&text)?;
    if let Some(here) = source.here() {
        doc = doc.with_var("here", here.display().to_string());
    }
    if let Some(path) = source.path() {
        doc = doc.with_var("__file__", path.display().to_string());
    }
    if let Some(schema) = schema {
        schema.check(&doc)?;
    }
    debug!(
        source = source.name(),
        sections = doc.len(),
        "Loaded configuration document"
    );
    Ok(doc)
}

/// The configuration service.
///
/// The service owns one [`ConfigSource`] and the document most recently
/// built from it. [`snapshot`](ConfigService::snapshot) hands out the
/// current document as an `Arc`; [`reload`](ConfigService::reload) builds
/// and validates a full replacement before swapping it in, and leaves the
/// published document untouched when anything fails.
///
/// Cloning the service is cheap and every clone shares the same published
/// document.
///
/// # Examples
///
/// ```rust
/// use inicfg::service::ConfigService;
///
/// # fn main() -> inicfg::domain::Result<()> {
/// let service = ConfigService::builder()
///     .with_string("[app:main]\nuse = egg:myapp\nretry.attempts = 3\n")
///     .build()?;
///
/// assert_eq!(service.get_int("app:main", "retry.attempts")?, 3);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ConfigService {
    inner: Arc<ServiceInner>,
}

impl ConfigService {
    /// Creates a new service builder.
    pub fn builder() -> ConfigServiceBuilder {
        ConfigServiceBuilder::new()
    }

    /// Creates a service for an INI file on disk, without a schema.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use inicfg::service::ConfigService;
    ///
    /// # fn main() -> inicfg::domain::Result<()> {
    /// let service = ConfigService::from_file("/etc/myapp/deploy.ini")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().with_file(path)?.build()
    }

    /// Returns the currently published document.
    ///
    /// The returned `Arc` stays valid across later reloads; it simply keeps
    /// pointing at the document that was current when it was taken.
    pub fn snapshot(&self) -> Arc<ConfigDocument> {
        self.inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rebuilds the document from the source and swaps it in.
    ///
    /// The whole pipeline runs first: read, parse, inject variables, and
    /// validate against the schema if one is set. Only when every step
    /// succeeds does the published document change; on any error the
    /// previous document stays in place and the error is returned.
    pub fn reload(&self) -> Result<()> {
        let doc = self.inner.load_document()?;
        self.inner.publish(doc);
        debug!(source = self.inner.source.name(), "Swapped in reloaded configuration");
        Ok(())
    }

    /// Looks up a key in the current snapshot and resolves it.
    pub fn get(&self, section: &str, key: &str) -> Result<ConfigValue> {
        self.snapshot().get(section, key)
    }

    /// Looks up a key and returns the resolved value as a `String`.
    pub fn get_string(&self, section: &str, key: &str) -> Result<String> {
        self.snapshot().get_string(section, key)
    }

    /// Looks up a key and coerces the resolved value to an `i64`.
    pub fn get_int(&self, section: &str, key: &str) -> Result<i64> {
        self.snapshot().get_int(section, key)
    }

    /// Looks up a key and coerces the resolved value to a boolean.
    pub fn get_bool(&self, section: &str, key: &str) -> Result<bool> {
        self.snapshot().get_bool(section, key)
    }

    /// Looks up a key and coerces the resolved value to a [`Duration`].
    pub fn get_duration(&self, section: &str, key: &str) -> Result<Duration> {
        self.snapshot().get_duration(section, key)
    }

    /// Looks up a key without interpolating it.
    pub fn get_raw(&self, section: &str, key: &str) -> Result<String> {
        self.snapshot().get_raw(section, key).map(str::to_string)
    }

    /// Starts watching the source's file and reloading on changes.
    ///
    /// Each detected change runs the same build-then-swap path as
    /// [`reload`](ConfigService::reload); a change that fails to parse or
    /// validate is logged at `warn` level and the previous document stays
    /// published. Returns an error when the source has no backing file.
    ///
    /// The watcher thread stops when the last clone of the service is
    /// dropped.
    #[cfg(feature = "reload")]
    pub fn watch(&self) -> Result<()> {
        self.watch_with_debounce(None)
    }

    /// Starts watching with a custom debounce delay.
    #[cfg(feature = "reload")]
    pub fn watch_with_debounce(&self, debounce_delay: Option<Duration>) -> Result<()> {
        use crate::adapters::FileWatcher;

        let path = self
            .inner
            .source
            .path()
            .ok_or_else(|| ConfigError::WatcherError {
                message: format!(
                    "Source '{}' has no file to watch",
                    self.inner.source.name()
                ),
                source: None,
            })?;

        let mut watcher = FileWatcher::new(path, debounce_delay)?;
        let weak = Arc::downgrade(&self.inner);
        watcher.watch(Arc::new(move |changed: &Path| {
            if let Some(inner) = weak.upgrade() {
                match inner.load_document() {
                    Ok(doc) => {
                        inner.publish(doc);
                        debug!(
                            path = %changed.display(),
                            "Reloaded configuration after file change"
                        );
                    }
                    Err(err) => {
                        warn!(
                            path = %changed.display(),
                            error = %err,
                            "Reload failed, keeping previous configuration"
                        );
                    }
                }
            }
        }))?;

        self.inner
            .watchers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(watcher));
        Ok(())
    }
}

/// Builder for constructing a [`ConfigService`].
///
/// The builder collects a source, an optional schema, and an optional
/// replacement parser, then performs the initial load and validation in
/// [`build`](ConfigServiceBuilder::build). A document that fails validation
/// never becomes a service; the error carries every collected violation so
/// the host can print them all and refuse to start.
///
/// # Examples
///
/// ```rust
/// use inicfg::domain::{KeySchema, Schema, SectionSchema, ValueKind};
/// use inicfg::service::ConfigService;
///
/// let schema = Schema::new().section(
///     SectionSchema::required("server:main")
///         .key(KeySchema::required("listen", ValueKind::HostPort)),
/// );
///
/// let result = ConfigService::builder()
///     .with_string("[server:main]\n")
///     .with_schema(schema)
///     .build();
/// assert!(result.is_err());
/// ```
pub struct ConfigServiceBuilder {
    source: Option<Box<dyn ConfigSource>>,
    parser: Box<dyn ConfigParser + Send + Sync>,
    schema: Option<Schema>,
}

impl ConfigServiceBuilder {
    /// Creates a new builder with the INI parser and no source.
    pub fn new() -> Self {
        Self {
            source: None,
            parser: Box::new(IniParser::new()),
            schema: None,
        }
    }

    /// Sets the configuration source.
    pub fn with_source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets an INI file as the configuration source.
    pub fn with_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let source = IniFileSource::from_file(path)?;
        Ok(self.with_source(Box::new(source)))
    }

    /// Sets an in-memory string as the configuration source.
    pub fn with_string(self, text: impl Into<String>) -> Self {
        self.with_source(Box::new(MemorySource::new(text)))
    }

    /// Sets the schema the document must satisfy on every load.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Replaces the parser.
    pub fn with_parser(mut self, parser: Box<dyn ConfigParser + Send + Sync>) -> Self {
        self.parser = parser;
        self
    }

    /// Performs the initial load and validation and builds the service.
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigService)` - The source loaded and validated cleanly
    /// * `Err(ConfigError)` - No source was set, the text failed to parse,
    ///   or validation collected violations
    pub fn build(self) -> Result<ConfigService> {
        let source = self.source.ok_or_else(|| ConfigError::SourceError {
            source_name: "config-service".to_string(),
            message: "No configuration source was provided".to_string(),
            source: None,
        })?;

        let doc = build_document(source.as_ref(), self.parser.as_ref(), self.schema.as_ref())?;

        Ok(ConfigService {
            inner: Arc::new(ServiceInner {
                source,
                parser: self.parser,
                schema: self.schema,
                current: RwLock::new(Arc::new(doc)),
                #[cfg(feature = "reload")]
                watchers: Mutex::new(Vec::new()),
            }),
        })
    }
}

impl Default for ConfigServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
